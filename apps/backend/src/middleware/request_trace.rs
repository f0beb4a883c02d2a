//! Per-request trace middleware.
//!
//! Generates a UUID trace id, stores it in the request extensions and the
//! task-local `trace_ctx`, runs the handler inside a `request` span, emits a
//! single `request_completed` event and echoes the id in `x-request-id`.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::trace_ctx;

/// Trace id as stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

#[derive(Clone, Default)]
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let trace_id = Uuid::new_v4().to_string();
        let method = req.method().to_string();
        let path = req.path().to_string();

        req.extensions_mut().insert(RequestId(trace_id.clone()));

        let span = info_span!("request", trace_id = %trace_id, method = %method, path = %path);
        let fut = trace_ctx::with_trace_id(trace_id.clone(), self.service.call(req));

        Box::pin(
            async move {
                let result = fut.await;

                let status = match &result {
                    Ok(res) => res.status(),
                    Err(err) => err.as_response_error().status_code(),
                };
                let duration_us = start.elapsed().as_micros() as u64;
                let status_code = status.as_u16();

                if status.is_server_error() {
                    error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                } else if status.is_client_error() {
                    warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                } else {
                    info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                }

                let mut res = result?;
                if let Ok(value) = HeaderValue::from_str(&trace_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static("x-request-id"), value);
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}
