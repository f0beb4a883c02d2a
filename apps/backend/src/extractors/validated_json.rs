use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON body extractor whose failures render as our problem responses.
///
/// actix's own `web::Json` answers malformed bodies with a plain-text 400;
/// this one reports `BAD_REQUEST` with the trace id like every other error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let body = body.await.map_err(|e| {
                warn!(trace_id = %trace_id, error = %e, "Failed to read request body");
                AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
            })?;

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    trace_id = %trace_id,
                    error = %e,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Client-facing summary of a serde_json failure.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => format!("Invalid request body: {error}"),
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
