use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::session_code::parse_session_code;

/// Session code from the `{session_id}` path segment, canonicalized.
///
/// Only the shape is checked here; whether the session exists is the
/// service's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<SessionId, AppError> {
    let raw = req.match_info().get("session_id").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidSessionId, "Missing session_id parameter")
    })?;

    parse_session_code(raw).map(SessionId).ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidSessionId,
            format!("Invalid session id: {raw}"),
        )
    })
}
