use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// RFC 7807 body written for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { code: ErrorCode, detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Db { code, .. } => *code,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail, .. }
            | AppError::DbUnavailable { detail }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let (code, status) = match kind {
                    ValidationKind::InsufficientPlayers => {
                        (ErrorCode::InsufficientPlayers, StatusCode::UNPROCESSABLE_ENTITY)
                    }
                    ValidationKind::PlayerEliminated => {
                        (ErrorCode::PlayerEliminated, StatusCode::UNPROCESSABLE_ENTITY)
                    }
                    ValidationKind::InvalidRoleForAction => {
                        (ErrorCode::InvalidRoleForAction, StatusCode::UNPROCESSABLE_ENTITY)
                    }
                    ValidationKind::UnknownTarget => {
                        (ErrorCode::UnknownTarget, StatusCode::UNPROCESSABLE_ENTITY)
                    }
                    ValidationKind::InvalidTarget => {
                        (ErrorCode::InvalidTarget, StatusCode::UNPROCESSABLE_ENTITY)
                    }
                    ValidationKind::PhaseMismatch => (ErrorCode::PhaseMismatch, StatusCode::CONFLICT),
                    ValidationKind::InvalidPlayerName => {
                        (ErrorCode::InvalidPlayerName, StatusCode::BAD_REQUEST)
                    }
                };
                AppError::Validation {
                    code,
                    detail,
                    status,
                }
            }
            DomainError::Forbidden(kind, detail) => {
                let code = match kind {
                    ForbiddenKind::NotHost => ErrorCode::NotHost,
                    ForbiddenKind::NotAPlayer => ErrorCode::NotAPlayer,
                };
                AppError::Forbidden { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::GameAlreadyStarted => ErrorCode::GameAlreadyStarted,
                    ConflictKind::DuplicateSubmission => ErrorCode::DuplicateSubmission,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::SessionIdConflict => ErrorCode::SessionIdConflict,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable { detail },
                InfraErrorKind::DataCorruption => AppError::Db {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::Db {
                    code: ErrorCode::DbError,
                    detail,
                },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e).into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://mafia.invalid/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
