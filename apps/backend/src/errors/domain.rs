//! Domain-level error type used across the game engine, services and stores.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert through the
//! `From<DomainError> for AppError` implementation.

use thiserror::Error;

/// Rule violations rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InsufficientPlayers,
    PlayerEliminated,
    InvalidRoleForAction,
    UnknownTarget,
    InvalidTarget,
    PhaseMismatch,
    InvalidPlayerName,
}

/// Caller is known (or not) but may not perform the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    NotHost,
    NotAPlayer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    GameAlreadyStarted,
    DuplicateSubmission,
    OptimisticLock,
    SessionIdConflict,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    #[error("forbidden {0:?}: {1}")]
    Forbidden(ForbiddenKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn session_not_found(id: &str) -> Self {
        Self::not_found(NotFoundKind::Session, format!("session {id} not found"))
    }

    /// True for the CAS failure a caller may retry after reloading.
    pub fn is_optimistic_lock(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::OptimisticLock, _))
    }
}
