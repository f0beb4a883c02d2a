//! Error codes for the session API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code
//! is SCREAMING_SNAKE_CASE and maps 1:1 to the string in HTTP responses.

use core::fmt;

/// Centralized error codes surfaced in problem responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Caller identity
    /// Caller is not the session host
    NotHost,
    /// Caller never joined the session
    NotAPlayer,

    // Request validation
    /// Player name empty or too long
    InvalidPlayerName,
    /// Malformed session id in the path
    InvalidSessionId,
    /// Fewer than four players at start
    InsufficientPlayers,
    /// Caller has been eliminated
    PlayerEliminated,
    /// Caller's role cannot perform this action
    InvalidRoleForAction,
    /// Target is not part of the session
    UnknownTarget,
    /// Target is dead or a forbidden self-target
    InvalidTarget,
    /// Action not legal in the current phase
    PhaseMismatch,
    /// General validation error
    ValidationError,
    /// Malformed request (bad JSON, missing query)
    BadRequest,

    // Resource not found
    /// Session id unknown
    SessionNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// New players cannot join a running game
    GameAlreadyStarted,
    /// Player already acted this phase
    DuplicateSubmission,
    /// Stored snapshot version moved
    OptimisticLock,
    /// Generated session code already taken
    SessionIdConflict,
    /// Generic conflict fallback
    Conflict,

    // System
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Stored snapshot failed to decode
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical string as it appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotHost => "NOT_HOST",
            Self::NotAPlayer => "NOT_A_PLAYER",

            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::PlayerEliminated => "PLAYER_ELIMINATED",
            Self::InvalidRoleForAction => "INVALID_ROLE_FOR_ACTION",
            Self::UnknownTarget => "UNKNOWN_TARGET",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::DuplicateSubmission => "DUPLICATE_SUBMISSION",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::SessionIdConflict => "SESSION_ID_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
