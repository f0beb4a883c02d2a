//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; stores convert here, and higher layers
//! map `DomainError` to `AppError` via `From`.

use tracing::{debug, error, warn};

use crate::adapters::sessions_sea::{OPTIMISTIC_LOCK_TAG, SESSION_NOT_FOUND_TAG};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

/// `table.column` from SQLite's "UNIQUE constraint failed: table.column".
fn sqlite_unique_column(error_msg: &str) -> Option<&str> {
    let (_, rest) = error_msg.split_once("UNIQUE constraint failed: ")?;
    rest.split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
}

#[derive(serde::Deserialize)]
struct LockInfo {
    expected: i32,
    actual: i32,
}

/// Translate a `DbErr` into a `DomainError` with a client-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            debug!(trace_id = %trace_id, record = %what, "Record not found");
            return DomainError::not_found(NotFoundKind::Session, "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(SESSION_NOT_FOUND_TAG) => {
            let id = &msg[SESSION_NOT_FOUND_TAG.len()..];
            warn!(trace_id = %trace_id, session_id = id, "Session row missing on update");
            return DomainError::session_not_found(id);
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_TAG) => {
            let json = &msg[OPTIMISTIC_LOCK_TAG.len()..];
            return match serde_json::from_str::<LockInfo>(json) {
                Ok(info) => {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Session was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    )
                }
                Err(_) => {
                    warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        "Session was modified concurrently; please retry",
                    )
                }
            };
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if error_msg.contains("UNIQUE constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return match sqlite_unique_column(&error_msg) {
            Some("game_sessions.id") => {
                DomainError::conflict(ConflictKind::SessionIdConflict, "Session code already exists")
            }
            _ => DomainError::conflict(
                ConflictKind::Other("Unique".into()),
                "Unique constraint violation",
            ),
        };
    }

    // SQLITE_BUSY from a second process holding the write lock.
    if error_msg.contains("database is locked") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database busy");
        return DomainError::infra(InfraErrorKind::DbUnavailable, "Database busy; retry shortly");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
