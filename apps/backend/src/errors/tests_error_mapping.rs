// Unit tests for error mapping; no HTTP server or database involved.
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_rule_violations_to_422() {
    for (kind, code) in [
        (ValidationKind::InsufficientPlayers, ErrorCode::InsufficientPlayers),
        (ValidationKind::PlayerEliminated, ErrorCode::PlayerEliminated),
        (ValidationKind::InvalidRoleForAction, ErrorCode::InvalidRoleForAction),
        (ValidationKind::UnknownTarget, ErrorCode::UnknownTarget),
        (ValidationKind::InvalidTarget, ErrorCode::InvalidTarget),
    ] {
        let app: AppError = DomainError::validation(kind, "nope").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 422);
    }
}

#[test]
fn phase_mismatch_is_409_and_bad_name_is_400() {
    let app: AppError = DomainError::validation(ValidationKind::PhaseMismatch, "lobby").into();
    assert_eq!(app.code(), ErrorCode::PhaseMismatch);
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::validation(ValidationKind::InvalidPlayerName, "").into();
    assert_eq!(app.code(), ErrorCode::InvalidPlayerName);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_forbidden() {
    let app: AppError = DomainError::forbidden(ForbiddenKind::NotHost, "B is not host").into();
    assert_eq!(app.code(), ErrorCode::NotHost);
    assert_eq!(app.status().as_u16(), 403);

    let app: AppError = DomainError::forbidden(ForbiddenKind::NotAPlayer, "who?").into();
    assert_eq!(app.code(), ErrorCode::NotAPlayer);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_conflicts() {
    let app: AppError =
        DomainError::conflict(ConflictKind::GameAlreadyStarted, "running").into();
    assert_eq!(app.code(), ErrorCode::GameAlreadyStarted);
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::conflict(ConflictKind::OptimisticLock, "v2 != v3").into();
    assert_eq!(app.code(), ErrorCode::OptimisticLock);

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("whatever".into()), "generic").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::session_not_found("ABC123").into();
    assert_eq!(app.code(), ErrorCode::SessionNotFound);
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Session, "Record not found").into();
    assert_eq!(app.code(), ErrorCode::SessionNotFound);
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad json").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("x".into()), "boom").into();
    assert_eq!(app.code(), ErrorCode::DbError);
    assert_eq!(app.status().as_u16(), 500);
}
