use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::actions::Action;
use crate::domain::names::normalize_name;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{GameSession, JoinOutcome};
use crate::error::AppError;
use crate::extractors::{SessionId, ValidatedJson};
use crate::http::etag::{if_none_match_matches, session_etag};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct NameRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    name: String,
    action: Action,
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    viewer: Option<String>,
}

#[derive(Debug, Serialize)]
struct JoinResponse {
    outcome: JoinOutcome,
    view: PlayerView,
}

/// The caller's view of `session`, tagged with the snapshot's ETag.
fn view_response(
    status: StatusCode,
    session: &GameSession,
    caller: &str,
) -> Result<HttpResponse, AppError> {
    let caller = normalize_name(caller)?;
    let view = PlayerView::for_viewer(session, Some(&caller));
    Ok(HttpResponse::build(status)
        .insert_header((ETAG, session_etag(&session.id, session.version)))
        .json(view))
}

/// POST /api/sessions
async fn create_session(
    body: ValidatedJson<NameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.create_session(&body.name).await?;
    view_response(StatusCode::CREATED, &session, &body.name)
}

/// POST /api/sessions/{session_id}/join
async fn join_session(
    id: SessionId,
    body: ValidatedJson<NameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (outcome, session) = app_state
        .sessions
        .join_session(id.as_str(), &body.name)
        .await?;
    let name = normalize_name(&body.name)?;
    let view = PlayerView::for_viewer(&session, Some(&name));

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, session_etag(&session.id, session.version)))
        .json(JoinResponse { outcome, view }))
}

/// POST /api/sessions/{session_id}/start
async fn start_session(
    id: SessionId,
    body: ValidatedJson<NameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state
        .sessions
        .start_session(id.as_str(), &body.name)
        .await?;
    view_response(StatusCode::OK, &session, &body.name)
}

/// POST /api/sessions/{session_id}/actions
async fn submit_action(
    id: SessionId,
    body: ValidatedJson<ActionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ActionRequest { name, action } = body.into_inner();
    let session = app_state
        .sessions
        .submit_action(id.as_str(), &name, action)
        .await?;
    view_response(StatusCode::OK, &session, &name)
}

/// POST /api/sessions/{session_id}/reset
async fn reset_session(
    id: SessionId,
    body: ValidatedJson<NameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state
        .sessions
        .reset_session(id.as_str(), &body.name)
        .await?;
    view_response(StatusCode::OK, &session, &body.name)
}

/// GET /api/sessions/{session_id}?viewer=name
///
/// Polling endpoint. Answers 304 while the client's `If-None-Match` still
/// names the current snapshot version.
async fn get_session(
    http_req: HttpRequest,
    id: SessionId,
    query: web::Query<ViewQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .sessions
        .view_session(id.as_str(), query.viewer.as_deref())
        .await?;
    let etag_value = session_etag(&view.session_id, view.version);

    let not_modified = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|client| if_none_match_matches(client, &etag_value));

    if not_modified {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag_value))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_session))
        .route("/{session_id}", web::get().to(get_session))
        .route("/{session_id}/join", web::post().to(join_session))
        .route("/{session_id}/start", web::post().to(start_session))
        .route("/{session_id}/actions", web::post().to(submit_action))
        .route("/{session_id}/reset", web::post().to(reset_session));
}
