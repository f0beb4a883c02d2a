use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    store: String,
    store_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let store = app_state.sessions.store_health().await;

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version: app_state.app_version.to_string(),
        store: app_state.sessions.store_kind().to_string(),
        store_status: if store.ok { "ok" } else { "error" }.to_string(),
        store_error: store.error,
        migrations: store.migrations,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
