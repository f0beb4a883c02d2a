use actix_web::web;

pub mod health;
pub mod sessions;

/// Register every route. Shared by `main.rs` and the test app builder so
/// tests exercise the production paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Sessions: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));
}
