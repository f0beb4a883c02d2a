#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod utils;

// Re-exports for public API
pub use config::app::{AppConfig, StoreConfig};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use errors::ErrorCode;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use services::sessions::{SeedPolicy, SessionService};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    mafia_test_support::logging::init();
}
