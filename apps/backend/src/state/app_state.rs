use crate::services::sessions::SessionService;

/// Shared state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionService,
    pub app_version: &'static str,
}

impl AppState {
    pub fn new(sessions: SessionService) -> Self {
        Self {
            sessions,
            app_version: env!("CARGO_PKG_VERSION"),
        }
    }
}
