//! Process configuration from environment variables.
//!
//! | Variable               | Default     |
//! |------------------------|-------------|
//! | `BACKEND_HOST`         | `0.0.0.0`   |
//! | `BACKEND_PORT`         | `3001`      |
//! | `SESSION_STORE`        | `memory`    |
//! | `SQLITE_PATH`          | `mafia.db`  |
//! | `CORS_ALLOWED_ORIGINS` | localhost   |

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Sqlite { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match non_empty("BACKEND_PORT") {
            None => 3001,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got {raw:?}"))
            })?,
        };

        let store = match non_empty("SESSION_STORE")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("memory") => StoreConfig::Memory,
            Some("sqlite") => StoreConfig::Sqlite {
                path: non_empty("SQLITE_PATH").unwrap_or_else(|| "mafia.db".to_string()),
            },
            Some(other) => {
                return Err(AppError::config(format!(
                    "SESSION_STORE must be 'memory' or 'sqlite', got {other:?}"
                )))
            }
        };

        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            store,
            cors_origins,
        })
    }
}
