//! SQLite connection bootstrap for the SeaORM session store.

use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Where the SQLite store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    /// Private in-memory database; one connection so every query sees it.
    Memory,
    /// Database file, created if missing.
    File(String),
}

impl SqliteTarget {
    pub fn url(&self) -> String {
        match self {
            SqliteTarget::Memory => "sqlite::memory:".to_string(),
            SqliteTarget::File(path) => format!("sqlite://{path}?mode=rwc"),
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(target: &SqliteTarget) -> Result<DatabaseConnection, AppError> {
    let url = target.url();

    let mut opt = ConnectOptions::new(&url);
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    match target {
        SqliteTarget::Memory => {
            opt.min_connections(1).max_connections(1);
        }
        SqliteTarget::File(_) => {
            opt.max_connections(4);
        }
    }

    let conn = Database::connect(opt).await?;
    migrate(&conn, MigrationCommand::Up).await?;

    let applied = migration::get_latest_migration_version(&conn).await?;
    info!(url = %url, latest_migration = ?applied, "Session database ready");
    Ok(conn)
}
