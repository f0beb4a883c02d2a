//! Session snapshot stores.
//!
//! The store is an opaque keyed snapshot map: whole sessions in, whole
//! sessions out. Writes are compare-and-swap on `GameSession::version`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::adapters::sessions_sea::{self as sessions_adapter, SessionRow};
use crate::domain::state::GameSession;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<GameSession>, DomainError>;

    /// Fails with `SessionIdConflict` if the id is taken.
    async fn insert(&self, session: &GameSession) -> Result<(), DomainError>;

    /// Replace the stored snapshot if its version is still `expected_version`.
    async fn put(&self, session: &GameSession, expected_version: i32) -> Result<(), DomainError>;

    /// Short name for health output and logs.
    fn kind(&self) -> &'static str;

    /// Connectivity probe for `/health`.
    async fn health(&self) -> StoreHealth;
}

/// What `/health` reports about the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHealth {
    pub ok: bool,
    /// Latest applied migration, for SQL stores.
    pub migrations: Option<String>,
    pub error: Option<String>,
}

impl StoreHealth {
    fn ok(migrations: Option<String>) -> Self {
        Self {
            ok: true,
            migrations,
            error: None,
        }
    }
}

pub type SharedStore = Arc<dyn SessionStore>;

/// Process-local store; everything is lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, GameSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_conflict(expected: i32, actual: i32) -> DomainError {
    DomainError::conflict(
        ConflictKind::OptimisticLock,
        format!(
            "Session was modified concurrently (expected version {expected}, actual version {actual}). Please refresh and retry."
        ),
    )
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<GameSession>, DomainError> {
        Ok(self.sessions.get(id).map(|s| s.value().clone()))
    }

    async fn insert(&self, session: &GameSession) -> Result<(), DomainError> {
        match self.sessions.entry(session.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::SessionIdConflict,
                "Session code already exists",
            )),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn put(&self, session: &GameSession, expected_version: i32) -> Result<(), DomainError> {
        let mut stored = self
            .sessions
            .get_mut(&session.id)
            .ok_or_else(|| DomainError::session_not_found(&session.id))?;
        if stored.version != expected_version {
            return Err(lock_conflict(expected_version, stored.version));
        }
        *stored = session.clone();
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn health(&self) -> StoreHealth {
        StoreHealth::ok(None)
    }
}

/// SQLite-backed store through SeaORM.
#[derive(Debug, Clone)]
pub struct SqlSessionStore {
    db: DatabaseConnection,
}

impl SqlSessionStore {
    /// `db` must already be migrated (see `infra::db::bootstrap_db`).
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_row(session: &GameSession) -> Result<SessionRow, DomainError> {
        let snapshot = serde_json::to_string(session).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("Encode".into()),
                format!("failed to encode session {}: {e}", session.id),
            )
        })?;
        Ok(SessionRow {
            id: session.id.clone(),
            host: session.host.clone(),
            phase: session.phase.as_str().to_string(),
            version: session.version,
            snapshot,
        })
    }
}

#[async_trait]
impl SessionStore for SqlSessionStore {
    async fn get(&self, id: &str) -> Result<Option<GameSession>, DomainError> {
        let Some(row) = sessions_adapter::find_by_id(&self.db, id)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut session: GameSession = serde_json::from_str(&row.snapshot).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("stored snapshot for session {id} is unreadable: {e}"),
            )
        })?;
        // The column is what the CAS filter checks; trust it over the blob.
        session.version = row.version;
        Ok(Some(session))
    }

    async fn insert(&self, session: &GameSession) -> Result<(), DomainError> {
        let row = Self::to_row(session)?;
        sessions_adapter::insert_session(&self.db, row)
            .await
            .map_err(map_db_err)
    }

    async fn put(&self, session: &GameSession, expected_version: i32) -> Result<(), DomainError> {
        let row = Self::to_row(session)?;
        sessions_adapter::update_if_version(&self.db, expected_version, row)
            .await
            .map_err(map_db_err)
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn health(&self) -> StoreHealth {
        let probe = self
            .db
            .query_one(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1 AS health_check".to_string(),
            ))
            .await;
        if let Err(e) = probe {
            return StoreHealth {
                ok: false,
                migrations: None,
                error: Some(format!("DB query failed: {e}")),
            };
        }
        let migrations = match migration::get_latest_migration_version(&self.db).await {
            Ok(Some(version)) => version,
            Ok(None) => "no_migrations".to_string(),
            Err(_) => "unknown".to_string(),
        };
        StoreHealth::ok(Some(migrations))
    }
}
