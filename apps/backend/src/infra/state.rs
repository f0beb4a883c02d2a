use std::sync::Arc;

use crate::config::app::StoreConfig;
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, SqliteTarget};
use crate::repos::sessions::{InMemorySessionStore, SharedStore, SqlSessionStore};
use crate::services::sessions::{SeedPolicy, SessionService};
use crate::state::app_state::AppState;

/// Builder for `AppState`, shared by `main` and the tests.
pub struct StateBuilder {
    store: StoreChoice,
    seeds: SeedPolicy,
}

enum StoreChoice {
    Memory,
    Sqlite(SqliteTarget),
    Custom(SharedStore),
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: StoreChoice::Memory,
            seeds: SeedPolicy::Entropy,
        }
    }

    pub fn with_store_config(mut self, config: &StoreConfig) -> Self {
        self.store = match config {
            StoreConfig::Memory => StoreChoice::Memory,
            StoreConfig::Sqlite { path } => StoreChoice::Sqlite(SqliteTarget::File(path.clone())),
        };
        self
    }

    /// SQLite in `:memory:`; migrations run on the single connection.
    pub fn with_sqlite_memory(mut self) -> Self {
        self.store = StoreChoice::Sqlite(SqliteTarget::Memory);
        self
    }

    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.store = StoreChoice::Custom(store);
        self
    }

    pub fn with_seed_policy(mut self, seeds: SeedPolicy) -> Self {
        self.seeds = seeds;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: SharedStore = match self.store {
            StoreChoice::Memory => Arc::new(InMemorySessionStore::new()),
            StoreChoice::Sqlite(target) => {
                let conn = bootstrap_db(&target).await?;
                Arc::new(SqlSessionStore::new(conn))
            }
            StoreChoice::Custom(store) => store,
        };
        Ok(AppState::new(SessionService::new(store, self.seeds)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
