//! Per-session async mutexes.
//!
//! Every read-modify-write on a session runs while holding its guard, so
//! submissions for the same session are applied one at a time and each
//! quorum resolves exactly once. Different sessions never contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the map shard is released before awaiting.
        let lock = self
            .locks
            .entry(session_id.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
