//! Session service: the critical section around every session operation.
//!
//! Each mutating call takes the session's lock, loads the snapshot, applies
//! the domain operation to a working copy, bumps the version and writes it
//! back with a compare-and-swap on the previous version. A failed operation
//! writes nothing.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::actions::Action;
use crate::domain::game_transition::{derive_session_transitions, DeathCause, SessionTransition};
use crate::domain::names::normalize_name;
use crate::domain::phase_engine;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{GameSession, JoinOutcome};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::sessions::{SharedStore, StoreHealth};
use crate::services::session_locks::SessionLocks;
use crate::utils::session_code::generate_session_code;

/// Attempts at finding an unused session code before giving up.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Where new sessions get their base RNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Fresh entropy per session.
    Entropy,
    /// Every session starts from the same seed; for reproducible tests.
    Fixed(u64),
}

impl SeedPolicy {
    fn next_seed(self) -> u64 {
        match self {
            SeedPolicy::Entropy => rand::rng().random(),
            SeedPolicy::Fixed(seed) => seed,
        }
    }
}

#[derive(Clone)]
pub struct SessionService {
    store: SharedStore,
    locks: SessionLocks,
    seeds: SeedPolicy,
}

impl SessionService {
    pub fn new(store: SharedStore, seeds: SeedPolicy) -> Self {
        Self {
            store,
            locks: SessionLocks::new(),
            seeds,
        }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn store_health(&self) -> StoreHealth {
        self.store.health().await
    }

    /// Open a lobby hosted by `host_name`.
    pub async fn create_session(&self, host_name: &str) -> Result<GameSession, DomainError> {
        let host = normalize_name(host_name)?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let session = GameSession::new(generate_session_code(), host.clone(), self.seeds.next_seed());
            match self.store.insert(&session).await {
                Ok(()) => {
                    info!(session_id = %session.id, host = %session.host, "Session created");
                    return Ok(session);
                }
                Err(DomainError::Conflict(ConflictKind::SessionIdConflict, _)) => {
                    debug!(attempt, session_id = %session.id, "Session code taken; retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "No free session code found");
        Err(DomainError::conflict(
            ConflictKind::SessionIdConflict,
            "could not allocate a session code; try again",
        ))
    }

    pub async fn join_session(
        &self,
        id: &str,
        name: &str,
    ) -> Result<(JoinOutcome, GameSession), DomainError> {
        self.run_mutation(id, "join", |s| phase_engine::join(s, name))
            .await
    }

    pub async fn start_session(&self, id: &str, caller: &str) -> Result<GameSession, DomainError> {
        self.run_mutation(id, "start", |s| phase_engine::start(s, caller))
            .await
            .map(|(_, s)| s)
    }

    pub async fn submit_action(
        &self,
        id: &str,
        caller: &str,
        action: Action,
    ) -> Result<GameSession, DomainError> {
        let kind = action.kind();
        let (_, session) = self
            .run_mutation(id, "submit_action", |s| {
                phase_engine::submit_action(s, caller, action)
            })
            .await?;
        debug!(session_id = id, action = ?kind, "Action accepted");
        Ok(session)
    }

    pub async fn reset_session(&self, id: &str, caller: &str) -> Result<GameSession, DomainError> {
        self.run_mutation(id, "reset", |s| phase_engine::reset(s, caller))
            .await
            .map(|(_, s)| s)
    }

    /// Read-only projection for `viewer`; `None` gives the spectator view.
    pub async fn view_session(
        &self,
        id: &str,
        viewer: Option<&str>,
    ) -> Result<PlayerView, DomainError> {
        let viewer = viewer.map(normalize_name).transpose()?;
        let session = self.load_session(id).await?;
        Ok(PlayerView::for_viewer(&session, viewer.as_deref()))
    }

    /// Current snapshot without taking the lock.
    pub async fn load_session(&self, id: &str) -> Result<GameSession, DomainError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::session_not_found(id))
    }

    async fn run_mutation<T, F>(
        &self,
        id: &str,
        op: &'static str,
        mutation: F,
    ) -> Result<(T, GameSession), DomainError>
    where
        F: FnOnce(&mut GameSession) -> Result<T, DomainError>,
    {
        // Lock entries are only created for sessions that exist, so unknown
        // codes cannot grow the lock map.
        self.load_session(id).await?;
        let _guard = self.locks.acquire(id).await;

        let before = self.load_session(id).await?;
        let mut working = before.clone();
        let out = mutation(&mut working).inspect_err(|e| {
            debug!(session_id = id, op, error = %e, "Session operation rejected");
        })?;

        if working == before {
            return Ok((out, before));
        }

        working.version = before.version + 1;
        self.store.put(&working, before.version).await?;

        log_transitions(&working.id, &derive_session_transitions(&before, &working));
        Ok((out, working))
    }
}

fn log_transitions(session_id: &str, transitions: &[SessionTransition]) {
    for t in transitions {
        match t {
            SessionTransition::PlayerJoined { name } => {
                info!(session_id, player = %name, "Player joined");
            }
            SessionTransition::GameStarted { players } => {
                info!(session_id, players, "Game started");
            }
            SessionTransition::PhaseChanged { from, to, day } => {
                info!(session_id, from = from.as_str(), to = to.as_str(), day, "Phase changed");
            }
            SessionTransition::PlayerDied {
                name,
                cause: DeathCause::DayVote,
                role,
            } => {
                info!(session_id, player = %name, role = ?role, "Player voted out");
            }
            SessionTransition::PlayerDied {
                name,
                cause: DeathCause::NightKill,
                role,
            } => {
                info!(session_id, player = %name, "Player killed in the night");
                debug!(session_id, player = %name, role = ?role, "Night victim role");
            }
            SessionTransition::GameEnded { winner } => {
                info!(session_id, winner = ?winner, "Game over");
            }
            SessionTransition::SessionReset => {
                info!(session_id, "Session reset to lobby");
            }
        }
    }
}
