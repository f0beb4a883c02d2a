//! The game session aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::actions::{ActionKind, PendingAction};
use crate::domain::day::DayOutcome;
use crate::domain::night::NightOutcome;
use crate::domain::roles::Role;
use crate::domain::win::Winner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Lobby,
    Night,
    Day,
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Lobby => "lobby",
            Phase::Night => "night",
            Phase::Day => "day",
            Phase::GameOver => "game_over",
        }
    }

    /// Phases in which players submit actions.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Night | Phase::Day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOutcome {
    Joined,
    Rejoined,
}

/// Complete state of one session; this is what the store snapshots.
///
/// `players` holds only the living. Anyone in `roles` but not in `players`
/// has been eliminated. Before the first start `roles` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub host: String,
    pub players: Vec<String>,
    pub roles: BTreeMap<String, Role>,
    pub phase: Phase,
    pub pending_actions: Vec<PendingAction>,
    pub day_count: u32,
    pub last_outcome: Option<NightOutcome>,
    pub last_elimination: Option<DayOutcome>,
    pub game_over: bool,
    pub winner: Option<Winner>,
    pub rng_seed: u64,
    pub games_started: u32,
    pub version: i32,
}

impl GameSession {
    /// Fresh lobby with the host as the only player. `host` must already be
    /// normalized.
    pub fn new(id: impl Into<String>, host: impl Into<String>, rng_seed: u64) -> Self {
        let host = host.into();
        Self {
            id: id.into(),
            players: vec![host.clone()],
            host,
            roles: BTreeMap::new(),
            phase: Phase::Lobby,
            pending_actions: Vec::new(),
            day_count: 1,
            last_outcome: None,
            last_elimination: None,
            game_over: false,
            winner: None,
            rng_seed,
            games_started: 0,
            version: 1,
        }
    }

    pub fn is_host(&self, name: &str) -> bool {
        self.host == name
    }

    pub fn is_alive(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Dealt into the current game but no longer alive.
    pub fn is_eliminated(&self, name: &str) -> bool {
        self.roles.contains_key(name) && !self.is_alive(name)
    }

    /// Known to the session: dealt a role, or waiting in the lobby.
    pub fn is_member(&self, name: &str) -> bool {
        self.roles.contains_key(name) || self.is_alive(name)
    }

    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.roles.get(name).copied()
    }

    pub fn has_acted(&self, name: &str) -> bool {
        self.pending_actions.iter().any(|a| a.player == name)
    }

    pub fn eliminated(&self) -> Vec<String> {
        self.roles
            .keys()
            .filter(|name| !self.is_alive(name))
            .cloned()
            .collect()
    }

    /// Living players whose submission the current phase waits for.
    pub fn required_voters(&self) -> Vec<&str> {
        match self.phase {
            Phase::Night => self
                .players
                .iter()
                .filter(|p| self.role_of(p).is_some_and(Role::acts_at_night))
                .map(String::as_str)
                .collect(),
            Phase::Day => self.players.iter().map(String::as_str).collect(),
            Phase::Lobby | Phase::GameOver => Vec::new(),
        }
    }

    /// Every required voter has acted. Vacuously true with no voters.
    pub fn quorum_reached(&self) -> bool {
        self.phase.is_active() && self.required_voters().iter().all(|p| self.has_acted(p))
    }

    /// Kinds `name` may submit right now; empty when they have nothing to do.
    pub fn available_actions(&self, name: &str) -> Vec<ActionKind> {
        match self.role_of(name) {
            Some(role) if self.is_alive(name) && !self.has_acted(name) => {
                ActionKind::available(self.phase, role)
            }
            _ => Vec::new(),
        }
    }

    /// Living players `name` may target with `kind`.
    pub fn valid_targets(&self, name: &str, kind: ActionKind) -> Vec<String> {
        if kind == ActionKind::Skip {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|p| kind.allows_self_target() || p.as_str() != name)
            .cloned()
            .collect()
    }
}
