//! Per-viewer projection of a session.
//!
//! Clients poll this instead of the raw aggregate. Secret roles are only
//! shown to their owner (and between mafia), investigation results only to
//! the detective who made them, and the full deal only once the game is over.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::actions::ActionKind;
use crate::domain::day::{tally_day_votes, DayOutcome, DayTally};
use crate::domain::night::Investigation;
use crate::domain::roles::Role;
use crate::domain::state::{GameSession, Phase};
use crate::domain::win::Winner;

/// Public part of the last night: who died or who was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicNightOutcome {
    pub death: Option<String>,
    pub saved: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub submitted: usize,
    pub required: usize,
}

/// What the requesting player knows about themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfView {
    pub name: String,
    pub is_host: bool,
    pub alive: bool,
    pub role: Option<Role>,
    pub has_acted: bool,
    /// Other mafia, only populated for mafia.
    pub fellow_mafia: Vec<String>,
    pub investigation: Option<Investigation>,
    pub available_actions: Vec<ActionKind>,
    /// Legal targets for the viewer's targeted action, if any.
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub session_id: String,
    pub host: String,
    pub phase: Phase,
    pub day_count: u32,
    pub version: i32,
    pub players: Vec<String>,
    pub eliminated: Vec<String>,
    pub progress: Progress,
    pub last_night: Option<PublicNightOutcome>,
    pub last_elimination: Option<DayOutcome>,
    /// Live vote counts during the day.
    pub day_tally: Option<DayTally>,
    pub game_over: bool,
    pub winner: Option<Winner>,
    /// Full deal, revealed at game over.
    pub roles: Option<BTreeMap<String, Role>>,
    /// `None` for spectators and names the session does not know.
    pub me: Option<SelfView>,
}

impl PlayerView {
    /// Build the view for `viewer` (already normalized), or a spectator view.
    pub fn for_viewer(session: &GameSession, viewer: Option<&str>) -> Self {
        let required = session.required_voters();
        let submitted = required.iter().filter(|p| session.has_acted(p)).count();

        Self {
            session_id: session.id.clone(),
            host: session.host.clone(),
            phase: session.phase,
            day_count: session.day_count,
            version: session.version,
            players: session.players.clone(),
            eliminated: session.eliminated(),
            progress: Progress {
                submitted,
                required: required.len(),
            },
            last_night: session.last_outcome.as_ref().map(|o| PublicNightOutcome {
                death: o.death.clone(),
                saved: o.saved.clone(),
            }),
            last_elimination: session.last_elimination.clone(),
            day_tally: (session.phase == Phase::Day)
                .then(|| tally_day_votes(&session.pending_actions, &session.players)),
            game_over: session.game_over,
            winner: session.winner,
            roles: session.game_over.then(|| session.roles.clone()),
            me: viewer
                .filter(|name| session.is_member(name))
                .map(|name| self_view(session, name)),
        }
    }
}

fn self_view(session: &GameSession, name: &str) -> SelfView {
    let role = session.role_of(name);

    let fellow_mafia = match role {
        Some(Role::Mafia) => session
            .roles
            .iter()
            .filter(|(other, r)| r.is_mafia() && other.as_str() != name)
            .map(|(other, _)| other.clone())
            .collect(),
        _ => Vec::new(),
    };

    let investigation = session
        .last_outcome
        .as_ref()
        .and_then(|o| o.investigation.clone())
        .filter(|inv| inv.detective == name);

    let available_actions = session.available_actions(name);
    let targets = available_actions
        .iter()
        .find(|k| **k != ActionKind::Skip)
        .map(|k| session.valid_targets(name, *k))
        .unwrap_or_default();

    SelfView {
        name: name.to_string(),
        is_host: session.is_host(name),
        alive: session.is_alive(name),
        role,
        has_acted: session.has_acted(name),
        fellow_mafia,
        investigation,
        available_actions,
        targets,
    }
}
