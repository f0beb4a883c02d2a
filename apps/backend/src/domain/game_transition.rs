//! Edge-triggered session events derived from before/after snapshots.
//!
//! The service diffs the session around each mutation and logs what
//! happened. Nothing here carries secret roles except `PlayerDied`, whose
//! role is public once the player is out.

use crate::domain::roles::Role;
use crate::domain::state::{GameSession, Phase};
use crate::domain::win::Winner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    NightKill,
    DayVote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// A new name entered the lobby.
    PlayerJoined { name: String },

    /// Lobby -> anything else.
    GameStarted { players: usize },

    PhaseChanged { from: Phase, to: Phase, day: u32 },

    /// A dealt player left the living roster.
    PlayerDied {
        name: String,
        cause: DeathCause,
        role: Option<Role>,
    },

    /// Game over was reached.
    GameEnded { winner: Option<Winner> },

    /// Back to the lobby from a started game.
    SessionReset,
}

/// Derive transitions from the session before and after one operation.
pub fn derive_session_transitions(
    before: &GameSession,
    after: &GameSession,
) -> Vec<SessionTransition> {
    let mut out = Vec::new();

    if before.phase == Phase::Lobby && after.phase == Phase::Lobby {
        out.extend(
            after
                .players
                .iter()
                .filter(|p| !before.players.contains(p))
                .map(|p| SessionTransition::PlayerJoined { name: p.clone() }),
        );
    }

    if before.phase == Phase::Lobby && after.phase != Phase::Lobby {
        out.push(SessionTransition::GameStarted {
            players: after.roles.len(),
        });
    }

    if after.phase != Phase::Lobby {
        let cause = match before.phase {
            Phase::Day => DeathCause::DayVote,
            _ => DeathCause::NightKill,
        };
        out.extend(
            before
                .players
                .iter()
                .filter(|p| after.roles.contains_key(*p) && !after.players.contains(p))
                .map(|p| SessionTransition::PlayerDied {
                    name: p.clone(),
                    cause,
                    role: after.role_of(p),
                }),
        );
    }

    if before.phase != after.phase && after.phase != Phase::Lobby {
        out.push(SessionTransition::PhaseChanged {
            from: before.phase,
            to: after.phase,
            day: after.day_count,
        });
    }

    if !before.game_over && after.game_over {
        out.push(SessionTransition::GameEnded {
            winner: after.winner,
        });
    }

    if before.phase != Phase::Lobby && after.phase == Phase::Lobby {
        out.push(SessionTransition::SessionReset);
    }

    out
}
