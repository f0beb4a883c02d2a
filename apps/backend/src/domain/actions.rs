//! Night and day actions as submitted by players.

use serde::{Deserialize, Serialize};

use crate::domain::roles::Role;
use crate::domain::state::Phase;

/// A single submission. Serialized as `{"action": "kill", "target": "D"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Kill { target: String },
    Save { target: String },
    Investigate { target: String },
    Eliminate { target: String },
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Kill,
    Save,
    Investigate,
    Eliminate,
    Skip,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Kill { .. } => ActionKind::Kill,
            Action::Save { .. } => ActionKind::Save,
            Action::Investigate { .. } => ActionKind::Investigate,
            Action::Eliminate { .. } => ActionKind::Eliminate,
            Action::Skip => ActionKind::Skip,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Action::Kill { target }
            | Action::Save { target }
            | Action::Investigate { target }
            | Action::Eliminate { target } => Some(target),
            Action::Skip => None,
        }
    }

    /// Copy of the action with its target replaced by `f(target)`.
    pub(crate) fn map_target(self, f: impl FnOnce(String) -> String) -> Action {
        match self {
            Action::Kill { target } => Action::Kill { target: f(target) },
            Action::Save { target } => Action::Save { target: f(target) },
            Action::Investigate { target } => Action::Investigate { target: f(target) },
            Action::Eliminate { target } => Action::Eliminate { target: f(target) },
            Action::Skip => Action::Skip,
        }
    }
}

impl ActionKind {
    pub fn phase(self) -> Phase {
        match self {
            ActionKind::Kill | ActionKind::Save | ActionKind::Investigate => Phase::Night,
            ActionKind::Eliminate | ActionKind::Skip => Phase::Day,
        }
    }

    /// Role required to submit this kind; `None` means any living player.
    pub fn required_role(self) -> Option<Role> {
        match self {
            ActionKind::Kill => Some(Role::Mafia),
            ActionKind::Save => Some(Role::Doctor),
            ActionKind::Investigate => Some(Role::Detective),
            ActionKind::Eliminate | ActionKind::Skip => None,
        }
    }

    /// The doctor may save themselves and anyone may vote against
    /// themselves. Killing or investigating yourself is refused.
    pub fn allows_self_target(self) -> bool {
        matches!(self, ActionKind::Save | ActionKind::Eliminate)
    }

    /// Kinds a living player holding `role` may submit during `phase`.
    pub fn available(phase: Phase, role: Role) -> Vec<ActionKind> {
        match phase {
            Phase::Night => match role {
                Role::Mafia => vec![ActionKind::Kill],
                Role::Doctor => vec![ActionKind::Save],
                Role::Detective => vec![ActionKind::Investigate],
                Role::Villager => Vec::new(),
            },
            Phase::Day => vec![ActionKind::Eliminate, ActionKind::Skip],
            Phase::Lobby | Phase::GameOver => Vec::new(),
        }
    }
}

/// An accepted submission, kept in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub player: String,
    pub action: Action,
}
