//! Night resolution: kill, save and investigation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::actions::{Action, PendingAction};
use crate::domain::roles::Role;

/// What the detective learned. Only shown to `detective`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigation {
    pub detective: String,
    pub target: String,
    pub revealed_role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightOutcome {
    pub death: Option<String>,
    pub saved: Option<String>,
    pub investigation: Option<Investigation>,
}

/// Resolve the night's submissions into an outcome.
///
/// The kill target is the plurality of mafia kill votes. Among tied targets
/// the one whose first vote came earliest wins. The first doctor save and the
/// first detective investigation count; later ones are ignored. Actions from
/// players whose role does not match are ignored.
pub fn resolve_night(pending: &[PendingAction], roles: &BTreeMap<String, Role>) -> NightOutcome {
    let role_of = |p: &str| roles.get(p).copied();

    // (target, votes) in order of first vote
    let mut kill_votes: Vec<(&str, usize)> = Vec::new();
    let mut save: Option<&str> = None;
    let mut investigation: Option<Investigation> = None;

    for PendingAction { player, action } in pending {
        match (action, role_of(player)) {
            (Action::Kill { target }, Some(Role::Mafia)) => {
                match kill_votes.iter_mut().find(|(t, _)| *t == target.as_str()) {
                    Some((_, n)) => *n += 1,
                    None => kill_votes.push((target.as_str(), 1)),
                }
            }
            (Action::Save { target }, Some(Role::Doctor)) if save.is_none() => {
                save = Some(target.as_str());
            }
            (Action::Investigate { target }, Some(Role::Detective)) if investigation.is_none() => {
                if let Some(revealed_role) = role_of(target) {
                    investigation = Some(Investigation {
                        detective: player.clone(),
                        target: target.clone(),
                        revealed_role,
                    });
                }
            }
            _ => {}
        }
    }

    // max_by_key keeps the last maximum; fold keeps the first.
    let kill = kill_votes
        .iter()
        .fold(None::<(&str, usize)>, |best, &(t, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((t, n)),
        })
        .map(|(t, _)| t);

    let mut outcome = NightOutcome {
        investigation,
        ..NightOutcome::default()
    };
    match (kill, save) {
        (Some(k), Some(s)) if k == s => outcome.saved = Some(s.to_string()),
        (Some(k), _) => outcome.death = Some(k.to_string()),
        (None, _) => {}
    }
    outcome
}

/// Remove the night's victim from the living roster. Roles are untouched.
pub fn apply_night(outcome: &NightOutcome, players: &mut Vec<String>) {
    if let Some(dead) = &outcome.death {
        players.retain(|p| p != dead);
    }
}
