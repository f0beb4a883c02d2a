//! Win condition evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Mafia,
    Villagers,
}

/// Town wins once no mafia is alive; mafia wins at parity or better.
pub fn evaluate_winner(live_players: &[String], roles: &BTreeMap<String, Role>) -> Option<Winner> {
    let (mafia, town) = live_players
        .iter()
        .filter_map(|p| roles.get(p))
        .fold((0usize, 0usize), |(m, t), role| {
            if role.is_mafia() {
                (m + 1, t)
            } else {
                (m, t + 1)
            }
        });

    if mafia == 0 {
        Some(Winner::Villagers)
    } else if mafia >= town {
        Some(Winner::Mafia)
    } else {
        None
    }
}
