//! Secret role assignment.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fewest players a game can be started with.
pub const MIN_PLAYERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Mafia,
    Doctor,
    Detective,
    Villager,
}

impl Role {
    pub fn is_mafia(self) -> bool {
        matches!(self, Role::Mafia)
    }

    /// Doctor, detective and villager all count as town for win checks.
    pub fn is_town(self) -> bool {
        !self.is_mafia()
    }

    /// Roles whose submission is part of the night quorum.
    pub fn acts_at_night(self) -> bool {
        !matches!(self, Role::Villager)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Mafia => "mafia",
            Role::Doctor => "doctor",
            Role::Detective => "detective",
            Role::Villager => "villager",
        }
    }
}

/// Number of mafia dealt for a table of `players`.
pub fn mafia_count_for(players: usize) -> usize {
    (players / 3).max(1)
}

/// Deal secret roles to `players`.
///
/// The roster is shuffled; the first `mafia_count_for(n)` names become mafia,
/// then one doctor and one detective when enough names remain, and everyone
/// else is a villager. Callers reject tables smaller than [`MIN_PLAYERS`].
pub fn assign_roles<R: Rng + ?Sized>(players: &[String], rng: &mut R) -> BTreeMap<String, Role> {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    let mafia = mafia_count_for(shuffled.len());
    shuffled
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let role = match i {
                i if i < mafia => Role::Mafia,
                i if i == mafia => Role::Doctor,
                i if i == mafia + 1 => Role::Detective,
                _ => Role::Villager,
            };
            (name, role)
        })
        .collect()
}
