//! Day vote tally and elimination decision.

use serde::{Deserialize, Serialize};

use crate::domain::actions::{Action, PendingAction};
use crate::domain::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub target: String,
    pub votes: usize,
}

/// Running or final tally of the day's votes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    /// Per-target counts in order of each target's first vote.
    pub counts: Vec<VoteCount>,
    pub skip_count: usize,
    /// Living players who have voted so far.
    pub voted: usize,
    pub alive: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoEliminationReason {
    NoVotes,
    Tie,
    SkipMajority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayDecision {
    Eliminate(String),
    NoElimination(NoEliminationReason),
}

/// Public record of a resolved day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOutcome {
    pub eliminated: Option<String>,
    pub revealed_role: Option<Role>,
    pub reason: Option<NoEliminationReason>,
    pub tally: DayTally,
}

/// Count day votes cast by living players.
pub fn tally_day_votes(pending: &[PendingAction], live_players: &[String]) -> DayTally {
    let mut tally = DayTally {
        alive: live_players.len(),
        ..DayTally::default()
    };

    for PendingAction { player, action } in pending {
        if !live_players.contains(player) {
            continue;
        }
        match action {
            Action::Eliminate { target } => {
                tally.voted += 1;
                match tally.counts.iter_mut().find(|c| &c.target == target) {
                    Some(c) => c.votes += 1,
                    None => tally.counts.push(VoteCount {
                        target: target.clone(),
                        votes: 1,
                    }),
                }
            }
            Action::Skip => {
                tally.voted += 1;
                tally.skip_count += 1;
            }
            _ => {}
        }
    }
    tally
}

impl DayTally {
    pub fn max_votes(&self) -> usize {
        self.counts.iter().map(|c| c.votes).max().unwrap_or(0)
    }

    /// A unique leader strictly above the skip count is eliminated.
    pub fn decide(&self) -> DayDecision {
        let max = self.max_votes();
        if max == 0 {
            return DayDecision::NoElimination(if self.skip_count > 0 {
                NoEliminationReason::SkipMajority
            } else {
                NoEliminationReason::NoVotes
            });
        }
        if max <= self.skip_count {
            return DayDecision::NoElimination(NoEliminationReason::SkipMajority);
        }

        let mut leaders = self.counts.iter().filter(|c| c.votes == max);
        match (leaders.next(), leaders.next()) {
            (Some(only), None) => DayDecision::Eliminate(only.target.clone()),
            _ => DayDecision::NoElimination(NoEliminationReason::Tie),
        }
    }
}
