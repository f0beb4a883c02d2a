//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod day;
pub mod game_transition;
pub mod names;
pub mod night;
pub mod phase_engine;
pub mod player_view;
pub mod roles;
pub mod seed_derivation;
pub mod state;
pub mod win;

#[cfg(test)]
mod tests_phase_engine;
#[cfg(test)]
mod tests_props_win;

// Re-exports for ergonomics
pub use actions::{Action, ActionKind, PendingAction};
pub use day::{DayOutcome, DayTally, NoEliminationReason};
pub use names::normalize_name;
pub use night::{Investigation, NightOutcome};
pub use player_view::PlayerView;
pub use roles::{Role, MIN_PLAYERS};
pub use state::{GameSession, JoinOutcome, Phase};
pub use win::Winner;
