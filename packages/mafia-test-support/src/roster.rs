//! Player rosters used across test suites.

/// Host of every fixture roster.
pub const HOST: &str = "A";

/// The four-player table used by the end-to-end scenarios: A hosts, and the
/// fixtures deal A=mafia, B=doctor, C=detective, D=villager.
pub const TABLE_OF_FOUR: [&str; 4] = ["A", "B", "C", "D"];

/// `n` distinct names: `p1`, `p2`, ...
pub fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("p{i}")).collect()
}

/// Owned copy of an arbitrary list of names.
pub fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}
