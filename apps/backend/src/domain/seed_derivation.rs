//! RNG seed derivation for deterministic role deals.
//!
//! A session draws one base seed when it is created. Each start derives its
//! own seed from that base and the number of games already started, so a
//! reset deals fresh roles while replays of the same session stay exact.

/// Derive the role-shuffle seed for the `games_started`-th game of a session.
pub fn derive_role_seed(session_seed: u64, games_started: u32) -> u64 {
    // SplitMix64 finalizer over the combined input; adjacent game numbers
    // land far apart.
    let mut z = session_seed.wrapping_add((games_started as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
