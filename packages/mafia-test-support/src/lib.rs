//! Shared helpers for the backend's unit and integration tests.
//!
//! Kept in its own crate so integration test binaries (which cannot see the
//! backend's `#[cfg(test)]` modules) use the same logging setup and rosters.

pub mod logging;
pub mod roster;
