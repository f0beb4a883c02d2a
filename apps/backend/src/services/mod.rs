pub mod session_locks;
pub mod sessions;

pub use sessions::{SeedPolicy, SessionService};
