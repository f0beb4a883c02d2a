pub mod sessions;

pub use sessions::{InMemorySessionStore, SessionStore, SharedStore, SqlSessionStore, StoreHealth};
