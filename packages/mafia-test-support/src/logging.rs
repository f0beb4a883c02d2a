//! One-shot tracing setup for test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber exactly once per process.
///
/// Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`. Safe to call
/// from every test; later calls are no-ops, and a subscriber installed by
/// someone else is left alone.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
