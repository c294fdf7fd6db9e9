//! Diagnostic logging.
//!
//! Status lines for users go through [`crate::output::Printer`]. Internal
//! events (resolver passes, ledger decisions, filter exclusions) go through
//! `tracing` to stderr, configurable via the RUST_LOG environment variable.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
