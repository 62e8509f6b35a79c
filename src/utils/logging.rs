//! Logging setup for binaries and tests
//!
//! The library itself only emits `tracing` events; subscribers are the
//! caller's choice. These helpers install a sensible default.

use tracing_subscriber::EnvFilter;

/// Initialize logging from `RUST_LOG`, defaulting to `info` for this crate
pub fn init() {
    init_with_filter("awspricing_rs=info");
}

/// Initialize logging with an explicit filter directive
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_with_filter(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
