//! Logging setup

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "natura=info";

/// Install a fmt subscriber filtered by `RUST_LOG` (default `natura=info`).
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
