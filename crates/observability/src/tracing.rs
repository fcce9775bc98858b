//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging with an env-configurable filter.
///
/// Defaults to `info`; override via `RUST_LOG`. Authorization failure detail
/// lands in the logs and nowhere else; the HTTP surface stays opaque.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
