//! Process-wide tracing/logging setup.

pub mod tracing;

/// Initialize observability for the process (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops, so tests and
/// the server binary can both call it unconditionally.
pub fn init() {
    tracing::init();
}
