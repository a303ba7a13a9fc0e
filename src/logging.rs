//! Log output for binaries and tests that want to see fit diagnostics.
//!
//! The library only emits `tracing` events; nothing is printed until a
//! subscriber is installed.

/// Install a formatted stdout subscriber.
///
/// Returns `false` when a global subscriber was already set, in which case
/// the existing one stays in place.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .try_init()
        .is_ok()
}
