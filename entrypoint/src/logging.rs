//! Stderr tracing for the entrypoint.
//!
//! Operational output (seeding progress, child lifecycle) goes through
//! `tracing` so the orchestrator's log collector captures it alongside the
//! child's own output. Verbosity is controlled via `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `info` so first-boot seeding is visible
/// in container logs. Output: stderr, compact format.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
