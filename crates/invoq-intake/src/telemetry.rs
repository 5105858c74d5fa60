//! # Telemetry Setup
//!
//! Tracing initialization for the intake process.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, defaulting to `info`. Call once at process
/// startup; a second call is ignored (useful when tests race to install a
/// subscriber).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
