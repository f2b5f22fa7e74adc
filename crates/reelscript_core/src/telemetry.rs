//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a human-readable `tracing` subscriber.
///
/// Honours `RUST_LOG`; defaults to `info` when it is unset. Library code only
/// emits events, so applications embedding the generator may install their
/// own subscriber instead.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
