//! Structured logging configuration.
//!
//! The game library logs through the `log` facade; those records are
//! forwarded into the same subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Levels are configurable via the `RUST_LOG` env var, `info` by default.
///
/// # Example
///
/// ```no_run
/// logging::init();
/// tracing::info!("Runner starting");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a game event with structured data
///
/// # Arguments
///
/// * `event_type` - Type of game event
/// * `player` - Player involved, if any
/// * `message` - Event message
pub fn log_game_event(event_type: &str, player: Option<usize>, message: &str) {
    tracing::info!(event_type = event_type, player = player, "GAME: {}", message);
}
