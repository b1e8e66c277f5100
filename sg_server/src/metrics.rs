//! Prometheus metrics for watching a running game.
//!
//! Metrics are exposed in Prometheus text format for scraping by monitoring systems.
//! Without an installed exporter every call below is a no-op.
//!
//! # Metrics
//!
//! - **Scores**: points awarded, current score per player
//! - **Freezes**: freezes started
//! - **Rounds**: sweeps of the table
//! - **Countdown**: seconds left in the round

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Record a point for `player` and its new score.
pub fn point_awarded(player: usize, score: u32) {
    metrics::counter!("points_awarded_total").increment(1);
    metrics::gauge!("player_score", "player" => player.to_string()).set(f64::from(score));
}

/// Increment freezes started counter.
pub fn freeze_started(player: usize) {
    metrics::counter!("freezes_started_total", "player" => player.to_string()).increment(1);
}

/// Increment rounds counter.
pub fn round_finished() {
    metrics::counter!("rounds_total").increment(1);
}

/// Set the seconds left in the current round.
pub fn countdown_seconds(remaining: f64) {
    metrics::gauge!("countdown_seconds").set(remaining);
}
