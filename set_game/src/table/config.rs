//! Game configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (default: 2)
    pub players: usize,

    /// How many of the players are driven by external input only.
    /// The remaining players each get a bot.
    pub human_players: usize,

    /// Number of slots on the table (default: 12)
    pub table_size: usize,

    /// Selection size required for a claim (default: 3)
    pub feature_size: usize,

    /// Features per card (default: 4)
    pub feature_count: usize,

    /// Number of cards in the deck (default: 81)
    pub deck_size: usize,

    /// Round length before the table is swept
    pub turn_timeout: Duration,

    /// Remaining round time under which the countdown shows a warning
    pub turn_timeout_warning: Duration,

    /// Freeze after a valid claim
    pub point_freeze: Duration,

    /// Freeze after an invalid claim
    pub penalty_freeze: Duration,

    /// Pause after terminating players, letting display updates settle
    pub end_game_pause: Duration,

    /// Whether to show hints after every refill
    pub hints: bool,

    /// Pause between two bot key presses
    pub bot_think_time: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 2,
            human_players: 0,
            table_size: 12,
            feature_size: 3,
            feature_count: 4,
            deck_size: 81,
            turn_timeout: Duration::from_secs(60),
            turn_timeout_warning: Duration::from_secs(5),
            point_freeze: Duration::from_secs(1),
            penalty_freeze: Duration::from_secs(3),
            end_game_pause: Duration::from_secs(3),
            hints: false,
            bot_think_time: Duration::from_millis(20),
        }
    }
}

impl GameConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::Invalid {
                field: "players",
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.human_players > self.players {
            return Err(ConfigError::Invalid {
                field: "human_players",
                reason: format!("Cannot exceed players ({})", self.players),
            });
        }

        if self.feature_size < 2 {
            return Err(ConfigError::Invalid {
                field: "feature_size",
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.table_size < self.feature_size {
            return Err(ConfigError::Invalid {
                field: "table_size",
                reason: format!(
                    "Must hold at least one selection ({} slots)",
                    self.feature_size
                ),
            });
        }

        let max_deck = u32::try_from(self.feature_count)
            .ok()
            .and_then(|count| self.feature_size.checked_pow(count))
            .ok_or_else(|| ConfigError::Invalid {
                field: "feature_count",
                reason: format!(
                    "{}^{} cards do not fit in memory",
                    self.feature_size, self.feature_count
                ),
            })?;
        if self.deck_size == 0 || self.deck_size > max_deck {
            return Err(ConfigError::Invalid {
                field: "deck_size",
                reason: format!(
                    "Must be between 1 and {} ({}^{})",
                    max_deck, self.feature_size, self.feature_count
                ),
            });
        }

        if self.turn_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "turn_timeout",
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.turn_timeout_warning > self.turn_timeout {
            return Err(ConfigError::Invalid {
                field: "turn_timeout_warning",
                reason: "Cannot exceed turn_timeout".to_string(),
            });
        }

        Ok(())
    }

    /// Whether `player` gets a bot feeding it key presses
    pub fn is_bot(&self, player: usize) -> bool {
        player >= self.human_players
    }
}
