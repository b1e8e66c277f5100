//! Runner configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use pico_args::Arguments;
use set_game::{GameConfig, SetRules};
use std::{net::SocketAddr, time::Duration};

/// Values given on the command line; each one wins over its environment variable.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub players: Option<usize>,
    pub turn_timeout_secs: Option<u64>,
    pub hints: bool,
    pub metrics_bind: Option<SocketAddr>,
}

impl Overrides {
    /// Read the option flags, rejecting anything left over.
    pub fn from_args(mut pargs: Arguments) -> Result<Self, ConfigError> {
        let overrides = Self {
            players: pargs.opt_value_from_str("--players")?,
            turn_timeout_secs: pargs.opt_value_from_str("--timeout")?,
            hints: pargs.contains("--hints"),
            metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            return Err(ConfigError::UnknownArgs(
                rest.iter().map(|arg| arg.to_string_lossy().into_owned()).collect(),
            ));
        }
        Ok(overrides)
    }
}

/// Complete runner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Game rules and timings
    pub game: GameConfig,
    /// Prometheus scrape address, metrics are off when unset
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from CLI args
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but unusable
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let defaults = GameConfig::default();

        let feature_size = parse_env_or("FEATURE_SIZE", defaults.feature_size);
        let feature_count = parse_env_or("FEATURE_COUNT", defaults.feature_count);
        let full_deck = SetRules::new(feature_size, feature_count)
            .deck_size()
            .ok_or_else(|| ConfigError::Invalid {
                var: "FEATURE_COUNT".to_string(),
                reason: format!("{feature_size}^{feature_count} cards overflow"),
            })?;

        let turn_timeout = overrides
            .turn_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| secs_env_or("TURN_TIMEOUT_SECS", defaults.turn_timeout));

        let game = GameConfig {
            players: overrides
                .players
                .unwrap_or_else(|| parse_env_or("PLAYERS", defaults.players)),
            // Nobody types into a headless runner.
            human_players: 0,
            table_size: parse_env_or("TABLE_SIZE", defaults.table_size),
            feature_size,
            feature_count,
            deck_size: parse_env_or("DECK_SIZE", full_deck),
            turn_timeout,
            turn_timeout_warning: secs_env_or(
                "TURN_TIMEOUT_WARNING_SECS",
                defaults.turn_timeout_warning,
            ),
            point_freeze: secs_env_or("POINT_FREEZE_SECS", defaults.point_freeze),
            penalty_freeze: secs_env_or("PENALTY_FREEZE_SECS", defaults.penalty_freeze),
            end_game_pause: secs_env_or("END_GAME_PAUSE_SECS", defaults.end_game_pause),
            hints: overrides.hints || parse_env_or("HINTS", defaults.hints),
            bot_think_time: Duration::from_millis(parse_env_or(
                "BOT_THINK_TIME_MS",
                defaults.bot_think_time.as_millis() as u64,
            )),
        };

        let metrics_bind = match overrides.metrics_bind {
            Some(addr) => Some(addr),
            None => match std::env::var("METRICS_BIND") {
                Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "METRICS_BIND".to_string(),
                    reason: format!("'{raw}' is not an IP:PORT address"),
                })?),
                Err(_) => None,
            },
        };

        Ok(ServerConfig { game, metrics_bind })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.players == 0 {
            return Err(ConfigError::Invalid {
                var: "PLAYERS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        self.game.validate()?;
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error(transparent)]
    Game(#[from] set_game::ConfigError),

    #[error("Bad argument: {0}")]
    Args(#[from] pico_args::Error),

    #[error("Unknown arguments: {0:?}")]
    UnknownArgs(Vec<String>),
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Whole-second duration from the environment
fn secs_env_or(key: &str, default: Duration) -> Duration {
    Duration::from_secs(parse_env_or(key, default.as_secs()))
}
