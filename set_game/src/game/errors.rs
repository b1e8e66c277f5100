//! Error types for running a game

use crate::table::{ConfigError, TableError};
use thiserror::Error;

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Game errors
#[derive(Debug, Error)]
pub enum GameError {
    /// Table invariant violated by the dealer
    #[error("Table invariant violated: {0}")]
    Table(#[from] TableError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Oracle does not match the configured selection size
    #[error("Combination size {oracle} does not match feature size {configured}")]
    OracleMismatch { oracle: usize, configured: usize },

    /// Dealer task panicked or was cancelled
    #[error("Dealer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
