//! # Set Game
//!
//! A concurrent table for the card game Set: one dealer task and one task
//! per player share a table of card slots.
//!
//! Players place tokens on cards; once a player holds a full selection it
//! files a claim. The dealer validates claims one at a time against the
//! table as it stands, awards points, refills the table and reshuffles
//! when the round clock runs out. Players are frozen for a while after
//! every verdict.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, combination rules, display sink, [`GameSession`]
//! - [`table`]: shared slot grid and configuration
//! - [`dealer`]: the dealer actor and its claim queue
//! - [`player`]: player actors, their input and bots
//! - [`shutdown`]: game-wide termination flag
//!
//! ## Example
//!
//! ```no_run
//! use set_game::{GameConfig, GameSession, NullUi, SetRules};
//! use std::sync::Arc;
//!
//! # async fn demo() -> set_game::GameResult<()> {
//! let session = GameSession::start(
//!     GameConfig::default(),
//!     Arc::new(SetRules::default()),
//!     Arc::new(NullUi),
//! )?;
//! let winners = session.wait().await?;
//! println!("winners: {winners:?}");
//! # Ok(())
//! # }
//! ```

pub mod dealer;
pub mod game;
pub mod player;
pub mod shutdown;
pub mod table;

pub use game::{
    Card, CombinationOracle, Deck, GameError, GameResult, GameSession, NullUi, PlayerId,
    SetRules, Slot, TableUi,
};
pub use shutdown::Termination;
pub use table::{ConfigError, GameConfig, SharedTable};
