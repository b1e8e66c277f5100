//! Game core: cards, combination rules, display sink and the session that
//! runs one game.

pub mod context;
pub mod entities;
pub mod errors;
pub mod oracle;
pub mod session;
pub mod ui;

pub use context::GameContext;
pub use entities::{Card, Deck, PlayerId, Slot};
pub use errors::{GameError, GameResult};
pub use oracle::{CombinationOracle, SetRules};
pub use session::GameSession;
pub use ui::{NullUi, TableUi};
