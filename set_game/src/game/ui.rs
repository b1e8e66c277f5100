//! Display sink notified by the dealer and players.
//!
//! Every call is a fire-and-forget notification; nothing in the game ever
//! reads state back from the sink.

use super::entities::{Card, PlayerId, Slot};
use std::time::Duration;

/// Rendering target for table, score, freeze and countdown updates.
pub trait TableUi: Send + Sync {
    fn set_score(&self, player: PlayerId, score: u32);

    /// Remaining freeze for `player`; zero clears the freeze display.
    fn set_freeze(&self, player: PlayerId, remaining: Duration);

    fn set_countdown(&self, remaining: Duration, warning: bool);

    /// Clear every token marker from the display.
    fn remove_tokens(&self);

    /// Current table contents, for showing the combinations on it.
    fn show_hints(&self, table: &[Option<Card>]);

    fn announce_winner(&self, winners: &[PlayerId]);

    fn place_card(&self, _card: Card, _slot: Slot) {}

    fn remove_card(&self, _slot: Slot) {}

    fn place_token(&self, _player: PlayerId, _slot: Slot) {}

    fn remove_token(&self, _player: PlayerId, _slot: Slot) {}
}

/// Sink that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullUi;

impl TableUi for NullUi {
    fn set_score(&self, _player: PlayerId, _score: u32) {}

    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}

    fn set_countdown(&self, _remaining: Duration, _warning: bool) {}

    fn remove_tokens(&self) {}

    fn show_hints(&self, _table: &[Option<Card>]) {}

    fn announce_winner(&self, _winners: &[PlayerId]) {}
}
