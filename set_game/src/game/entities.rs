use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier, assigned densely from zero.
pub type PlayerId = usize;

/// Index of a fixed table position.
pub type Slot = usize;

/// Opaque card identifier in `[0, deck_size)`.
///
/// The only structure the coordination core relies on is equality; the
/// feature encoding is interpreted by the combination oracle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub u32);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02}", self.0)
    }
}

impl From<u32> for Card {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Cards not currently on the table.
///
/// Only the dealer owns a deck. Cards are dealt from the front and
/// returned to the back, and the whole deck is reshuffled at every round
/// boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full deck of `size` cards in id order.
    pub fn new(size: usize) -> Self {
        Self {
            cards: (0..size as u32).map(Card).collect(),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Take the next card, if any remain.
    pub fn deal_card(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn return_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
