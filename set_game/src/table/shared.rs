//! Table slots and token markers shared by the dealer and every player.
//!
//! Card placement and removal belong to the dealer alone. Players only read
//! slot contents (advisory, may be stale by the time they act) and toggle
//! their own tokens. Both kinds of mutation go through one mutex, so a card
//! and the tokens on its slot always disappear together.

use super::errors::{TableError, TableResult};
use crate::game::{
    entities::{Card, PlayerId, Slot},
    ui::TableUi,
};
use std::{
    collections::BTreeSet,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

#[derive(Debug)]
struct Slots {
    cards: Vec<Option<Card>>,
    tokens: Vec<BTreeSet<PlayerId>>,
}

/// Fixed-size table of card slots with per-slot token sets.
pub struct SharedTable {
    slots: Mutex<Slots>,
    /// Raised by the dealer while it deals or sweeps.
    reshuffling: AtomicBool,
    ui: Arc<dyn TableUi>,
}

impl std::fmt::Debug for SharedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTable")
            .field("slots", &*self.slots())
            .field("reshuffling", &self.is_reshuffling())
            .finish()
    }
}

impl SharedTable {
    pub fn new(size: usize, ui: Arc<dyn TableUi>) -> Self {
        Self {
            slots: Mutex::new(Slots {
                cards: vec![None; size],
                tokens: vec![BTreeSet::new(); size],
            }),
            reshuffling: AtomicBool::new(false),
            ui,
        }
    }

    // A panic while holding the lock leaves every slot in a consistent
    // state, so a poisoned lock is still safe to use.
    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of slots
    pub fn size(&self) -> usize {
        self.slots().cards.len()
    }

    /// Put `card` on an empty `slot`.
    pub fn place_card(&self, card: Card, slot: Slot) -> TableResult<()> {
        let mut slots = self.slots();
        let size = slots.cards.len();
        let entry = slots
            .cards
            .get_mut(slot)
            .ok_or(TableError::SlotOutOfRange { slot, size })?;
        if let Some(existing) = *entry {
            return Err(TableError::SlotOccupied { slot, existing });
        }
        *entry = Some(card);
        drop(slots);

        self.ui.place_card(card, slot);
        Ok(())
    }

    /// Clear `slot` together with every token on it.
    ///
    /// Returns the removed card (if any) and the players whose token was
    /// removed with it.
    pub fn remove_card(&self, slot: Slot) -> TableResult<(Option<Card>, BTreeSet<PlayerId>)> {
        let mut slots = self.slots();
        let size = slots.cards.len();
        if slot >= size {
            return Err(TableError::SlotOutOfRange { slot, size });
        }

        let card = slots.cards[slot].take();
        let holders = std::mem::take(&mut slots.tokens[slot]);
        drop(slots);

        if card.is_some() {
            for &player in &holders {
                self.ui.remove_token(player, slot);
            }
            self.ui.remove_card(slot);
        }
        Ok((card, holders))
    }

    /// Mark `slot` as selected by `player`.
    ///
    /// Refused when the slot holds no card, since a token may only exist on
    /// an occupied slot.
    pub fn place_token(&self, player: PlayerId, slot: Slot) -> bool {
        let mut slots = self.slots();
        if !matches!(slots.cards.get(slot), Some(Some(_))) {
            return false;
        }
        let placed = slots.tokens[slot].insert(player);
        drop(slots);

        if placed {
            self.ui.place_token(player, slot);
        }
        placed
    }

    /// Remove `player`'s token from `slot`, reporting whether one was there.
    pub fn remove_token(&self, player: PlayerId, slot: Slot) -> bool {
        let mut slots = self.slots();
        let removed = slots
            .tokens
            .get_mut(slot)
            .is_some_and(|holders| holders.remove(&player));
        drop(slots);

        if removed {
            self.ui.remove_token(player, slot);
        }
        removed
    }

    pub fn card_at(&self, slot: Slot) -> Option<Card> {
        self.slots().cards.get(slot).copied().flatten()
    }

    /// Number of occupied slots
    pub fn count_cards(&self) -> usize {
        self.slots().cards.iter().filter(|c| c.is_some()).count()
    }

    /// Total number of tokens across all slots
    pub fn count_tokens(&self) -> usize {
        self.slots().tokens.iter().map(BTreeSet::len).sum()
    }

    /// Slots on which `player` currently holds a token, ascending.
    pub fn tokens_of(&self, player: PlayerId) -> Vec<Slot> {
        self.slots()
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, holders)| holders.contains(&player))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Slot-by-slot copy of the cards on the table.
    pub fn snapshot(&self) -> Vec<Option<Card>> {
        self.slots().cards.clone()
    }

    pub fn empty_slots(&self) -> Vec<Slot> {
        self.slots()
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn set_reshuffling(&self, reshuffling: bool) {
        self.reshuffling.store(reshuffling, Ordering::SeqCst);
    }

    pub fn is_reshuffling(&self) -> bool {
        self.reshuffling.load(Ordering::SeqCst)
    }
}
