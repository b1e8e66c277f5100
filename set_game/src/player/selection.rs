//! Bounded, duplicate-free list of slots a player has tokened.

use crate::game::entities::Slot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    slots: Vec<Slot>,
    capacity: usize,
}

impl Selection {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `slot`; refused when full or already present.
    pub fn push(&mut self, slot: Slot) -> bool {
        if self.is_full() || self.contains(slot) {
            return false;
        }
        self.slots.push(slot);
        true
    }

    pub fn remove(&mut self, slot: Slot) -> bool {
        match self.slots.iter().position(|&s| s == slot) {
            Some(idx) => {
                self.slots.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    /// Empty the selection, returning what it held.
    pub fn take(&mut self) -> Vec<Slot> {
        std::mem::take(&mut self.slots)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
