//! Claim queue: many players push, only the dealer pops.
//!
//! A plain FIFO behind a mutex plus a `Notify` for the single consumer.
//! Unlike a channel it supports pulling a given player's pending claims out
//! of the middle of the queue, which the dealer needs when another player's
//! claim takes their slots.

use crate::game::entities::PlayerId;
use crate::player::messages::Ticket;
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tokio::sync::Notify;

/// A player's request to have its full selection validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub player: PlayerId,
    pub ticket: Ticket,
}

/// Bounded FIFO of claims
#[derive(Debug)]
pub struct ClaimQueue {
    queue: Mutex<VecDeque<Claim>>,
    capacity: usize,
    available: Notify,
}

impl ClaimQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            available: Notify::new(),
        }
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Claim>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue `claim`; refused when the queue is full.
    pub fn push(&self, claim: Claim) -> bool {
        let mut queue = self.queue();
        if queue.len() >= self.capacity {
            return false;
        }
        queue.push_back(claim);
        drop(queue);

        self.available.notify_one();
        true
    }

    pub fn try_pop(&self) -> Option<Claim> {
        self.queue().pop_front()
    }

    /// Wait for the next claim.
    ///
    /// Cancel safe: a claim is only taken out of the queue by the call that
    /// returns it.
    pub async fn pop(&self) -> Claim {
        loop {
            if let Some(claim) = self.try_pop() {
                return claim;
            }
            self.available.notified().await;
        }
    }

    /// Remove every pending claim of `player`, returning them.
    pub fn remove_player(&self, player: PlayerId) -> Vec<Claim> {
        let mut queue = self.queue();
        let mut removed = Vec::new();
        queue.retain(|claim| {
            if claim.player == player {
                removed.push(*claim);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drop every pending claim, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut queue = self.queue();
        let dropped = queue.len();
        queue.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
