//! Player actor message types.

use crate::game::entities::{PlayerId, Slot};
use serde::Serialize;

/// Claim ticket, unique per player and increasing.
pub type Ticket = u64;

/// Messages the dealer sends to a player.
///
/// The dealer never touches a player's fields; every change to a player's
/// state happens inside the player's own loop in response to one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Outcome of the claim identified by `ticket`
    Verdict { ticket: Ticket, accepted: bool },

    /// The claim identified by `ticket` was dropped without a verdict,
    /// either because another player's claim took some of its slots or
    /// because it no longer held a full selection when examined.
    Released { ticket: Ticket },

    /// The cards under these slots were removed; the player's tokens on
    /// them are gone.
    Revoked { slots: Vec<Slot> },

    /// Round boundary: table cleared, any pending claim discarded.
    Reset,
}

/// Player state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPhase {
    /// No tokens placed
    Idle,
    /// Some tokens placed, selection not full
    Selecting,
    /// Claim submitted, waiting for the dealer
    AwaitingVerdict,
    /// Serving a point or penalty freeze
    Frozen,
    Terminated,
}

impl PlayerPhase {
    /// Whether key presses are accepted in this phase
    pub fn accepts_input(self) -> bool {
        matches!(self, PlayerPhase::Idle | PlayerPhase::Selecting)
    }
}

impl std::fmt::Display for PlayerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerPhase::Idle => write!(f, "idle"),
            PlayerPhase::Selecting => write!(f, "selecting"),
            PlayerPhase::AwaitingVerdict => write!(f, "awaiting verdict"),
            PlayerPhase::Frozen => write!(f, "frozen"),
            PlayerPhase::Terminated => write!(f, "terminated"),
        }
    }
}

/// Point-in-time view of a player, published by its actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub phase: PlayerPhase,
    pub score: u32,
    pub selection: Vec<Slot>,
}

impl PlayerSnapshot {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            phase: PlayerPhase::Idle,
            score: 0,
            selection: Vec::new(),
        }
    }
}
