//! Dealer module: the single authority over cards, claims and rounds.
//!
//! - Dealer: deals, validates claims in FIFO order, runs the countdown
//! - ClaimQueue: multi-producer claim FIFO the dealer drains

pub mod actor;
pub mod claims;

pub use actor::{ClaimOutcome, Dealer, winners};
pub use claims::{Claim, ClaimQueue};
