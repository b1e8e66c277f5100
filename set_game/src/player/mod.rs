//! Player module: one actor per player plus an optional bot.
//!
//! This module implements:
//! - PlayerActor: consumes key presses, keeps the selection, submits claims
//! - PlayerHandle: dealer-side handle for notices and termination
//! - PlayerInput: the only way key presses enter a player
//! - Bot: random key presses for automated players
//!
//! ## Phases
//!
//! ```text
//! Idle -> Selecting -> AwaitingVerdict -> Frozen -> Idle
//!                          |                 ^
//!                          +--- Released ----+--> Idle/Selecting (no freeze)
//! ```
//!
//! Every phase change happens inside the actor's own loop. The dealer only
//! talks to a player through [`Notice`] messages.

pub mod actor;
pub mod bot;
pub mod messages;
pub mod selection;

pub use actor::{PlayerActor, PlayerHandle, PlayerInput};
pub use bot::Bot;
pub use messages::{Notice, PlayerPhase, PlayerSnapshot, Ticket};
pub use selection::Selection;
