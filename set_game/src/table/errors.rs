//! Error types for table operations

use crate::game::entities::{Card, Slot};
use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table invariant violations.
///
/// These only arise from dealer sequencing bugs; players never see them.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum TableError {
    /// Slot already holds a card
    #[error("slot {slot} already holds card {existing}")]
    SlotOccupied { slot: Slot, existing: Card },

    /// Slot index outside the table
    #[error("slot {slot} out of range for table of size {size}")]
    SlotOutOfRange { slot: Slot, size: usize },
}
