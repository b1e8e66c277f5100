//! Table module: the slot/token state shared by the dealer and players.
//!
//! This module implements:
//! - SharedTable: card slots plus per-slot token sets behind one lock
//! - GameConfig: startup configuration with validation
//! - TableError: invariant violations raised by dealer sequencing bugs

pub mod config;
pub mod errors;
pub mod shared;

pub use config::{ConfigError, GameConfig};
pub use errors::{TableError, TableResult};
pub use shared::SharedTable;
