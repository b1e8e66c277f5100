//! Handles shared by the dealer and every player of one game.

use super::ui::TableUi;
use crate::{
    dealer::claims::ClaimQueue,
    shutdown::Termination,
    table::{GameConfig, SharedTable},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct GameContext {
    pub config: Arc<GameConfig>,
    pub table: Arc<SharedTable>,
    pub claims: Arc<ClaimQueue>,
    pub ui: Arc<dyn TableUi>,
    pub termination: Termination,
}

impl GameContext {
    /// Fresh table, claim queue and termination flag for `config`.
    pub fn new(config: GameConfig, ui: Arc<dyn TableUi>) -> Self {
        let table = Arc::new(SharedTable::new(config.table_size, ui.clone()));
        // Each player has at most one claim in flight.
        let claims = Arc::new(ClaimQueue::new(config.players.max(1)));
        Self {
            config: Arc::new(config),
            table,
            claims,
            ui,
            termination: Termination::new(),
        }
    }
}

impl std::fmt::Debug for GameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameContext")
            .field("config", &self.config)
            .field("pending_claims", &self.claims.len())
            .field("terminated", &self.termination.is_set())
            .finish()
    }
}
