//! Game session: wires the table, the players and the dealer together and
//! owns their tasks.

use super::{
    context::GameContext,
    entities::{Deck, PlayerId},
    errors::{GameError, GameResult},
    oracle::CombinationOracle,
    ui::TableUi,
};
use crate::{
    dealer::Dealer,
    player::{PlayerActor, PlayerInput},
    shutdown::Termination,
    table::{GameConfig, SharedTable},
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A running game.
///
/// Dropping the session does not stop the game; raise
/// [`termination`](Self::termination) and [`wait`](Self::wait) for it.
pub struct GameSession {
    ctx: GameContext,
    inputs: Vec<PlayerInput>,
    dealer: JoinHandle<GameResult<Vec<PlayerId>>>,
}

impl GameSession {
    /// Validate `config`, spawn one actor per player and start dealing.
    pub fn start(
        config: GameConfig,
        oracle: Arc<dyn CombinationOracle>,
        ui: Arc<dyn TableUi>,
    ) -> GameResult<Self> {
        Self::start_with_deck(config, oracle, ui, None)
    }

    /// Like [`start`](Self::start) with a fixed deck instead of a full one.
    pub fn start_with_deck(
        config: GameConfig,
        oracle: Arc<dyn CombinationOracle>,
        ui: Arc<dyn TableUi>,
        deck: Option<Deck>,
    ) -> GameResult<Self> {
        config.validate()?;
        if oracle.combination_size() != config.feature_size {
            return Err(GameError::OracleMismatch {
                oracle: oracle.combination_size(),
                configured: config.feature_size,
            });
        }

        let ctx = GameContext::new(config, ui);
        let mut handles = Vec::with_capacity(ctx.config.players);
        let mut inputs = Vec::with_capacity(ctx.config.players);
        for id in 0..ctx.config.players {
            let (actor, mut handle) = PlayerActor::new(id, ctx.clone());
            handle.attach(tokio::spawn(actor.run()));
            inputs.push(handle.input().clone());
            handles.push(handle);
        }

        let mut dealer = Dealer::new(ctx.clone(), oracle, handles);
        if let Some(deck) = deck {
            dealer = dealer.with_deck(deck);
        }
        let dealer = tokio::spawn(dealer.run());

        Ok(Self {
            ctx,
            inputs,
            dealer,
        })
    }

    /// Key input of `player`, if such a player exists
    pub fn input(&self, player: PlayerId) -> Option<&PlayerInput> {
        self.inputs.get(player)
    }

    pub fn inputs(&self) -> &[PlayerInput] {
        &self.inputs
    }

    pub fn termination(&self) -> Termination {
        self.ctx.termination.clone()
    }

    pub fn table(&self) -> Arc<SharedTable> {
        self.ctx.table.clone()
    }

    pub fn config(&self) -> &GameConfig {
        &self.ctx.config
    }

    /// Wait for the dealer to finish and return the winners.
    pub async fn wait(self) -> GameResult<Vec<PlayerId>> {
        match self.dealer.await {
            Ok(result) => result,
            Err(e) => {
                // Players must not outlive a crashed dealer.
                self.ctx.termination.set();
                Err(GameError::Join(e))
            }
        }
    }
}
