//! Automated input for players without a human behind them.
//!
//! A bot knows nothing about the cards; it presses uniformly random slots
//! with a short pause between presses, going through the same input guard
//! as a human would.

use super::actor::PlayerInput;
use crate::shutdown::Termination;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

pub struct Bot {
    input: PlayerInput,
    table_size: usize,
    think_time: Duration,
    termination: Termination,
    rng: StdRng,
}

impl Bot {
    pub fn new(
        input: PlayerInput,
        table_size: usize,
        think_time: Duration,
        termination: Termination,
    ) -> Self {
        Self {
            input,
            table_size,
            think_time,
            termination,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded bot, for reproducible press sequences
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn next_slot(&mut self) -> usize {
        self.rng.random_range(0..self.table_size)
    }

    /// Press random slots until termination
    pub async fn run(mut self) {
        log::debug!("Bot for player {} starting", self.input.id());

        while !self.termination.is_set() {
            let slot = self.next_slot();

            tokio::select! {
                biased;

                _ = self.termination.wait() => break,

                _ = async {
                    self.input.press(slot).await;
                    tokio::time::sleep(self.think_time).await;
                } => {}
            }
        }

        log::debug!("Bot for player {} terminated", self.input.id());
    }
}
