//! Display sink that renders table events as log lines and metrics.

use crate::{logging::log_game_event, metrics};
use set_game::{Card, CombinationOracle, PlayerId, SetRules, Slot, TableUi};
use std::{
    collections::HashSet,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// Upper bound on hint lines per refill
const MAX_HINTS: usize = 16;

pub struct LogUi {
    rules: SetRules,
    frozen: Mutex<HashSet<PlayerId>>,
    /// Last whole second of the countdown that was logged
    last_second: AtomicU64,
}

impl LogUi {
    pub fn new(rules: SetRules) -> Self {
        Self {
            rules,
            frozen: Mutex::new(HashSet::new()),
            last_second: AtomicU64::new(u64::MAX),
        }
    }

    /// Valid combinations on `table`, each as the slots holding it.
    pub fn hints(&self, table: &[Option<Card>]) -> Vec<Vec<Slot>> {
        let placed: Vec<(Slot, Card)> = table
            .iter()
            .enumerate()
            .filter_map(|(slot, card)| card.map(|c| (slot, c)))
            .collect();
        let cards: Vec<Card> = placed.iter().map(|&(_, card)| card).collect();

        self.rules
            .find_combinations(&cards, MAX_HINTS)
            .into_iter()
            .map(|combination| {
                combination
                    .iter()
                    .filter_map(|card| placed.iter().find(|(_, c)| c == card).map(|&(s, _)| s))
                    .collect()
            })
            .collect()
    }
}

impl TableUi for LogUi {
    fn set_score(&self, player: PlayerId, score: u32) {
        log_game_event("point", Some(player), &format!("score {score}"));
        metrics::point_awarded(player, score);
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        let mut frozen = self.frozen.lock().unwrap_or_else(PoisonError::into_inner);
        if remaining.is_zero() {
            if frozen.remove(&player) {
                tracing::debug!(player, "unfrozen");
            }
        } else if frozen.insert(player) {
            tracing::debug!(player, secs = remaining.as_secs(), "frozen");
            metrics::freeze_started(player);
        }
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        metrics::countdown_seconds(remaining.as_secs_f64());

        let second = remaining.as_secs();
        if self.last_second.swap(second, Ordering::Relaxed) != second && (warning || second % 10 == 0)
        {
            tracing::debug!(seconds = second, warning, "countdown");
        }
    }

    fn remove_tokens(&self) {
        tracing::debug!("tokens cleared");
        metrics::round_finished();
    }

    fn show_hints(&self, table: &[Option<Card>]) {
        for slots in self.hints(table) {
            tracing::info!(?slots, "hint");
        }
    }

    fn announce_winner(&self, winners: &[PlayerId]) {
        log_game_event("winners", None, &format!("{winners:?}"));
    }

    fn place_card(&self, card: Card, slot: Slot) {
        tracing::trace!(%card, slot, "card placed");
    }

    fn remove_card(&self, slot: Slot) {
        tracing::trace!(slot, "card removed");
    }

    fn place_token(&self, player: PlayerId, slot: Slot) {
        tracing::trace!(player, slot, "token placed");
    }

    fn remove_token(&self, player: PlayerId, slot: Slot) {
        tracing::trace!(player, slot, "token removed");
    }
}
