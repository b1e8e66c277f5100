//! Dealer actor: deals, validates claims one at a time, runs the round
//! clock and tears the game down.

use super::claims::Claim;
use crate::{
    game::{
        context::GameContext,
        entities::{Card, Deck, PlayerId, Slot},
        errors::GameResult,
        oracle::CombinationOracle,
    },
    player::{Notice, PlayerHandle},
};
use rand::seq::SliceRandom;
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tokio::time::Instant;

/// Longest the dealer waits for a claim before refreshing the countdown
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Countdown refresh rate once the round is in its warning window
const WARNING_REFRESH: Duration = Duration::from_millis(10);

/// How a claim was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Valid combination; its cards left the table
    Accepted,
    /// Full selection that is not a valid combination
    Rejected,
    /// Selection changed underneath the claim, or unknown player
    Stale,
}

/// Players holding the highest score, ascending by id.
pub fn winners(scores: &[(PlayerId, u32)]) -> Vec<PlayerId> {
    let Some(max) = scores.iter().map(|&(_, score)| score).max() else {
        return Vec::new();
    };
    let mut winners: Vec<PlayerId> = scores
        .iter()
        .filter(|&&(_, score)| score == max)
        .map(|&(id, _)| id)
        .collect();
    winners.sort_unstable();
    winners
}

/// Dealer actor, the only writer of table cards and the deck
pub struct Dealer {
    ctx: GameContext,
    oracle: Arc<dyn CombinationOracle>,
    players: Vec<PlayerHandle>,
    deck: Deck,
    /// Points awarded per player, by accepted verdicts
    ledger: Vec<u32>,
    /// End of the current round
    deadline: Instant,
    slot_order: Vec<Slot>,
}

impl Dealer {
    /// Create a new dealer
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared game handles
    /// * `oracle` - Combination rules
    /// * `players` - Handles of every player, indexed by player ID
    pub fn new(
        ctx: GameContext,
        oracle: Arc<dyn CombinationOracle>,
        players: Vec<PlayerHandle>,
    ) -> Self {
        let deck = Deck::new(ctx.config.deck_size);
        let slot_order = (0..ctx.config.table_size).collect();
        let ledger = vec![0; players.len()];
        Self {
            deadline: Instant::now() + ctx.config.turn_timeout,
            ctx,
            oracle,
            players,
            deck,
            ledger,
            slot_order,
        }
    }

    /// Replace the deck, e.g. with a fixed card order
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn players(&self) -> &[PlayerHandle] {
        &self.players
    }

    /// Run the game until a terminal condition, then announce the winners
    /// and terminate every player.
    pub async fn run(mut self) -> GameResult<Vec<PlayerId>> {
        log::info!(
            "Dealer starting: {} players, {} cards, {} slots",
            self.players.len(),
            self.deck.len(),
            self.ctx.config.table_size
        );

        let played = self.play().await;
        if let Err(e) = &played {
            log::error!("Game aborted: {}", e);
        }

        let winners = self.announce_winners();
        self.terminate().await;
        log::info!("Dealer terminated");

        played.map(|()| winners)
    }

    async fn play(&mut self) -> GameResult<()> {
        self.deck.shuffle();
        while !self.should_finish() {
            self.place_cards_on_table()?;
            self.reset_countdown();
            self.timer_loop().await?;
            self.reset_countdown();
            self.sweep()?;
        }
        Ok(())
    }

    /// One round: service claims until the countdown runs out.
    async fn timer_loop(&mut self) -> GameResult<()> {
        if !self.any_combination_left() {
            log::info!("No combination left in play, ending game");
            self.ctx.termination.set();
            return Ok(());
        }

        while !self.ctx.termination.is_set() && Instant::now() < self.deadline {
            let claim = self.next_claim().await;
            self.update_countdown();

            let outcome = match claim {
                Some(claim) => Some(self.resolve_claim(claim)?),
                None => None,
            };
            self.place_cards_on_table()?;

            if outcome == Some(ClaimOutcome::Accepted) && !self.any_combination_left() {
                log::info!("Last combination claimed, ending round");
                break;
            }
        }
        Ok(())
    }

    /// Wait for the next claim, the next countdown refresh, or termination.
    async fn next_claim(&self) -> Option<Claim> {
        let now = Instant::now();
        let remaining = self.deadline.saturating_duration_since(now);
        let step = if remaining < self.ctx.config.turn_timeout_warning {
            WARNING_REFRESH
        } else {
            POLL_INTERVAL
        };
        let wake_at = (now + step).min(self.deadline);

        tokio::select! {
            biased;

            _ = self.ctx.termination.wait() => None,

            claim = self.ctx.claims.pop() => Some(claim),

            _ = tokio::time::sleep_until(wake_at) => None,
        }
    }

    /// Validate `claim` against the table as it is now.
    ///
    /// The claimant's selection is re-derived from its tokens on the table,
    /// so slots taken by an earlier claim no longer count.
    pub fn resolve_claim(&mut self, claim: Claim) -> GameResult<ClaimOutcome> {
        let Claim { player, ticket } = claim;
        if player >= self.players.len() {
            log::warn!("Claim from unknown player {}", player);
            return Ok(ClaimOutcome::Stale);
        }

        let table = &self.ctx.table;
        let slots = table.tokens_of(player);
        let cards: Vec<Card> = slots.iter().filter_map(|&s| table.card_at(s)).collect();
        if slots.len() != self.ctx.config.feature_size || cards.len() != slots.len() {
            log::debug!(
                "Claim {} of player {} is stale ({} slots held)",
                ticket,
                player,
                slots.len()
            );
            self.players[player].notify(Notice::Released { ticket });
            return Ok(ClaimOutcome::Stale);
        }

        if !self.oracle.test_combination(&cards) {
            log::debug!("Player {} claimed {:?}: rejected", player, cards);
            self.players[player].notify(Notice::Verdict {
                ticket,
                accepted: false,
            });
            return Ok(ClaimOutcome::Rejected);
        }

        log::debug!("Player {} claimed {:?}: accepted", player, cards);
        let mut revoked: BTreeMap<PlayerId, Vec<Slot>> = BTreeMap::new();
        for &slot in &slots {
            let (_, holders) = self.ctx.table.remove_card(slot)?;
            for holder in holders.into_iter().filter(|&h| h != player) {
                revoked.entry(holder).or_default().push(slot);
            }
        }

        for (other, slots) in revoked {
            let Some(handle) = self.players.get(other) else {
                continue;
            };
            handle.notify(Notice::Revoked { slots });
            for pending in self.ctx.claims.remove_player(other) {
                handle.notify(Notice::Released {
                    ticket: pending.ticket,
                });
            }
        }

        self.ledger[player] += 1;
        self.players[player].notify(Notice::Verdict {
            ticket,
            accepted: true,
        });
        self.reset_countdown();
        Ok(ClaimOutcome::Accepted)
    }

    /// Fill empty slots from the deck in random slot order.
    ///
    /// Returns whether any card was placed.
    pub fn place_cards_on_table(&mut self) -> GameResult<bool> {
        self.ctx.table.set_reshuffling(true);
        self.slot_order.shuffle(&mut rand::rng());

        let mut placed = false;
        let mut result = Ok(());
        for &slot in &self.slot_order {
            if self.deck.is_empty() {
                break;
            }
            if self.ctx.table.card_at(slot).is_some() {
                continue;
            }
            let Some(card) = self.deck.deal_card() else {
                break;
            };
            if let Err(e) = self.ctx.table.place_card(card, slot) {
                self.deck.return_card(card);
                result = Err(e);
                break;
            }
            placed = true;
        }
        self.ctx.table.set_reshuffling(false);
        result?;

        if placed && self.ctx.config.hints {
            self.ctx.ui.show_hints(&self.ctx.table.snapshot());
        }
        Ok(placed)
    }

    /// Return every table card to the deck and reset all players.
    pub fn sweep(&mut self) -> GameResult<()> {
        let table = &self.ctx.table;
        table.set_reshuffling(true);
        self.ctx.ui.remove_tokens();

        let mut result = Ok(());
        for slot in 0..table.size() {
            match table.remove_card(slot) {
                Ok((Some(card), _)) => self.deck.return_card(card),
                Ok((None, _)) => {}
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        let dropped = self.ctx.claims.clear();
        if dropped > 0 {
            log::debug!("Sweep dropped {} pending claims", dropped);
        }
        for handle in &self.players {
            handle.notify(Notice::Reset);
        }

        self.deck.shuffle();
        table.set_reshuffling(false);
        log::info!("Round over, {} cards back in the deck", self.deck.len());
        Ok(result?)
    }

    /// No rounds left to play.
    pub fn should_finish(&self) -> bool {
        self.ctx.termination.is_set() || !self.any_combination_left()
    }

    /// Whether the cards still in play, deck and table together, contain a
    /// valid combination.
    pub fn any_combination_left(&self) -> bool {
        let mut pool: Vec<Card> = self.deck.cards().to_vec();
        pool.extend(self.ctx.table.snapshot().into_iter().flatten());
        self.oracle.has_any_combination(&pool)
    }

    /// Points awarded so far, one entry per player
    pub fn scores(&self) -> Vec<(PlayerId, u32)> {
        self.ledger.iter().copied().enumerate().collect()
    }

    /// Compute and display the winners
    pub fn announce_winners(&self) -> Vec<PlayerId> {
        let winners = winners(&self.scores());
        log::info!("Winners: {:?} (scores {:?})", winners, self.ledger);
        self.ctx.ui.announce_winner(&winners);
        winners
    }

    fn reset_countdown(&mut self) {
        let timeout = self.ctx.config.turn_timeout;
        self.deadline = Instant::now() + timeout;
        self.ctx
            .ui
            .set_countdown(timeout.saturating_sub(Duration::from_secs(1)), false);
    }

    fn update_countdown(&self) {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        self.ctx.ui.set_countdown(
            remaining,
            remaining < self.ctx.config.turn_timeout_warning,
        );
    }

    /// Stop every player, last id first, then let the display settle.
    async fn terminate(&mut self) {
        self.ctx.termination.set();
        while let Some(handle) = self.players.pop() {
            handle.terminate().await;
        }
        tokio::time::sleep(self.ctx.config.end_game_pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winners_with_tie() {
        let scores = [(0, 3), (1, 5), (2, 5), (3, 2)];
        assert_eq!(winners(&scores), vec![1, 2]);
    }

    #[test]
    fn test_single_winner() {
        assert_eq!(winners(&[(0, 1), (1, 0)]), vec![0]);
    }

    #[test]
    fn test_everyone_wins_at_zero() {
        assert_eq!(winners(&[(0, 0), (1, 0), (2, 0)]), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_players_no_winners() {
        assert!(winners(&[]).is_empty());
    }

    #[test]
    fn test_winners_sorted_by_id() {
        assert_eq!(winners(&[(4, 2), (1, 2), (3, 1)]), vec![1, 4]);
    }
}
