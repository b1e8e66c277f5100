//! Player actor: turns key presses into tokens, selections and claims.

use super::{
    bot::Bot,
    messages::{Notice, PlayerPhase, PlayerSnapshot, Ticket},
    selection::Selection,
};
use crate::{
    dealer::claims::Claim,
    game::{
        context::GameContext,
        entities::{PlayerId, Slot},
    },
    shutdown::Termination,
    table::SharedTable,
};
use std::{ops::ControlFlow, sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

/// Granularity of the visible freeze countdown
const FREEZE_TICK: Duration = Duration::from_secs(1);

/// Entry point for key presses, from a human input device or a bot.
#[derive(Clone)]
pub struct PlayerInput {
    id: PlayerId,
    keys: mpsc::Sender<Slot>,
    status: watch::Receiver<PlayerSnapshot>,
    table: Arc<SharedTable>,
}

impl PlayerInput {
    pub fn new(
        id: PlayerId,
        keys: mpsc::Sender<Slot>,
        status: watch::Receiver<PlayerSnapshot>,
        table: Arc<SharedTable>,
    ) -> Self {
        Self {
            id,
            keys,
            status,
            table,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.status.borrow().clone()
    }

    // Advisory only: the player may freeze or the slot may empty right
    // after this check. The dealer validates claims against the table.
    fn accepts(&self, slot: Slot) -> bool {
        self.status.borrow().phase.accepts_input()
            && self.table.card_at(slot).is_some()
            && !self.table.is_reshuffling()
    }

    /// Queue `slot` without blocking.
    ///
    /// Dropped when the player is frozen, the slot is empty, the table is
    /// being reshuffled or the input queue is full. Returns whether the key
    /// was queued.
    pub fn key_pressed(&self, slot: Slot) -> bool {
        if !self.accepts(slot) {
            return false;
        }
        self.keys.try_send(slot).is_ok()
    }

    /// Like [`key_pressed`](Self::key_pressed), but waits for room in the
    /// input queue instead of dropping the key.
    pub async fn press(&self, slot: Slot) -> bool {
        if !self.accepts(slot) {
            return false;
        }
        self.keys.send(slot).await.is_ok()
    }
}

/// Dealer-side handle of a player.
pub struct PlayerHandle {
    input: PlayerInput,
    notices: mpsc::UnboundedSender<Notice>,
    termination: Termination,
    task: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    pub fn new(
        input: PlayerInput,
        notices: mpsc::UnboundedSender<Notice>,
        termination: Termination,
    ) -> Self {
        Self {
            input,
            notices,
            termination,
            task: None,
        }
    }

    /// Attach the spawned actor task so [`terminate`](Self::terminate) can
    /// join it.
    pub fn attach(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }

    pub fn id(&self) -> PlayerId {
        self.input.id
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.input.snapshot()
    }

    /// See [`PlayerInput::key_pressed`].
    pub fn key_pressed(&self, slot: Slot) -> bool {
        self.input.key_pressed(slot)
    }

    /// Deliver `notice`; silently dropped once the actor has exited.
    pub fn notify(&self, notice: Notice) {
        if self.notices.send(notice).is_err() {
            log::debug!("Player {} gone, notice dropped", self.id());
        }
    }

    /// Raise the termination flag, then wait for the actor, and through it
    /// its bot, to exit.
    ///
    /// The flag is game-wide: every other player stops as well.
    pub async fn terminate(mut self) {
        self.termination.set();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            log::error!("Player {} task failed: {}", self.input.id, e);
        }
    }
}

/// Outcome of waiting on a submitted claim
enum Resolution {
    Accepted,
    Rejected,
    /// Resolved without a verdict; no freeze applies
    Released,
}

/// Player actor owning its selection, score and phase.
pub struct PlayerActor {
    id: PlayerId,
    ctx: GameContext,
    keys: mpsc::Receiver<Slot>,
    notices: mpsc::UnboundedReceiver<Notice>,
    status: watch::Sender<PlayerSnapshot>,
    input: PlayerInput,
    selection: Selection,
    score: u32,
    next_ticket: Ticket,
    with_bot: bool,
}

impl PlayerActor {
    /// Create a new player actor
    ///
    /// # Arguments
    ///
    /// * `id` - Player ID
    /// * `ctx` - Shared game handles
    ///
    /// # Returns
    ///
    /// * `(PlayerActor, PlayerHandle)` - Actor to spawn and handle for the dealer
    pub fn new(id: PlayerId, ctx: GameContext) -> (Self, PlayerHandle) {
        let k = ctx.config.feature_size;
        let (keys_tx, keys) = mpsc::channel(k);
        let (notices_tx, notices) = mpsc::unbounded_channel();
        let (status, status_rx) = watch::channel(PlayerSnapshot::new(id));

        let input = PlayerInput::new(id, keys_tx, status_rx, ctx.table.clone());
        let handle = PlayerHandle::new(input.clone(), notices_tx, ctx.termination.clone());

        let actor = Self {
            id,
            with_bot: ctx.config.is_bot(id),
            ctx,
            keys,
            notices,
            status,
            input,
            selection: Selection::new(k),
            score: 0,
            next_ticket: 0,
        };

        (actor, handle)
    }

    /// Run the player event loop until termination
    pub async fn run(mut self) {
        log::info!(
            "Player {} starting ({})",
            self.id,
            if self.with_bot { "bot" } else { "human" }
        );

        let bot = self.with_bot.then(|| {
            let bot = Bot::new(
                self.input.clone(),
                self.ctx.config.table_size,
                self.ctx.config.bot_think_time,
                self.ctx.termination.clone(),
            );
            tokio::spawn(bot.run())
        });

        while !self.ctx.termination.is_set() {
            tokio::select! {
                biased;

                _ = self.ctx.termination.wait() => break,

                Some(notice) = self.notices.recv() => self.apply_notice(notice),

                Some(slot) = self.keys.recv() => {
                    if self.handle_key(slot).await.is_break() {
                        break;
                    }
                }

                else => break,
            }
        }

        self.set_phase(PlayerPhase::Terminated);

        if let Some(bot) = bot {
            if !self.ctx.termination.is_set() {
                bot.abort();
            }
            if let Err(e) = bot.await
                && !e.is_cancelled()
            {
                log::error!("Bot of player {} failed: {}", self.id, e);
            }
        }

        log::info!("Player {} terminated with score {}", self.id, self.score);
    }

    /// Apply one selected slot.
    async fn handle_key(&mut self, slot: Slot) -> ControlFlow<()> {
        let table = &self.ctx.table;

        // Stale reads land here too: an emptied slot just toggles off.
        if table.card_at(slot).is_none() || self.selection.contains(slot) {
            table.remove_token(self.id, slot);
            self.selection.remove(slot);
            self.refresh_phase();
            return ControlFlow::Continue(());
        }

        if self.selection.is_full() {
            return ControlFlow::Continue(());
        }

        // A token left behind by a key handled across a sweep is adopted.
        if table.place_token(self.id, slot) || table.tokens_of(self.id).contains(&slot) {
            self.selection.push(slot);
        }
        self.refresh_phase();

        if self.selection.is_full() {
            return self.submit_claim().await;
        }
        ControlFlow::Continue(())
    }

    /// Hand the full selection to the dealer and serve the outcome.
    async fn submit_claim(&mut self) -> ControlFlow<()> {
        // Revocations sent before this point must shape the claim.
        while let Ok(notice) = self.notices.try_recv() {
            self.apply_notice(notice);
        }
        if !self.selection.is_full() {
            return ControlFlow::Continue(());
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.set_phase(PlayerPhase::AwaitingVerdict);

        let claim = Claim {
            player: self.id,
            ticket,
        };
        if !self.ctx.claims.push(claim) {
            log::warn!("Player {}: claim queue full, claim {} dropped", self.id, ticket);
            self.refresh_phase();
            return ControlFlow::Continue(());
        }
        log::debug!(
            "Player {} claims slots {:?} (ticket {})",
            self.id,
            self.selection.as_slice(),
            ticket
        );

        let resolution = match self.await_resolution(ticket).await {
            ControlFlow::Continue(resolution) => resolution,
            ControlFlow::Break(()) => return ControlFlow::Break(()),
        };

        let flow = match resolution {
            Resolution::Accepted => {
                // The dealer already took these cards and the tokens on them.
                self.selection.clear();
                self.point().await
            }
            Resolution::Rejected => {
                let flow = self.penalty().await;
                for slot in self.selection.take() {
                    self.ctx.table.remove_token(self.id, slot);
                }
                flow
            }
            Resolution::Released => ControlFlow::Continue(()),
        };

        self.refresh_phase();
        flow
    }

    async fn await_resolution(&mut self, ticket: Ticket) -> ControlFlow<(), Resolution> {
        loop {
            // A verdict already delivered still counts after termination.
            let notice = tokio::select! {
                biased;

                notice = self.notices.recv() => notice,

                _ = self.ctx.termination.wait() => return ControlFlow::Break(()),
            };

            match notice {
                Some(Notice::Verdict {
                    ticket: resolved,
                    accepted,
                }) if resolved == ticket => {
                    return ControlFlow::Continue(if accepted {
                        Resolution::Accepted
                    } else {
                        Resolution::Rejected
                    });
                }
                Some(Notice::Released { ticket: resolved }) if resolved == ticket => {
                    log::debug!("Player {}: claim {} released", self.id, ticket);
                    return ControlFlow::Continue(Resolution::Released);
                }
                Some(Notice::Reset) => {
                    self.apply_notice(Notice::Reset);
                    return ControlFlow::Continue(Resolution::Released);
                }
                Some(notice @ Notice::Revoked { .. }) => self.apply_notice(notice),
                Some(stale) => {
                    log::debug!("Player {}: ignoring stale {:?}", self.id, stale);
                }
                None => return ControlFlow::Break(()),
            }
        }
    }

    /// Apply a notice that arrived outside of a claim wait.
    fn apply_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Revoked { slots } => {
                for slot in slots {
                    self.selection.remove(slot);
                }
            }
            Notice::Reset => {
                self.selection.clear();
                // Keys handled after the sweep but before this notice may
                // have placed tokens on the fresh cards.
                for slot in self.ctx.table.tokens_of(self.id) {
                    self.ctx.table.remove_token(self.id, slot);
                }
            }
            stale => log::debug!("Player {}: ignoring stale {:?}", self.id, stale),
        }
        self.refresh_phase();
    }

    /// Award a point and serve the point freeze.
    pub(crate) async fn point(&mut self) -> ControlFlow<()> {
        self.score += 1;
        self.ctx.ui.set_score(self.id, self.score);
        log::info!("Player {} scores, now {}", self.id, self.score);
        self.freeze(self.ctx.config.point_freeze).await
    }

    /// Serve the penalty freeze; the score is untouched.
    pub(crate) async fn penalty(&mut self) -> ControlFlow<()> {
        log::debug!("Player {} penalized", self.id);
        self.freeze(self.ctx.config.penalty_freeze).await
    }

    /// Hold the player frozen, updating the display once per second.
    async fn freeze(&mut self, total: Duration) -> ControlFlow<()> {
        self.set_phase(PlayerPhase::Frozen);

        let mut remaining = total;
        while remaining >= FREEZE_TICK {
            self.ctx.ui.set_freeze(self.id, remaining);
            tokio::select! {
                biased;

                _ = self.ctx.termination.wait() => return ControlFlow::Break(()),

                _ = tokio::time::sleep(FREEZE_TICK) => {}
            }
            remaining -= FREEZE_TICK;
        }
        self.ctx.ui.set_freeze(self.id, Duration::ZERO);
        ControlFlow::Continue(())
    }

    fn refresh_phase(&mut self) {
        let phase = if self.selection.is_empty() {
            PlayerPhase::Idle
        } else {
            PlayerPhase::Selecting
        };
        self.set_phase(phase);
    }

    fn set_phase(&mut self, phase: PlayerPhase) {
        self.status.send_replace(PlayerSnapshot {
            id: self.id,
            phase,
            score: self.score,
            selection: self.selection.as_slice().to_vec(),
        });
    }
}
