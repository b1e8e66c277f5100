//! Shared fixtures for the table integration tests.

#![allow(dead_code)]

use set_game::{
    Card, GameConfig, PlayerId, Slot, TableUi,
    game::GameContext,
    player::{PlayerActor, PlayerHandle, PlayerInput, PlayerSnapshot},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// One recorded display call
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Score(PlayerId, u32),
    Freeze(PlayerId, Duration),
    Countdown(Duration, bool),
    TokensCleared,
    Hints(Vec<Option<Card>>),
    Winners(Vec<PlayerId>),
}

/// Display sink that keeps everything it is told
#[derive(Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl TableUi for RecordingUi {
    fn set_score(&self, player: PlayerId, score: u32) {
        self.record(UiEvent::Score(player, score));
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        self.record(UiEvent::Freeze(player, remaining));
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        self.record(UiEvent::Countdown(remaining, warning));
    }

    fn remove_tokens(&self) {
        self.record(UiEvent::TokensCleared);
    }

    fn show_hints(&self, table: &[Option<Card>]) {
        self.record(UiEvent::Hints(table.to_vec()));
    }

    fn announce_winner(&self, winners: &[PlayerId]) {
        self.record(UiEvent::Winners(winners.to_vec()));
    }
}

/// Small table with human-only players and short timings
pub fn human_config(players: usize, table_size: usize) -> GameConfig {
    GameConfig {
        players,
        human_players: players,
        table_size,
        turn_timeout: Duration::from_secs(60),
        turn_timeout_warning: Duration::from_secs(5),
        point_freeze: Duration::from_secs(1),
        penalty_freeze: Duration::from_secs(3),
        end_game_pause: Duration::from_millis(100),
        ..GameConfig::default()
    }
}

/// Context plus one running actor per player
pub fn spawn_players(config: GameConfig) -> (GameContext, Arc<RecordingUi>, Vec<PlayerHandle>) {
    let ui = Arc::new(RecordingUi::default());
    let ctx = GameContext::new(config, ui.clone());
    let handles = (0..ctx.config.players)
        .map(|id| {
            let (actor, mut handle) = PlayerActor::new(id, ctx.clone());
            handle.attach(tokio::spawn(actor.run()));
            handle
        })
        .collect();
    (ctx, ui, handles)
}

/// Slot holding `card`
pub fn slot_of(ctx: &GameContext, card: u32) -> Slot {
    ctx.table
        .snapshot()
        .iter()
        .position(|c| *c == Some(Card(card)))
        .unwrap_or_else(|| panic!("card {card} not on the table"))
}

/// Poll `input` until its published state satisfies `check`.
pub async fn wait_for(input: &PlayerInput, check: impl Fn(&PlayerSnapshot) -> bool) -> PlayerSnapshot {
    for _ in 0..10_000 {
        let snapshot = input.snapshot();
        if check(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("player {} never reached the expected state: {:?}", input.id(), input.snapshot());
}

/// Poll until `check` holds.
pub async fn wait_until(check: impl Fn() -> bool) {
    for _ in 0..10_000 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition never held");
}
