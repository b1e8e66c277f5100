//! Dealer-driven table flow integration tests.
//!
//! Players run as real actors; the dealer is stepped by hand so every claim
//! is resolved at a known point.

mod common;

use common::{UiEvent, human_config, slot_of, spawn_players, wait_for, wait_until};
use set_game::{
    Card, Deck, SetRules,
    dealer::{Claim, ClaimOutcome, Dealer},
    player::PlayerPhase,
};
use std::{sync::Arc, time::Duration};

// Cards 0, 1 and 2 form a set; 4 does not complete anything with them.
fn small_deck() -> Deck {
    Deck::from(vec![Card(0), Card(1), Card(2), Card(4)])
}

// ============================================================================
// Claim resolution
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_valid_claim_clears_slots_everywhere() {
    let (ctx, ui, handles) = spawn_players(human_config(2, 4));
    let mut dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(small_deck());
    assert!(dealer.place_cards_on_table().unwrap());
    assert_eq!(ctx.table.count_cards(), 4);

    let (a, b) = (dealer.players()[0].input().clone(), dealer.players()[1].input().clone());
    let shared = slot_of(&ctx, 0);

    // B shares one slot with A's upcoming set and also holds the odd card.
    assert!(b.press(shared).await);
    assert!(b.press(slot_of(&ctx, 4)).await);
    wait_for(&b, |s| s.selection.len() == 2).await;

    for card in [0, 1, 2] {
        assert!(a.press(slot_of(&ctx, card)).await);
    }
    wait_until(|| ctx.claims.len() == 1).await;
    assert_eq!(a.snapshot().phase, PlayerPhase::AwaitingVerdict);

    let claim = ctx.claims.try_pop().unwrap();
    assert_eq!(dealer.resolve_claim(claim).unwrap(), ClaimOutcome::Accepted);

    // Only the odd card is left, still carrying B's token.
    assert_eq!(ctx.table.count_cards(), 1);
    assert_eq!(ctx.table.count_tokens(), 1);
    assert!(ctx.table.tokens_of(0).is_empty());

    let b_state = wait_for(&b, |s| s.selection.len() == 1).await;
    assert_eq!(b_state.selection, vec![slot_of(&ctx, 4)]);
    assert_eq!(b_state.score, 0);

    let a_state = wait_for(&a, |s| s.score == 1 && s.phase == PlayerPhase::Idle).await;
    assert!(a_state.selection.is_empty());
    assert_eq!(dealer.scores(), vec![(0, 1), (1, 0)]);
    assert!(ui.events().contains(&UiEvent::Score(0, 1)));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_claim_revalidated_after_removal() {
    let (ctx, _ui, handles) = spawn_players(human_config(2, 4));
    let mut dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(small_deck());
    dealer.place_cards_on_table().unwrap();

    let (a, b) = (dealer.players()[0].input().clone(), dealer.players()[1].input().clone());
    for card in [0, 1, 2] {
        a.press(slot_of(&ctx, card)).await;
    }
    wait_until(|| ctx.claims.len() == 1).await;
    for card in [0, 1, 2] {
        b.press(slot_of(&ctx, card)).await;
    }
    wait_until(|| ctx.claims.len() == 2).await;

    // A is first in line; B's identical claim is withdrawn along the way.
    let first = ctx.claims.try_pop().unwrap();
    assert_eq!(first.player, 0);
    assert_eq!(dealer.resolve_claim(first).unwrap(), ClaimOutcome::Accepted);
    assert!(ctx.claims.is_empty());

    // B is released, not penalized.
    let b_state = wait_for(&b, |s| s.selection.is_empty() && s.phase == PlayerPhase::Idle).await;
    assert_eq!(b_state.score, 0);

    // A late claim for B is checked against the post-removal table.
    let late = Claim { player: 1, ticket: 99 };
    assert_eq!(dealer.resolve_claim(late).unwrap(), ClaimOutcome::Stale);
    assert_eq!(dealer.scores(), vec![(0, 1), (1, 0)]);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_claim_penalizes_and_clears() {
    let (ctx, ui, handles) = spawn_players(human_config(1, 4));
    let mut dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(small_deck());
    dealer.place_cards_on_table().unwrap();

    let a = dealer.players()[0].input().clone();
    for card in [0, 1, 4] {
        a.press(slot_of(&ctx, card)).await;
    }
    wait_until(|| ctx.claims.len() == 1).await;

    let claim = ctx.claims.try_pop().unwrap();
    assert_eq!(dealer.resolve_claim(claim).unwrap(), ClaimOutcome::Rejected);
    assert_eq!(ctx.table.count_cards(), 4);

    let started = tokio::time::Instant::now();
    wait_for(&a, |s| s.phase == PlayerPhase::Frozen).await;
    assert!(!a.key_pressed(slot_of(&ctx, 2)));

    let state = wait_for(&a, |s| s.phase == PlayerPhase::Idle).await;
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(state.score, 0);
    assert!(state.selection.is_empty());
    assert_eq!(ctx.table.count_tokens(), 0);
    assert!(ui.events().contains(&UiEvent::Freeze(0, Duration::from_secs(3))));
    assert!(ui.events().contains(&UiEvent::Freeze(0, Duration::ZERO)));
}

#[tokio::test(start_paused = true)]
async fn test_claim_from_unknown_player_is_stale() {
    let (ctx, _ui, handles) = spawn_players(human_config(1, 4));
    let mut dealer = Dealer::new(ctx, Arc::new(SetRules::default()), handles);
    let claim = Claim { player: 7, ticket: 0 };
    assert_eq!(dealer.resolve_claim(claim).unwrap(), ClaimOutcome::Stale);
}

// ============================================================================
// Round boundaries
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_sweep_returns_everything() {
    let config = human_config(2, 12);
    let deck_size = config.deck_size;
    let (ctx, ui, handles) = spawn_players(config);
    let mut dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles);
    dealer.place_cards_on_table().unwrap();
    assert_eq!(ctx.table.count_cards(), 12);
    assert_eq!(dealer.deck().len(), deck_size - 12);

    let (a, b) = (dealer.players()[0].input().clone(), dealer.players()[1].input().clone());
    a.press(0).await;
    b.press(0).await;
    b.press(5).await;
    wait_until(|| ctx.table.count_tokens() == 3).await;

    dealer.sweep().unwrap();

    assert_eq!(ctx.table.count_cards(), 0);
    assert_eq!(ctx.table.count_tokens(), 0);
    assert!(ctx.claims.is_empty());
    assert!(!ctx.table.is_reshuffling());

    let mut cards = dealer.deck().cards().to_vec();
    cards.sort();
    assert_eq!(cards, Deck::new(deck_size).cards());

    wait_for(&a, |s| s.selection.is_empty()).await;
    wait_for(&b, |s| s.selection.is_empty()).await;
    assert!(ui.events().contains(&UiEvent::TokensCleared));
}

#[tokio::test(start_paused = true)]
async fn test_refill_uses_only_empty_slots() {
    let (ctx, _ui, handles) = spawn_players(human_config(1, 12));
    let mut dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(Deck::from((0..14).map(Card).collect::<Vec<_>>()));

    dealer.place_cards_on_table().unwrap();
    let before = ctx.table.snapshot();
    assert_eq!(dealer.deck().len(), 2);

    ctx.table.remove_card(3).unwrap();
    ctx.table.remove_card(7).unwrap();
    assert!(dealer.place_cards_on_table().unwrap());

    let after = ctx.table.snapshot();
    assert!(dealer.deck().is_empty());
    for slot in (0..12).filter(|s| ![3, 7].contains(s)) {
        assert_eq!(before[slot], after[slot]);
    }
    assert!(after.iter().all(Option::is_some));

    // Nothing left to deal.
    ctx.table.remove_card(0).unwrap();
    assert!(!dealer.place_cards_on_table().unwrap());
    assert_eq!(ctx.table.empty_slots(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_hints_follow_refill() {
    let config = set_game::GameConfig {
        hints: true,
        ..human_config(1, 4)
    };
    let (ctx, ui, handles) = spawn_players(config);
    let mut dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(small_deck());
    dealer.place_cards_on_table().unwrap();

    let hints: Vec<_> = ui
        .events()
        .into_iter()
        .filter(|e| matches!(e, UiEvent::Hints(_)))
        .collect();
    assert_eq!(hints, vec![UiEvent::Hints(ctx.table.snapshot())]);
}

#[tokio::test(start_paused = true)]
async fn test_finish_follows_remaining_combinations() {
    let (ctx, _ui, handles) = spawn_players(human_config(1, 4));
    let dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(Deck::from(vec![Card(0), Card(1), Card(4)]));
    assert!(!dealer.any_combination_left());
    assert!(dealer.should_finish());

    let (ctx, _ui, handles) = spawn_players(human_config(1, 4));
    let dealer = Dealer::new(ctx.clone(), Arc::new(SetRules::default()), handles)
        .with_deck(small_deck());
    assert!(!dealer.should_finish());
    ctx.termination.set();
    assert!(dealer.should_finish());
}
