//! End-to-end rule scenarios.
//!
//! Each test builds a table through the public action API (JOIN_GAME then
//! START_GAME with an empty deck configuration and manual hands) so hands
//! are exact and nothing is random.

use potato_pressure::cards::{Card, CardId, CardName};
use potato_pressure::core::{Action, DeckConfig, GameSetup, GameState, GameStatus, PlayerId, TurnPhase};
use potato_pressure::rules::{dispatch, draw_card, explosion_threshold, next_player_from, next_player_id};
use potato_pressure::GameResult;

fn table(hands: &[&[CardName]]) -> GameState {
    let mut state = GameState::new(99);
    for i in 0..hands.len() {
        state = dispatch(&state, Action::JoinGame(format!("P{i}")));
    }
    let mut setup = GameSetup::default().with_config(DeckConfig::empty());
    for (seat, hand) in hands.iter().enumerate() {
        setup = setup.with_hand(seat, hand.to_vec());
    }
    dispatch(&state, Action::StartGame(Some(setup)))
}

fn card(state: &GameState, seat: usize, name: CardName) -> CardId {
    state.players[seat].hand.find_name(name).map(|c| c.id).unwrap()
}

fn stock_deck(state: &mut GameState, name: CardName, count: usize) {
    for _ in 0..count {
        let id = state.alloc_card_id();
        state.deck.push(Card::new(id, name));
    }
}

/// Potato states match the hands holding the cards, one to one.
fn assert_potatoes_in_sync(state: &GameState) {
    for potato in state.potatoes.iter() {
        let holders: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|p| p.hand.contains(potato.id))
            .map(|p| p.id)
            .collect();
        assert_eq!(holders, vec![potato.holder_id], "potato {}", potato.id);
    }
    let potato_cards = state
        .players
        .iter()
        .flat_map(|p| p.hand.iter())
        .filter(|c| c.is_potato())
        .count();
    assert_eq!(potato_cards, state.potatoes.len());
}

// === Scenarios ===

#[test]
fn test_scenario_a_opening_deal() {
    let mut state = GameState::new(2024);
    state = dispatch(&state, Action::JoinGame("Ada".into()));
    state = dispatch(&state, Action::JoinGame("Bo".into()));
    state = dispatch(&state, Action::StartGame(None));

    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.turn_phase, TurnPhase::AwaitingAction);
    assert_eq!(state.current_player_id, Some(state.players[0].id));
    let potatoes = state.players[0].hand.iter().filter(|c| c.is_potato()).count();
    assert_eq!(potatoes, 1);
    assert_eq!(state.total_cards(), DeckConfig::default().total_cards() as usize);
    assert_potatoes_in_sync(&state);
}

#[test]
fn test_scenario_b_topping_explodes() {
    let mut state = table(&[&[CardName::Potato, CardName::Cheese], &[]]);
    state.potatoes[0].topping_count = 3;
    let cheese = card(&state, 0, CardName::Cheese);

    let over = dispatch(&state, Action::PlayCardInit(cheese));
    assert_eq!(over.potatoes[0].topping_count, 4);
    assert_eq!(over.status, GameStatus::GameOver);
    assert!(!over.players[0].is_alive);
    assert_eq!(over.result, Some(GameResult::Winner(PlayerId(1))));
    assert_eq!(over.winner_label().as_deref(), Some("P1"));
}

#[test]
fn test_scenario_c_oven_mitt_bounce() {
    let mut state = table(&[
        &[CardName::Potato, CardName::Pass],
        &[CardName::OvenMitt],
        &[],
        &[],
    ]);
    stock_deck(&mut state, CardName::Chives, 10);
    let pass = card(&state, 0, CardName::Pass);

    let selecting = dispatch(&state, Action::PlayCardInit(pass));
    let waiting = dispatch(&selecting, Action::SelectTarget(PlayerId(1)));
    assert_eq!(waiting.turn_phase, TurnPhase::AwaitingReaction);

    let choosing = dispatch(
        &waiting,
        Action::RespondToPass(potato_pressure::ReactionResponse::Reflect),
    );
    assert_eq!(choosing.turn_phase, TurnPhase::SelectingReactionTarget);

    // Right of seat 1 is seat 0.
    let done = dispatch(&choosing, Action::ResolveReactionTarget(PlayerId(0)));
    assert!(done.players[0].holds_potato());
    assert_eq!(done.potatoes[0].holder_id, PlayerId(0));
    assert!(done.discard.has_name(CardName::OvenMitt));
    assert!(!done.players[1].hand.has_name(CardName::OvenMitt));
    assert_eq!(done.current_player_id, Some(PlayerId(1)));
    assert_eq!(done.turn_phase, TurnPhase::AwaitingAction);
    assert_potatoes_in_sync(&done);
}

#[test]
fn test_scenario_d_food_fight() {
    let state = table(&[
        &[CardName::Potato, CardName::FoodFight, CardName::Cheese],
        &[CardName::Bacon],
        &[CardName::Chives],
    ]);
    let total = state.total_cards();
    let food_fight = card(&state, 0, CardName::FoodFight);

    let mut picking = dispatch(&state, Action::PlayCardInit(food_fight));
    assert_eq!(picking.turn_phase, TurnPhase::FoodFightSelect);

    let potato = card(&picking, 0, CardName::Potato);
    let bacon = card(&picking, 1, CardName::Bacon);
    let chives = card(&picking, 2, CardName::Chives);
    for (player, card_id) in [(0, potato), (1, bacon), (2, chives)] {
        picking = dispatch(
            &picking,
            Action::SelectFoodFightCard { player_id: PlayerId(player), card_id },
        );
    }

    assert!(picking.players[1].hand.contains(potato));
    assert!(picking.players[2].hand.contains(bacon));
    assert!(picking.players[0].hand.contains(chives));
    assert_eq!(picking.potatoes[0].holder_id, PlayerId(1));
    assert_eq!(picking.total_cards(), total);
    assert!(picking.food_fight_selections.is_empty());
    assert_potatoes_in_sync(&picking);
}

#[test]
fn test_scenario_e_double_dip_topping() {
    let state = table(&[&[CardName::Potato, CardName::DoubleDip, CardName::Cheese], &[]]);
    let double_dip = card(&state, 0, CardName::DoubleDip);

    let armed = dispatch(&state, Action::PlayCardInit(double_dip));
    assert!(armed.double_dip_active);
    assert_eq!(armed.turn_phase, TurnPhase::AwaitingAction);
    assert_eq!(armed.current_player_id, Some(PlayerId(0)));

    let cheese = card(&armed, 0, CardName::Cheese);
    let next = dispatch(&armed, Action::PlayCardInit(cheese));
    assert_eq!(next.potatoes[0].topping_count, 2);
    assert!(!next.double_dip_active);
    assert_eq!(next.status, GameStatus::Playing);
}

// === Invariants ===

#[test]
fn test_threshold_determinism() {
    let two = table(&[&[CardName::Potato], &[]]);
    assert_eq!(explosion_threshold(&two), 3);

    let mut cool = two.clone();
    cool.potatoes[0].topping_count = 2;
    assert_eq!(dispatch(&cool, Action::EndTurn).status, GameStatus::Playing);

    let mut hot = two;
    hot.potatoes[0].topping_count = 3;
    assert_eq!(dispatch(&hot, Action::EndTurn).status, GameStatus::GameOver);

    let five = table(&[&[CardName::Potato], &[], &[], &[], &[]]);
    assert_eq!(explosion_threshold(&five), 6);
    let mut at_five = five.clone();
    at_five.potatoes[0].topping_count = 5;
    assert_eq!(dispatch(&at_five, Action::EndTurn).status, GameStatus::Playing);
}

#[test]
fn test_rotation_skips_dead_players() {
    let mut state = table(&[&[CardName::Potato], &[], &[], &[]]);
    state.players[1].is_alive = false;
    state.players[2].is_alive = false;
    assert_eq!(next_player_id(&state), Some(PlayerId(3)));

    let next = dispatch(&state, Action::EndTurn);
    assert_eq!(next.current_player_id, Some(PlayerId(3)));

    state.players[3].is_alive = false;
    assert_eq!(next_player_from(&state, PlayerId(0)), PlayerId(0));
}

#[test]
fn test_reshuffle_loses_nothing() {
    let mut state = table(&[&[CardName::Potato], &[CardName::Bacon, CardName::Chilli, CardName::Butter]]);
    for name in [CardName::Bacon, CardName::Chilli, CardName::Butter] {
        let id = card(&state, 1, name);
        let taken = state.players[1].hand.take(id).unwrap();
        state.discard.push(taken);
    }
    let total = state.total_cards();
    assert!(state.deck.is_empty());

    let drawn = draw_card(&mut state, PlayerId(0)).unwrap();
    assert!(state.players[0].hand.contains(drawn));
    assert_eq!(state.deck.len() + state.discard.len(), 2);
    assert_eq!(state.total_cards(), total);

    let mut ids: Vec<CardId> = state
        .deck
        .iter()
        .chain(state.discard.iter())
        .chain(state.players.iter().flat_map(|p| p.hand.iter()))
        .map(|c| c.id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_rewind_restores_before_second_card_only() {
    let state = table(&[
        &[CardName::Potato, CardName::Cheese, CardName::Rewind],
        &[CardName::Bacon],
    ]);

    let cheese = card(&state, 0, CardName::Cheese);
    let first = dispatch(&state, Action::PlayCardInit(cheese));
    assert_eq!(first.potatoes[0].topping_count, 1);

    let bacon = card(&first, 1, CardName::Bacon);
    let second = dispatch(&first, Action::PlayCardInit(bacon));
    assert_eq!(second.potatoes[0].topping_count, 2);

    let rewind = card(&second, 0, CardName::Rewind);
    let rewound = dispatch(&second, Action::PlayCardInit(rewind));
    assert_eq!(rewound.potatoes[0].topping_count, 1);
    assert_potatoes_in_sync(&rewound);
}

#[test]
fn test_rejection_leaves_revision() {
    let state = table(&[&[CardName::Potato, CardName::Pass], &[CardName::Cheese]]);
    let cheese = card(&state, 1, CardName::Cheese);

    // Not player 1's turn.
    let next = dispatch(&state, Action::PlayCardInit(cheese));
    assert_eq!(next, state);
    assert_eq!(dispatch(&state, Action::SelectTarget(PlayerId(1))).revision, state.revision);
}

#[test]
fn test_passutla_chain_is_recorded() {
    let state = table(&[&[CardName::Potato, CardName::Passutla], &[], &[]]);
    let passutla = card(&state, 0, CardName::Passutla);
    let before = state.history.len();

    let next = dispatch(&state, Action::PlayCardInit(passutla));
    let steps: Vec<(&'static str, bool)> = next
        .history
        .iter()
        .skip(before)
        .map(|r| (r.action.name(), r.chained))
        .collect();
    assert_eq!(
        steps,
        vec![("PLAY_CARD_INIT", false), ("SELECT_TARGET", true), ("END_TURN", true)]
    );
    assert!(next.players[1].holds_potato());
    assert_eq!(next.revision, state.revision + 1);
}
