//! Lobby, dealing and end-of-turn processing.
//!
//! ## END_TURN
//!
//! 1. Offer the Quick Pass chain window once per turn to a player holding a
//!    potato and a Quick Pass.
//! 2. Send an oversized hand to `Discarding`.
//! 3. Refill the hand.
//! 4. Explode, or rotate to the next living player.

use tracing::{debug, info};

use super::controller::{current_player, finish_turn, require_phase, require_status, Flow};
use super::outcome::GameResult;
use super::resolution::{
    check_explosion, discard_from_hand, exploding_holders, next_player_from, refill_hand,
};
use crate::cards::{CardId, CardName};
use crate::core::config::{GameSetup, MAX_PLAYERS};
use crate::core::player::{PlayerId, PlayerState};
use crate::core::state::{Direction, GameState, GameStatus, TurnPhase};
use crate::deck::deal_game;
use crate::error::Rejection;

// === Lobby ===

/// JOIN_GAME.
pub(crate) fn join_game(state: &mut GameState, name: &str) -> Result<Flow, Rejection> {
    require_status(state, GameStatus::Lobby)?;
    seat(state, name)?;
    Ok(Flow::Done)
}

fn seat(state: &mut GameState, name: &str) -> Result<PlayerId, Rejection> {
    if state.players.len() >= MAX_PLAYERS {
        return Err(Rejection::LobbyFull);
    }
    let id = state.alloc_player_id().ok_or(Rejection::LobbyFull)?;
    state.players.push_back(PlayerState::new(id, name));
    debug!(%id, name, "player joined");
    Ok(id)
}

/// REMOVE_PLAYER.
pub(crate) fn remove_player(state: &mut GameState, id: PlayerId) -> Result<Flow, Rejection> {
    require_status(state, GameStatus::Lobby)?;
    let seat = state.seat_of(id).ok_or(Rejection::UnknownPlayer(id))?;
    state.players.remove(seat);
    debug!(%id, "player left");
    Ok(Flow::Done)
}

/// START_GAME: deal to the roster (from the lobby) or redeal (otherwise).
pub(crate) fn start_game(state: &mut GameState, setup: Option<&GameSetup>) -> Result<Flow, Rejection> {
    let setup = setup.cloned().unwrap_or_default();

    let cards = setup.config.total_cards();
    let limit = state.rules.max_deck_cards;
    if cards > u64::from(limit) {
        return Err(Rejection::DeckTooLarge { cards, limit });
    }

    if state.status == GameStatus::Lobby {
        if let Some(wanted) = setup.player_count {
            while state.players.len() < wanted.min(MAX_PLAYERS) {
                let name = format!("Player {}", state.players.len() + 1);
                seat(state, &name)?;
            }
        }
    }

    let seated = state.players.len();
    if seated < state.rules.min_players {
        return Err(Rejection::NotEnoughPlayers {
            needed: state.rules.min_players,
            seated,
        });
    }

    let roster: Vec<PlayerState> = state.players.iter().cloned().collect();
    let rules = state.rules.clone();
    let (ids, rng) = state.dealer_parts();
    let deal = deal_game(&roster, &setup, &rules, ids, rng);

    state.players = deal.players;
    state.potatoes = deal.potatoes;
    state.deck = deal.deck;
    state.discard = Default::default();
    state.status = GameStatus::Playing;
    state.current_player_id = state.players.front().map(|p| p.id);
    state.turn_phase = TurnPhase::AwaitingAction;
    state.turn_number = 1;
    state.direction = Direction::Clockwise;
    state.pending_play = None;
    state.double_dip_active = false;
    state.reaction_context = None;
    state.food_fight_selections = Default::default();
    state.last_play_snapshot = None;
    state.cards_drawn_this_turn = 0;
    state.post_action_offered = false;
    state.result = None;
    state.notification = Some("Game Started! Good luck.".into());

    info!(
        players = seated,
        deck = state.deck.len(),
        potatoes = state.potatoes.len(),
        "game dealt"
    );
    Ok(Flow::Done)
}

/// RESTART: back to an empty lobby with the same house rules.
pub(crate) fn restart(state: &mut GameState) -> Result<Flow, Rejection> {
    let rng = state.rng.fork();
    let revision = state.revision;
    let notices = state.notice_count;
    *state = GameState::lobby(rng, state.rules.clone());
    state.revision = revision;
    state.notice_count = notices;
    info!("game restarted");
    Ok(Flow::Done)
}

// === End of turn ===

/// END_TURN.
pub(crate) fn end_turn(state: &mut GameState) -> Result<Flow, Rejection> {
    require_phase(
        state,
        &[TurnPhase::AwaitingAction, TurnPhase::ResolvingCard, TurnPhase::EndTurn],
    )?;
    let current = current_player(state)?;
    let player = state.player(current).ok_or(Rejection::UnknownPlayer(current))?;

    if !state.post_action_offered && player.holds_potato() && player.hand.has_name(CardName::QuickPass) {
        state.post_action_offered = true;
        state.turn_phase = TurnPhase::PostAction;
        state.notification = Some("CHAIN: Play Quick Pass or End Turn?".into());
        return Ok(Flow::Done);
    }

    let limit = state.rules.max_hand_size;
    if must_discard(player, limit) {
        state.turn_phase = TurnPhase::Discarding;
        state.notification = Some(format!("Discard down to {limit} cards."));
        return Ok(Flow::Done);
    }

    refill_hand(state, current);

    if check_explosion(state) {
        explode(state);
    } else {
        rotate(state, current);
    }
    Ok(Flow::Done)
}

fn must_discard(player: &PlayerState, limit: usize) -> bool {
    player.hand.len() > limit && player.hand.iter().any(|c| !c.is_potato())
}

fn explode(state: &mut GameState) {
    let losers = exploding_holders(state);
    for &loser in &losers {
        if let Some(p) = state.player_mut(loser) {
            p.is_alive = false;
        }
    }

    let survivors: Vec<PlayerId> = state.living_players().map(|p| p.id).collect();
    let result = GameResult::from_survivors(survivors);
    state.result = Some(result.clone());
    state.status = GameStatus::GameOver;
    state.pending_play = None;
    state.reaction_context = None;
    state.double_dip_active = false;
    state.notification = Some("EXPLOSION! Game Over!".into());

    info!(
        losers = ?losers.as_slice(),
        ?result,
        winner = state.winner_label().unwrap_or_default(),
        "potato exploded"
    );
}

fn rotate(state: &mut GameState, current: PlayerId) {
    let next = next_player_from(state, current);
    for potato in state.potatoes.iter_mut().filter(|p| p.holder_id == next) {
        potato.is_frozen = false;
    }

    state.current_player_id = Some(next);
    state.turn_phase = TurnPhase::AwaitingAction;
    state.turn_number += 1;
    state.double_dip_active = false;
    state.pending_play = None;
    state.reaction_context = None;
    state.post_action_offered = false;
    state.cards_drawn_this_turn = 0;

    let name = state.player(next).map(|p| p.name.clone()).unwrap_or_default();
    info!(turn = state.turn_number, player = %next, name = %name, "turn started");
    state.notification = Some(format!("Turn: {name}"));
}

/// DISCARD_CARD: shed a non-potato card while over the hand limit.
pub(crate) fn discard_card(state: &mut GameState, card_id: CardId) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::Discarding])?;
    let current = current_player(state)?;
    let card = state
        .player(current)
        .and_then(|p| p.hand.get(card_id))
        .ok_or(Rejection::CardNotInHand(card_id))?;
    if card.is_potato() {
        return Err(Rejection::PotatoNotPlayable);
    }

    discard_from_hand(state, current, card_id);
    let limit = state.rules.max_hand_size;
    match state.player(current) {
        Some(player) if must_discard(player, limit) => Ok(Flow::Done),
        _ => Ok(finish_turn(state)),
    }
}

/// SKIP_POST_ACTION.
pub(crate) fn skip_post_action(state: &mut GameState) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::PostAction])?;
    Ok(finish_turn(state))
}
