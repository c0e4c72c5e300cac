//! Card plays: drawing, committing a card, targeting and the food fight.
//!
//! A played card leaves the hand for the discard pile before anything else
//! happens. Every card but Rewind first saves the potatoes and direction
//! into the rewind slot.

use im::OrdMap;
use tracing::debug;

use super::controller::{current_player, finish_turn, require_living, require_phase, Flow};
use super::reactions;
use super::resolution::{
    discard_from_hand, draw_card, next_player_from, resolve_food_fight, resync_potato_holders,
    transfer_potato,
};
use crate::cards::{Card, CardEffect, CardId, CardName};
use crate::core::action::Action;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, PendingPlay, PlaySnapshot, TurnPhase};
use crate::error::Rejection;

/// DRAW_EXECUTE: draw up to `count` cards, then end the turn.
pub(crate) fn draw_execute(state: &mut GameState, count: u32) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::AwaitingAction])?;
    let current = current_player(state)?;

    for _ in 0..count {
        if draw_card(state, current).is_none() {
            break;
        }
        state.cards_drawn_this_turn += 1;
    }
    Ok(finish_turn(state))
}

/// PLAY_CARD_INIT.
pub(crate) fn play_card(state: &mut GameState, card_id: CardId) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::AwaitingAction, TurnPhase::PostAction])?;
    let current = current_player(state)?;
    let player = state.player(current).ok_or(Rejection::UnknownPlayer(current))?;
    let card = player
        .hand
        .get(card_id)
        .cloned()
        .ok_or(Rejection::CardNotInHand(card_id))?;

    if state.turn_phase == TurnPhase::PostAction && card.name != CardName::QuickPass {
        return Err(Rejection::QuickPassOnly);
    }
    let effect = card.effect();
    if effect.moves_potato() && !player.holds_potato() {
        return Err(Rejection::NoPotato(card.name));
    }
    if card.is_potato() {
        return Err(Rejection::PotatoNotPlayable);
    }

    let return_phase = state.turn_phase;
    let prior_snapshot = state.last_play_snapshot.clone();
    if effect != CardEffect::Rewind {
        state.last_play_snapshot = Some(PlaySnapshot {
            potatoes: state.potatoes.clone(),
            direction: state.direction,
        });
    }
    discard_from_hand(state, current, card_id);
    state.notification = None;

    let loops: u32 = if state.double_dip_active { 2 } else { 1 };
    debug!(%card, %current, loops, "card played");

    match effect {
        CardEffect::FoodFight => open_food_fight(state),
        CardEffect::Topping => {
            for potato in state.potatoes.iter_mut().filter(|p| !p.is_frozen) {
                potato.topping_count += loops;
            }
            Ok(finish_play(state))
        }
        CardEffect::Scoop => {
            for potato in state.potatoes.iter_mut() {
                potato.topping_count = potato.topping_count.saturating_sub(loops);
            }
            for _ in 0..loops {
                let Some(topping) = state.discard.take_last(Card::is_topping) else {
                    break;
                };
                if let Some(p) = state.player_mut(current) {
                    p.hand.push(topping);
                }
            }
            Ok(finish_play(state))
        }
        CardEffect::Passutla => {
            let target = next_player_from(state, current);
            state.pending_play = Some(PendingPlay {
                card_id,
                prior_snapshot,
                return_phase,
            });
            state.turn_phase = TurnPhase::SelectTarget;
            Ok(Flow::Chain(Action::SelectTarget(target)))
        }
        CardEffect::Pass | CardEffect::QuickPass => {
            state.pending_play = Some(PendingPlay {
                card_id,
                prior_snapshot,
                return_phase,
            });
            state.turn_phase = TurnPhase::SelectTarget;
            state.notification = Some("Select a Player".into());
            Ok(Flow::Done)
        }
        CardEffect::DoubleDip => {
            state.double_dip_active = true;
            state.pending_play = None;
            state.turn_phase = TurnPhase::AwaitingAction;
            state.notification = Some("Double Dip Active! Play another card.".into());
            Ok(Flow::Done)
        }
        CardEffect::Reverse => {
            for _ in 0..loops {
                state.direction = state.direction.reversed();
            }
            Ok(finish_play(state))
        }
        CardEffect::Freeze => {
            for potato in state.potatoes.iter_mut().filter(|p| p.holder_id == current) {
                potato.is_frozen = true;
            }
            Ok(finish_play(state))
        }
        CardEffect::Rewind => {
            rewind(state);
            Ok(finish_play(state))
        }
        // Only meaningful as a reaction.
        CardEffect::OvenMitt => Ok(finish_play(state)),
        CardEffect::Potato => Err(Rejection::PotatoNotPlayable),
    }
}

/// Clear single-card flags and end the turn.
fn finish_play(state: &mut GameState) -> Flow {
    state.double_dip_active = false;
    state.pending_play = None;
    finish_turn(state)
}

/// Restore heat, freeze flags and direction from the rewind slot.
///
/// Only potatoes still in play are touched, so holders stay where the cards
/// actually are.
fn rewind(state: &mut GameState) {
    let Some(snapshot) = state.last_play_snapshot.clone() else {
        state.notification = Some("Nothing to Rewind!".into());
        return;
    };

    for potato in state.potatoes.iter_mut() {
        if let Some(before) = snapshot.potatoes.iter().find(|b| b.id == potato.id) {
            potato.topping_count = before.topping_count;
            potato.is_frozen = before.is_frozen;
        }
    }
    state.direction = snapshot.direction;
    resync_potato_holders(state);
    state.notification = Some("Rewind! Last play undone.".into());
}

/// SELECT_TARGET: pass the acting player's potato (twice under Double Dip).
///
/// Passing to yourself is allowed and changes nothing. Any other target
/// holding Quick Pass or Oven Mitt gets a chance to react first.
pub(crate) fn select_target(state: &mut GameState, target: PlayerId) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::SelectTarget])?;
    let pending = state.pending_play.clone().ok_or(Rejection::NothingPending)?;
    if !state.discard.contains(pending.card_id) {
        return Err(Rejection::NothingPending);
    }
    require_living(state, target)?;
    let current = current_player(state)?;

    let loops = if state.double_dip_active { 2 } else { 1 };
    state.double_dip_active = false;
    state.pending_play = None;
    state.turn_phase = TurnPhase::ResolvingCard;

    for _ in 0..loops {
        let potato = state
            .player(current)
            .and_then(|p| p.hand.iter().find(|c| c.is_potato()))
            .map(|c| c.id);
        let Some(potato) = potato else {
            break;
        };

        if target != current {
            if let Some(reaction_card) = reactions::reaction_card_for(state, target) {
                reactions::open_window(state, current, target, potato, pending.card_id, reaction_card);
                return Ok(Flow::Done);
            }
        }
        transfer_potato(state, potato, target);
    }
    Ok(finish_turn(state))
}

/// CANCEL_PLAY: take the pending card back before it resolves.
pub(crate) fn cancel_play(state: &mut GameState) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::SelectTarget])?;
    let pending = state.pending_play.take().ok_or(Rejection::NothingPending)?;
    if state.discard.top().map(|c| c.id) != Some(pending.card_id) {
        return Err(Rejection::NothingPending);
    }
    let current = current_player(state)?;

    let card = state.discard.pop_top().ok_or(Rejection::NothingPending)?;
    state
        .player_mut(current)
        .ok_or(Rejection::UnknownPlayer(current))?
        .hand
        .push(card);
    state.last_play_snapshot = pending.prior_snapshot;
    state.turn_phase = pending.return_phase;
    state.notification = None;
    Ok(Flow::Done)
}

// === Food fight ===

fn open_food_fight(state: &mut GameState) -> Result<Flow, Rejection> {
    state.food_fight_selections = OrdMap::new();
    state.double_dip_active = false;
    state.pending_play = None;
    state.turn_phase = TurnPhase::FoodFightSelect;
    state.notification = Some("FOOD FIGHT! Everyone select a card to pass.".into());

    if food_fight_complete(state) {
        Ok(complete_food_fight(state))
    } else {
        Ok(Flow::Done)
    }
}

/// Every living player with something in hand has picked.
fn food_fight_complete(state: &GameState) -> bool {
    state
        .living_players()
        .filter(|p| !p.hand.is_empty())
        .all(|p| state.food_fight_selections.contains_key(&p.id))
}

fn complete_food_fight(state: &mut GameState) -> Flow {
    resolve_food_fight(state);
    state.notification = Some("Food Fight! Cards swapped!".into());
    finish_turn(state)
}

/// SELECT_FOOD_FIGHT_CARD: record (or change) one player's pick.
pub(crate) fn select_food_fight_card(
    state: &mut GameState,
    player: PlayerId,
    card_id: CardId,
) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::FoodFightSelect])?;
    require_living(state, player)?;
    if !state.player(player).is_some_and(|p| p.hand.contains(card_id)) {
        return Err(Rejection::CardNotInHand(card_id));
    }

    state.food_fight_selections.insert(player, card_id);
    if food_fight_complete(state) {
        Ok(complete_food_fight(state))
    } else {
        Ok(Flow::Done)
    }
}
