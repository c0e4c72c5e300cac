//! Reaction windows.
//!
//! A pass aimed at a player holding Quick Pass or Oven Mitt pauses in
//! `AwaitingReaction`. Quick Pass wins when the defender holds both.
//!
//! - DECLINE: the defender takes the potato.
//! - Quick Pass: REFLECT returns it to the passer, PASS_FORWARD sends it to
//!   the next living player after the defender.
//! - Oven Mitt: either non-decline answer opens `SelectingReactionTarget`,
//!   and the defender bounces the potato to a seat neighbour.
//!
//! Using a reaction card discards it and refills the defender's hand before
//! the potato moves.

use tracing::debug;

use super::controller::{finish_turn, require_phase, Flow};
use super::resolution::{discard_from_hand, next_player_from, refill_hand, seat_neighbours, transfer_potato};
use crate::cards::{CardId, CardName};
use crate::core::action::ReactionResponse;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, ReactionContext, TurnPhase};
use crate::error::Rejection;

/// The card `defender` would react with, if any.
#[must_use]
pub fn reaction_card_for(state: &GameState, defender: PlayerId) -> Option<CardName> {
    let hand = &state.player(defender)?.hand;
    [CardName::QuickPass, CardName::OvenMitt]
        .into_iter()
        .find(|&name| hand.has_name(name))
}

pub(crate) fn open_window(
    state: &mut GameState,
    initiator: PlayerId,
    defender: PlayerId,
    potato: CardId,
    original_card: CardId,
    reaction_card: CardName,
) {
    let name = state.player(defender).map(|p| p.name.clone()).unwrap_or_default();
    state.reaction_context = Some(ReactionContext {
        initiator_id: initiator,
        defender_id: defender,
        potato_id: potato,
        original_card_id: original_card,
        reaction_card,
    });
    state.turn_phase = TurnPhase::AwaitingReaction;
    state.notification = Some(format!("{name}, use {reaction_card}?"));
    debug!(%initiator, %defender, %reaction_card, "reaction window opened");
}

/// RESPOND_TO_PASS.
pub(crate) fn respond_to_pass(state: &mut GameState, response: ReactionResponse) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::AwaitingReaction])?;
    let context = state.reaction_context.clone().ok_or(Rejection::NothingPending)?;

    if response == ReactionResponse::Decline {
        transfer_potato(state, context.potato_id, context.defender_id);
        state.reaction_context = None;
        return Ok(finish_turn(state));
    }

    let reaction_card = state
        .player(context.defender_id)
        .ok_or(Rejection::UnknownPlayer(context.defender_id))?
        .hand
        .find_name(context.reaction_card)
        .map(|c| c.id)
        .ok_or(Rejection::ReactionCardMissing(context.reaction_card))?;
    discard_from_hand(state, context.defender_id, reaction_card);
    refill_hand(state, context.defender_id);

    match context.reaction_card {
        CardName::QuickPass => {
            let to = match response {
                ReactionResponse::PassForward => next_player_from(state, context.defender_id),
                _ => context.initiator_id,
            };
            transfer_potato(state, context.potato_id, to);
            state.reaction_context = None;
            Ok(finish_turn(state))
        }
        _ => {
            state.turn_phase = TurnPhase::SelectingReactionTarget;
            state.notification = Some("Select Left or Right to pass!".into());
            Ok(Flow::Done)
        }
    }
}

/// RESOLVE_REACTION_TARGET: finish an Oven Mitt bounce.
pub(crate) fn resolve_reaction_target(state: &mut GameState, target: PlayerId) -> Result<Flow, Rejection> {
    require_phase(state, &[TurnPhase::SelectingReactionTarget])?;
    let context = state.reaction_context.clone().ok_or(Rejection::NothingPending)?;
    if !seat_neighbours(state, context.defender_id).contains(&target) {
        return Err(Rejection::NotNeighbour {
            target,
            defender: context.defender_id,
        });
    }

    transfer_potato(state, context.potato_id, target);
    state.reaction_context = None;
    Ok(finish_turn(state))
}
