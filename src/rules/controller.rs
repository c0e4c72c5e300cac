//! The phase controller: `dispatch(state, action) -> state`.
//!
//! ## Chaining
//!
//! Many actions finish by triggering another: a topping play ends the turn,
//! Passutla picks its own target, the last food fight pick ends the turn.
//! Each handler returns a [`Flow`], and a follow-up action is queued on a
//! work-list instead of re-entering `dispatch`. Queued steps are validated
//! like submitted ones and recorded in the history as `chained`.
//!
//! ## Atomicity
//!
//! All steps run on one working copy. If any step is rejected the whole
//! dispatch is dropped and the caller gets back the state it passed in,
//! with only the notification (and `notice_count`) changed for
//! player-facing rejections.

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use super::{inject, plays, reactions, turn};
use crate::core::action::{Action, ActionRecord};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, GameStatus, TurnPhase};
use crate::error::Rejection;

/// Most steps one dispatch may run, the submitted action included.
pub const MAX_CHAIN: usize = 32;

/// What the controller does after a step.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Wait for the next submitted action.
    Done,
    /// Apply this action next.
    Chain(Action),
}

/// Apply an action, returning the next state.
///
/// Never fails: a rejected action returns `state` unchanged (apart from a
/// possible notification and its `notice_count` bump), with `revision`
/// untouched.
#[must_use]
pub fn dispatch(state: &GameState, action: Action) -> GameState {
    let name = action.name();
    let injected = action.is_debug();
    let mut next = state.clone();

    match run(&mut next, action) {
        Ok(steps) => {
            next.revision += 1;
            debug!(action = name, steps, revision = next.revision, "dispatch applied");
            if injected {
                info!(action = name, cards = next.total_cards(), "debug card injected");
            }
            next
        }
        Err(rejection) => {
            debug!(action = name, %rejection, "dispatch rejected");
            let mut unchanged = state.clone();
            if rejection.notifies() {
                unchanged.notification = Some(rejection.to_string());
                unchanged.notice_count += 1;
            }
            unchanged
        }
    }
}

fn run(state: &mut GameState, action: Action) -> Result<usize, Rejection> {
    let mut queue = VecDeque::from([(action, false)]);
    let mut applied = 0;

    while let Some((action, chained)) = queue.pop_front() {
        if applied == MAX_CHAIN {
            warn!(limit = MAX_CHAIN, next = action.name(), "action chain too long");
            return Err(Rejection::ChainTooLong(MAX_CHAIN));
        }

        let player = state.current_player_id;
        let turn = state.turn_number;
        let flow = apply(state, &action)?;
        applied += 1;
        trace!(action = action.name(), chained, phase = ?state.turn_phase, "step applied");

        let sequence = state.history.last().map_or(0, |r| r.sequence + 1);
        state
            .history
            .push_back(ActionRecord::new(player, action, turn, sequence, chained));
        while state.history.len() > state.rules.history_limit {
            state.history.pop_front();
        }

        if let Flow::Chain(next) = flow {
            queue.push_back((next, true));
        }
    }
    Ok(applied)
}

fn apply(state: &mut GameState, action: &Action) -> Result<Flow, Rejection> {
    match action {
        Action::JoinGame(name) => turn::join_game(state, name),
        Action::RemovePlayer(id) => turn::remove_player(state, *id),
        Action::StartGame(setup) => turn::start_game(state, setup.as_ref()),
        Action::DrawExecute(count) => plays::draw_execute(state, *count),
        Action::PlayCardInit(card_id) => plays::play_card(state, *card_id),
        Action::SelectTarget(target) => plays::select_target(state, *target),
        Action::SelectFoodFightCard { player_id, card_id } => {
            plays::select_food_fight_card(state, *player_id, *card_id)
        }
        Action::RespondToPass(response) => reactions::respond_to_pass(state, *response),
        Action::ResolveReactionTarget(target) => reactions::resolve_reaction_target(state, *target),
        Action::DiscardCard(card_id) => turn::discard_card(state, *card_id),
        Action::CancelPlay => plays::cancel_play(state),
        Action::SkipPostAction => turn::skip_post_action(state),
        Action::EndTurn => turn::end_turn(state),
        Action::Restart => turn::restart(state),
        Action::DebugAddCard { player_id, card_name } => {
            inject::add_card(state, *player_id, *card_name)
        }
        Action::DebugDrawSpecific { player_id, card_name } => {
            inject::draw_specific(state, *player_id, *card_name)
        }
    }
}

// === Guards shared by the handlers ===

pub(crate) fn require_status(state: &GameState, status: GameStatus) -> Result<(), Rejection> {
    if state.status == status {
        Ok(())
    } else {
        Err(Rejection::WrongStatus(state.status))
    }
}

/// Game is running and in one of `phases`.
pub(crate) fn require_phase(state: &GameState, phases: &[TurnPhase]) -> Result<(), Rejection> {
    require_status(state, GameStatus::Playing)?;
    if phases.contains(&state.turn_phase) {
        Ok(())
    } else {
        Err(Rejection::WrongPhase(state.turn_phase))
    }
}

pub(crate) fn current_player(state: &GameState) -> Result<PlayerId, Rejection> {
    let id = state
        .current_player_id
        .ok_or(Rejection::WrongStatus(state.status))?;
    state.seat_of(id).ok_or(Rejection::UnknownPlayer(id))?;
    Ok(id)
}

/// `id` is seated and still in the game.
pub(crate) fn require_living(state: &GameState, id: PlayerId) -> Result<(), Rejection> {
    match state.player(id) {
        None => Err(Rejection::UnknownPlayer(id)),
        Some(p) if !p.is_alive => Err(Rejection::PlayerOut(id)),
        Some(_) => Ok(()),
    }
}

/// Hand over to end-of-turn processing.
pub(crate) fn finish_turn(state: &mut GameState) -> Flow {
    state.turn_phase = TurnPhase::EndTurn;
    Flow::Chain(Action::EndTurn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardName;
    use crate::rules::testing::table;

    #[test]
    fn test_rejection_keeps_revision_and_state() {
        let state = table(&[&[CardName::Potato, CardName::Cheese], &[]]);
        let next = dispatch(&state, Action::SkipPostAction);
        assert_eq!(next, state);
    }

    #[test]
    fn test_player_facing_rejection_sets_notification_only() {
        let state = table(&[&[CardName::Potato], &[]]);
        let potato = state.players[0].hand.iter().next().unwrap().id;

        let next = dispatch(&state, Action::PlayCardInit(potato));
        assert_eq!(
            next.notification.as_deref(),
            Some("You can't discard a Potato! Pass it with a card.")
        );
        assert_eq!(next.revision, state.revision);
        assert_eq!(next.notice_count, state.notice_count + 1);
        assert_eq!(next.players, state.players);
        assert_eq!(next.history, state.history);

        // The same message again is still a visible change.
        let again = dispatch(&next, Action::PlayCardInit(potato));
        assert_eq!(again.notification, next.notification);
        assert_eq!(again.notice_count, next.notice_count + 1);

        let silent = dispatch(&again, Action::SkipPostAction);
        assert_eq!(silent, again);
    }

    #[test]
    fn test_chained_steps_are_recorded() {
        let state = table(&[&[CardName::Potato, CardName::Cheese], &[]]);
        let cheese = state.players[0].hand.find_name(CardName::Cheese).unwrap().id;
        let before = state.history.len();

        let next = dispatch(&state, Action::PlayCardInit(cheese));
        assert_eq!(next.revision, state.revision + 1);

        let new: Vec<_> = next.history.iter().skip(before).collect();
        assert_eq!(new.len(), 2);
        assert_eq!(new[0].action, Action::PlayCardInit(cheese));
        assert!(!new[0].chained);
        assert_eq!(new[1].action, Action::EndTurn);
        assert!(new[1].chained);
        assert_eq!(new[1].sequence, new[0].sequence + 1);
    }

    #[test]
    fn test_history_is_capped() {
        let mut state = table(&[&[CardName::Potato, CardName::Cheese, CardName::Butter], &[]]);
        state.rules.history_limit = 3;
        let last = state.history.last().map(|r| r.sequence);

        let cheese = state.players[0].hand.find_name(CardName::Cheese).unwrap().id;
        let next = dispatch(&state, Action::PlayCardInit(cheese));
        let next = dispatch(&next, Action::EndTurn);

        assert_eq!(next.history.len(), 3);
        let sequences: Vec<u32> = next.history.iter().map(|r| r.sequence).collect();
        let first = last.map_or(0, |s| s + 1);
        assert_eq!(sequences, [first, first + 1, first + 2]);
        assert_eq!(next.history.back().map(|r| &r.action), Some(&Action::EndTurn));
    }

    #[test]
    fn test_input_state_is_untouched() {
        let state = table(&[&[CardName::Potato, CardName::Cheese], &[]]);
        let snapshot = state.clone();
        let _ = dispatch(&state, Action::DrawExecute(1));
        assert_eq!(state, snapshot);
    }
}
