//! Legal action enumeration.
//!
//! Lists the player actions `dispatch` accepts in a state. Lifecycle
//! controls (RESTART, a redealing START_GAME) are only listed once the game
//! is over, and debug actions are never listed.

use super::reactions::reaction_card_for;
use super::resolution::seat_neighbours;
use crate::cards::CardName;
use crate::core::action::{Action, ReactionResponse};
use crate::core::config::MAX_PLAYERS;
use crate::core::player::PlayerState;
use crate::core::state::{GameState, GameStatus, TurnPhase};

/// Actions accepted in `state`, in a stable order.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    match state.status {
        GameStatus::Lobby => lobby_actions(state),
        GameStatus::GameOver => vec![Action::StartGame(None), Action::Restart],
        GameStatus::Playing => playing_actions(state),
    }
}

fn lobby_actions(state: &GameState) -> Vec<Action> {
    let mut actions = Vec::new();
    if state.players.len() >= state.rules.min_players {
        actions.push(Action::StartGame(None));
    }
    if state.players.len() < MAX_PLAYERS {
        actions.push(Action::JoinGame(format!("Player {}", state.players.len() + 1)));
    }
    actions.extend(state.players.iter().map(|p| Action::RemovePlayer(p.id)));
    actions
}

fn playing_actions(state: &GameState) -> Vec<Action> {
    let Some(current) = state.current_player() else {
        return Vec::new();
    };

    match state.turn_phase {
        TurnPhase::AwaitingAction => {
            let mut actions = vec![Action::DrawExecute(1), Action::EndTurn];
            actions.extend(playable(current, |_| true));
            actions
        }
        TurnPhase::PostAction => {
            let mut actions = vec![Action::SkipPostAction];
            actions.extend(playable(current, |name| name == CardName::QuickPass));
            actions
        }
        TurnPhase::SelectTarget => {
            let mut actions: Vec<Action> = state
                .living_players()
                .map(|p| Action::SelectTarget(p.id))
                .collect();
            actions.push(Action::CancelPlay);
            actions
        }
        TurnPhase::FoodFightSelect => state
            .living_players()
            .filter(|p| !state.food_fight_selections.contains_key(&p.id))
            .flat_map(|p| {
                p.hand.iter().map(move |c| Action::SelectFoodFightCard {
                    player_id: p.id,
                    card_id: c.id,
                })
            })
            .collect(),
        TurnPhase::AwaitingReaction => {
            let armed = state
                .reaction_context
                .as_ref()
                .is_some_and(|ctx| reaction_card_for(state, ctx.defender_id).is_some());
            let mut actions = vec![Action::RespondToPass(ReactionResponse::Decline)];
            if armed {
                actions.push(Action::RespondToPass(ReactionResponse::Reflect));
                actions.push(Action::RespondToPass(ReactionResponse::PassForward));
            }
            actions
        }
        TurnPhase::SelectingReactionTarget => state
            .reaction_context
            .as_ref()
            .map(|ctx| {
                seat_neighbours(state, ctx.defender_id)
                    .into_iter()
                    .map(Action::ResolveReactionTarget)
                    .collect()
            })
            .unwrap_or_default(),
        TurnPhase::Discarding => current
            .hand
            .iter()
            .filter(|c| !c.is_potato())
            .map(|c| Action::DiscardCard(c.id))
            .collect(),
        TurnPhase::ResolvingCard | TurnPhase::EndTurn => vec![Action::EndTurn],
    }
}

/// PLAY_CARD_INIT for every card `player` could commit.
fn playable(player: &PlayerState, allowed: impl Fn(CardName) -> bool) -> Vec<Action> {
    let holds_potato = player.holds_potato();
    player
        .hand
        .iter()
        .filter(|c| !c.is_potato() && allowed(c.name))
        .filter(|c| holds_potato || !c.effect().moves_potato())
        .map(|c| Action::PlayCardInit(c.id))
        .collect()
}
