//! Debug actions that put named cards into hands outside the normal flow.
//!
//! Neither action touches the phase, and both may break card conservation
//! (a card that is not in the deck is made on the spot).

use tracing::debug;

use super::controller::{require_status, Flow};
use super::resolution::track_potato;
use crate::cards::{Card, CardName};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, GameStatus};
use crate::error::Rejection;

/// DEBUG_ADD_CARD: a fresh copy of `name` into `player`'s hand.
pub(crate) fn add_card(state: &mut GameState, player: PlayerId, name: CardName) -> Result<Flow, Rejection> {
    require_status(state, GameStatus::Playing)?;
    state.seat_of(player).ok_or(Rejection::UnknownPlayer(player))?;

    let card = Card::new(state.alloc_card_id(), name);
    give(state, player, card);
    Ok(Flow::Done)
}

/// DEBUG_DRAW_SPECIFIC: the topmost `name` in the deck, or a fresh copy.
pub(crate) fn draw_specific(state: &mut GameState, player: PlayerId, name: CardName) -> Result<Flow, Rejection> {
    require_status(state, GameStatus::Playing)?;
    state.seat_of(player).ok_or(Rejection::UnknownPlayer(player))?;

    let card = match state.deck.take_last(|c| c.name == name) {
        Some(card) => card,
        None => Card::new(state.alloc_card_id(), name),
    };
    give(state, player, card);
    Ok(Flow::Done)
}

fn give(state: &mut GameState, player: PlayerId, card: Card) {
    debug!(%card, %player, "card placed in hand");
    if card.is_potato() {
        let heat = state.max_heat();
        track_potato(state, card.id, player, heat);
    }
    if let Some(p) = state.player_mut(player) {
        p.hand.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Action;
    use crate::core::state::TurnPhase;
    use crate::rules::dispatch;
    use crate::rules::testing::table;

    #[test]
    fn test_add_card_synthesizes() {
        let state = table(&[&[CardName::Potato], &[]]);
        let before = state.total_cards();

        let next = dispatch(
            &state,
            Action::DebugAddCard { player_id: PlayerId(1), card_name: CardName::Rewind },
        );
        assert!(next.players[1].hand.has_name(CardName::Rewind));
        assert_eq!(next.total_cards(), before + 1);
        assert_eq!(next.turn_phase, TurnPhase::AwaitingAction);
    }

    #[test]
    fn test_added_potato_is_tracked() {
        let mut state = table(&[&[CardName::Potato], &[]]);
        state.potatoes[0].topping_count = 2;

        let next = dispatch(
            &state,
            Action::DebugAddCard { player_id: PlayerId(1), card_name: CardName::Potato },
        );
        assert_eq!(next.potatoes.len(), 2);
        let added = next.potatoes.iter().find(|p| p.holder_id == PlayerId(1)).unwrap();
        assert_eq!(added.topping_count, 2);
    }

    #[test]
    fn test_draw_specific_prefers_deck() {
        let mut state = table(&[&[CardName::Potato], &[]]);
        let freeze = Card::new(state.alloc_card_id(), CardName::Freeze);
        state.deck.push(freeze.clone());
        let cheese = Card::new(state.alloc_card_id(), CardName::Cheese);
        state.deck.push(cheese);
        let before = state.total_cards();

        let next = dispatch(
            &state,
            Action::DebugDrawSpecific { player_id: PlayerId(0), card_name: CardName::Freeze },
        );
        assert!(next.players[0].hand.contains(freeze.id));
        assert_eq!(next.deck.len(), 1);
        assert_eq!(next.total_cards(), before);

        let again = dispatch(
            &next,
            Action::DebugDrawSpecific { player_id: PlayerId(0), card_name: CardName::Freeze },
        );
        assert_eq!(again.total_cards(), before + 1);
    }

    #[test]
    fn test_debug_needs_running_game() {
        let lobby = GameState::new(0);
        let next = dispatch(
            &lobby,
            Action::DebugAddCard { player_id: PlayerId(0), card_name: CardName::Pass },
        );
        assert_eq!(next, lobby);

        let state = table(&[&[CardName::Potato], &[]]);
        let unknown = dispatch(
            &state,
            Action::DebugAddCard { player_id: PlayerId(5), card_name: CardName::Pass },
        );
        assert_eq!(unknown, state);
    }
}
