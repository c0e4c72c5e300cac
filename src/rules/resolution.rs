//! State transforms with no phase awareness.
//!
//! Everything here works on the controller's working copy of the state and
//! keeps the potato bookkeeping intact: whenever a potato card changes hands
//! its `PotatoState::holder_id` follows, and a potato card entering a hand
//! from the deck gets a `PotatoState`.
//!
//! ## Turn order
//!
//! Seating order is fixed. Clockwise walks seat indexes upward, counter-
//! clockwise downward, both wrapping and skipping dead players.
//! [`seat_neighbours`] ignores direction: "left" is the next seat up and
//! "right" the next seat down.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{Card, CardId};
use crate::core::player::PlayerId;
use crate::core::state::{Direction, GameState, PotatoState};

// === Turn order ===

/// Next living player after `from` in the current direction.
///
/// Returns `from` when nobody else is alive (or `from` is not seated).
#[must_use]
pub fn next_player_from(state: &GameState, from: PlayerId) -> PlayerId {
    let n = state.players.len();
    let Some(seat) = state.seat_of(from) else {
        return from;
    };
    (1..n)
        .map(|steps| &state.players[state.direction.step(seat, steps, n)])
        .find(|p| p.is_alive)
        .map_or(from, |p| p.id)
}

/// Next living player after the current one.
#[must_use]
pub fn next_player_id(state: &GameState) -> Option<PlayerId> {
    state.current_player_id.map(|current| next_player_from(state, current))
}

/// Nearest living player on each side of `player`, left first.
///
/// With two players left the single other player appears once.
#[must_use]
pub fn seat_neighbours(state: &GameState, player: PlayerId) -> SmallVec<[PlayerId; 2]> {
    let mut out = SmallVec::new();
    let n = state.players.len();
    let Some(seat) = state.seat_of(player) else {
        return out;
    };

    for side in [Direction::Clockwise, Direction::Counterclockwise] {
        let found = (1..n)
            .map(|steps| &state.players[side.step(seat, steps, n)])
            .find(|p| p.is_alive && p.id != player);
        if let Some(neighbour) = found {
            if !out.contains(&neighbour.id) {
                out.push(neighbour.id);
            }
        }
    }
    out
}

// === Cards ===

/// Draw one card for `player`, reshuffling the discard pile into an empty
/// deck first. `None` when both piles are empty or the player is unknown.
pub fn draw_card(state: &mut GameState, player: PlayerId) -> Option<CardId> {
    state.seat_of(player)?;

    if state.deck.is_empty() {
        if state.discard.is_empty() {
            return None;
        }
        let mut deck = std::mem::take(&mut state.discard);
        deck.shuffle(&mut state.rng);
        state.deck = deck;
        debug!(cards = state.deck.len(), "discard reshuffled into deck");
    }

    let card = state.deck.pop_top()?;
    let id = card.id;
    if card.is_potato() {
        let heat = state.max_heat();
        track_potato(state, id, player, heat);
    }
    if let Some(holder) = state.player_mut(player) {
        holder.hand.push(card);
    }
    Some(id)
}

/// Draw until `player` holds the hand limit, giving up after the refill
/// attempt cap or on an empty draw. Returns the number of cards drawn.
pub fn refill_hand(state: &mut GameState, player: PlayerId) -> usize {
    let limit = state.rules.max_hand_size;
    let mut drawn = 0;
    for _ in 0..state.rules.refill_attempt_cap {
        match state.player(player) {
            Some(p) if p.hand.len() < limit => {}
            _ => break,
        }
        if draw_card(state, player).is_none() {
            break;
        }
        drawn += 1;
    }
    drawn
}

/// Move a card from `player`'s hand to the top of the discard pile.
pub fn discard_from_hand(state: &mut GameState, player: PlayerId, card_id: CardId) -> Option<Card> {
    let card = state.player_mut(player)?.hand.take(card_id)?;
    state.discard.push(card.clone());
    Some(card)
}

// === Potatoes ===

/// Start tracking a potato card that just entered `holder`'s hand.
pub fn track_potato(state: &mut GameState, id: CardId, holder: PlayerId, heat: u32) {
    state.potatoes.retain(|p| p.id != id);
    state.potatoes.push_back(PotatoState::new(id, holder, heat));
}

/// Move a potato card into `to`'s hand and point its state at `to`.
///
/// Passing to the current holder only normalizes `holder_id`. Returns false
/// when the potato is in no hand or `to` is not seated.
pub fn transfer_potato(state: &mut GameState, potato_id: CardId, to: PlayerId) -> bool {
    if state.seat_of(to).is_none() {
        return false;
    }
    let Some(from) = state
        .players
        .iter()
        .find(|p| p.hand.contains(potato_id))
        .map(|p| p.id)
    else {
        return false;
    };

    if from != to {
        let Some(card) = state.player_mut(from).and_then(|p| p.hand.take(potato_id)) else {
            return false;
        };
        if let Some(target) = state.player_mut(to) {
            target.hand.push(card);
        }
    }

    for potato in state.potatoes.iter_mut().filter(|p| p.id == potato_id) {
        potato.holder_id = to;
    }
    debug!(potato = %potato_id, %from, %to, "potato transferred");
    true
}

/// Re-derive every `holder_id` from the hand that holds the card.
///
/// States for potatoes no longer in any hand are dropped; potato cards in a
/// hand without a state are tracked at the current heat.
pub fn resync_potato_holders(state: &mut GameState) {
    let players = state.players.clone();
    let holder_of = |id: CardId| players.iter().find(|p| p.hand.contains(id)).map(|p| p.id);

    state.potatoes.retain(|p| holder_of(p.id).is_some());
    for potato in state.potatoes.iter_mut() {
        if let Some(holder) = holder_of(potato.id) {
            potato.holder_id = holder;
        }
    }

    let heat = state.max_heat();
    for player in players.iter() {
        for card in player.hand.iter().filter(|c| c.is_potato()) {
            if state.potato(card.id).is_none() {
                track_potato(state, card.id, player.id, heat);
            }
        }
    }
}

/// Give the current player a cold potato from the deck (preferred) or the
/// discard pile. False, with nothing changed, when no potato card is found.
pub fn respawn_potato(state: &mut GameState) -> bool {
    let Some(current) = state.current_player_id else {
        return false;
    };
    if state.seat_of(current).is_none() {
        return false;
    }
    let Some(card) = state
        .deck
        .take_last(Card::is_potato)
        .or_else(|| state.discard.take_last(Card::is_potato))
    else {
        return false;
    };

    let id = card.id;
    if let Some(holder) = state.player_mut(current) {
        holder.hand.push(card);
    }
    track_potato(state, id, current, 0);
    true
}

// === Explosion ===

/// Topping count at which a potato explodes.
#[must_use]
pub fn explosion_threshold(state: &GameState) -> u32 {
    state.rules.explosion_base + state.living_count() as u32
}

/// Does any potato sit at or above the threshold?
#[must_use]
pub fn check_explosion(state: &GameState) -> bool {
    let threshold = explosion_threshold(state);
    state.potatoes.iter().any(|p| p.topping_count >= threshold)
}

/// Holders of exploding potatoes, in seating order.
#[must_use]
pub fn exploding_holders(state: &GameState) -> SmallVec<[PlayerId; 4]> {
    let threshold = explosion_threshold(state);
    let holders: FxHashSet<PlayerId> = state
        .potatoes
        .iter()
        .filter(|p| p.topping_count >= threshold)
        .map(|p| p.holder_id)
        .collect();
    state
        .players
        .iter()
        .filter(|p| holders.contains(&p.id))
        .map(|p| p.id)
        .collect()
}

// === Food fight ===

/// Every living player's pick moves one living seat in the current
/// direction, all at once.
///
/// Picks are taken out of every hand before any card is handed on, so no
/// player's pick depends on what they receive. Selections are cleared.
pub fn resolve_food_fight(state: &mut GameState) {
    let selections = std::mem::take(&mut state.food_fight_selections);
    let living: Vec<PlayerId> = state.living_players().map(|p| p.id).collect();
    let n = living.len();
    if n == 0 {
        return;
    }

    let mut incoming: FxHashMap<PlayerId, Card> = FxHashMap::default();
    for (seat, &player) in living.iter().enumerate() {
        let Some(&card_id) = selections.get(&player) else {
            continue;
        };
        if let Some(card) = state.player_mut(player).and_then(|p| p.hand.take(card_id)) {
            incoming.insert(living[state.direction.step(seat, 1, n)], card);
        }
    }

    let moved = incoming.len();
    for (receiver, card) in incoming {
        if let Some(p) = state.player_mut(receiver) {
            p.hand.push(card);
        }
    }
    resync_potato_holders(state);
    debug!(moved, "food fight resolved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardName;
    use crate::rules::testing::table;

    #[test]
    fn test_next_player_wraps_both_ways() {
        let mut state = table(&[&[CardName::Potato], &[], &[]]);
        assert_eq!(next_player_id(&state), Some(PlayerId(1)));
        assert_eq!(next_player_from(&state, PlayerId(2)), PlayerId(0));

        state.direction = Direction::Counterclockwise;
        assert_eq!(next_player_id(&state), Some(PlayerId(2)));
    }

    #[test]
    fn test_next_player_skips_dead() {
        let mut state = table(&[&[CardName::Potato], &[], &[], &[]]);
        state.player_mut(PlayerId(1)).unwrap().is_alive = false;
        assert_eq!(next_player_id(&state), Some(PlayerId(2)));

        for id in 1..4 {
            state.player_mut(PlayerId(id)).unwrap().is_alive = false;
        }
        assert_eq!(next_player_id(&state), Some(PlayerId(0)));
    }

    #[test]
    fn test_seat_neighbours_ignore_direction() {
        let mut state = table(&[&[CardName::Potato], &[], &[], &[]]);
        assert_eq!(seat_neighbours(&state, PlayerId(0)).as_slice(), &[PlayerId(1), PlayerId(3)]);

        state.direction = Direction::Counterclockwise;
        assert_eq!(seat_neighbours(&state, PlayerId(0)).as_slice(), &[PlayerId(1), PlayerId(3)]);

        state.player_mut(PlayerId(3)).unwrap().is_alive = false;
        assert_eq!(seat_neighbours(&state, PlayerId(0)).as_slice(), &[PlayerId(1), PlayerId(2)]);
    }

    #[test]
    fn test_two_players_have_one_neighbour() {
        let state = table(&[&[CardName::Potato], &[]]);
        assert_eq!(seat_neighbours(&state, PlayerId(0)).as_slice(), &[PlayerId(1)]);
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut state = table(&[&[CardName::Potato], &[CardName::Cheese, CardName::Bacon]]);
        let cheese = state.players[1].hand.find_name(CardName::Cheese).unwrap().id;
        discard_from_hand(&mut state, PlayerId(1), cheese).unwrap();
        let before = state.total_cards();

        assert!(state.deck.is_empty());
        assert_eq!(draw_card(&mut state, PlayerId(0)), Some(cheese));
        assert!(state.discard.is_empty());
        assert_eq!(state.total_cards(), before);

        assert_eq!(draw_card(&mut state, PlayerId(0)), None);
    }

    #[test]
    fn test_drawn_potato_inherits_heat() {
        let mut state = table(&[&[CardName::Potato], &[]]);
        state.potatoes[0].topping_count = 2;
        let spare = Card::new(state.alloc_card_id(), CardName::Potato);
        let spare_id = spare.id;
        state.deck.push(spare);

        draw_card(&mut state, PlayerId(1));
        let drawn = state.potato(spare_id).unwrap();
        assert_eq!(drawn.topping_count, 2);
        assert_eq!(drawn.holder_id, PlayerId(1));
    }

    #[test]
    fn test_refill_stops_at_limit_and_on_empty_deck() {
        let mut state = table(&[&[CardName::Potato], &[]]);
        for _ in 0..6 {
            let card = Card::new(state.alloc_card_id(), CardName::Pass);
            state.deck.push(card);
        }
        assert_eq!(refill_hand(&mut state, PlayerId(0)), 3);
        assert_eq!(refill_hand(&mut state, PlayerId(1)), 3);
        assert!(state.deck.is_empty());
        assert_eq!(state.players[1].hand.len(), 3);
    }

    #[test]
    fn test_transfer_and_self_transfer() {
        let mut state = table(&[&[CardName::Potato], &[]]);
        let potato = state.potatoes[0].id;

        assert!(transfer_potato(&mut state, potato, PlayerId(1)));
        assert!(state.players[1].holds_potato());
        assert!(!state.players[0].holds_potato());
        assert_eq!(state.potatoes[0].holder_id, PlayerId(1));

        state.potatoes[0].holder_id = PlayerId(0);
        assert!(transfer_potato(&mut state, potato, PlayerId(1)));
        assert_eq!(state.potatoes[0].holder_id, PlayerId(1));
        assert_eq!(state.players[1].hand.len(), 1);

        assert!(!transfer_potato(&mut state, potato, PlayerId(7)));
    }

    #[test]
    fn test_threshold_tracks_living_players() {
        let mut state = table(&[&[CardName::Potato], &[]]);
        assert_eq!(explosion_threshold(&state), 3);
        state.potatoes[0].topping_count = 2;
        assert!(!check_explosion(&state));
        state.potatoes[0].topping_count = 3;
        assert!(check_explosion(&state));
        assert_eq!(exploding_holders(&state).as_slice(), &[PlayerId(0)]);

        let five = table(&[&[CardName::Potato], &[], &[], &[], &[]]);
        assert_eq!(explosion_threshold(&five), 6);
    }

    #[test]
    fn test_respawn_prefers_deck() {
        let mut state = table(&[&[CardName::Cheese], &[]]);
        assert!(!respawn_potato(&mut state));

        let in_discard = Card::new(state.alloc_card_id(), CardName::Potato);
        state.discard.push(in_discard.clone());
        let in_deck = Card::new(state.alloc_card_id(), CardName::Potato);
        state.deck.push(in_deck.clone());

        assert!(respawn_potato(&mut state));
        assert!(state.players[0].hand.contains(in_deck.id));
        assert_eq!(state.potato(in_deck.id).unwrap().topping_count, 0);

        assert!(respawn_potato(&mut state));
        assert!(state.players[0].hand.contains(in_discard.id));
    }

    #[test]
    fn test_food_fight_rotates_simultaneously() {
        let mut state = table(&[
            &[CardName::Potato, CardName::Cheese],
            &[CardName::Bacon],
            &[CardName::Chives],
        ]);
        let pick = |state: &GameState, seat: usize, name| {
            state.players[seat].hand.find_name(name).unwrap().id
        };
        let potato = pick(&state, 0, CardName::Potato);
        let bacon = pick(&state, 1, CardName::Bacon);
        let chives = pick(&state, 2, CardName::Chives);
        state.food_fight_selections.insert(PlayerId(0), potato);
        state.food_fight_selections.insert(PlayerId(1), bacon);
        state.food_fight_selections.insert(PlayerId(2), chives);
        let before = state.total_cards();

        resolve_food_fight(&mut state);

        assert!(state.players[1].hand.contains(potato));
        assert!(state.players[2].hand.contains(bacon));
        assert!(state.players[0].hand.contains(chives));
        assert_eq!(state.potato(potato).unwrap().holder_id, PlayerId(1));
        assert!(state.food_fight_selections.is_empty());
        assert_eq!(state.total_cards(), before);
    }

    #[test]
    fn test_food_fight_counterclockwise_skips_dead() {
        let mut state = table(&[&[CardName::Potato], &[CardName::Bacon], &[CardName::Chives], &[CardName::Butter]]);
        state.direction = Direction::Counterclockwise;
        state.player_mut(PlayerId(3)).unwrap().is_alive = false;
        let chives = state.players[2].hand.find_name(CardName::Chives).unwrap().id;
        state.food_fight_selections.insert(PlayerId(2), chives);

        resolve_food_fight(&mut state);
        assert!(state.players[1].hand.contains(chives));
    }
}
