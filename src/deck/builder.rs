//! Deck construction and the opening deal.
//!
//! ## Dealing order
//!
//! 1. Build and shuffle the full deck from the [`DeckConfig`].
//! 2. Place manual hands. A requested name is pulled from the deck, or a
//!    fresh card is made when the deck has none left; manual setups are
//!    never checked against the configured totals.
//! 3. Split what is left into potatoes and the rest; shuffle the rest.
//! 4. Seat 0 gets a potato unless a manual hand already gave it one.
//! 5. Top every hand up to the hand limit from the non-potato pile.
//! 6. Leftovers (both kinds) are shuffled together into the live deck.
//! 7. Every potato now in a hand gets a cold, unfrozen `PotatoState`.

use im::Vector;
use tracing::debug;

use crate::cards::{Card, CardIdGen, CardName};
use crate::core::config::{DeckConfig, GameSetup, HouseRules};
use crate::core::player::PlayerState;
use crate::core::rng::GameRng;
use crate::core::state::PotatoState;
use crate::zones::Pile;

/// Result of an opening deal.
#[derive(Clone, Debug)]
pub struct Deal {
    /// The roster in seating order, alive, with fresh hands.
    pub players: Vector<PlayerState>,
    pub potatoes: Vector<PotatoState>,
    pub deck: Pile,
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut GameRng) {
    rng.shuffle(items);
}

/// One card per effective count per name, shuffled.
///
/// Builds whatever the configuration asks for; START_GAME checks the size
/// against `HouseRules::max_deck_cards` first.
pub fn build_deck(config: &DeckConfig, ids: &mut CardIdGen, rng: &mut GameRng) -> Vec<Card> {
    let mut cards = Vec::with_capacity(usize::try_from(config.total_cards()).unwrap_or(0));
    for name in CardName::ALL {
        for _ in 0..config.effective_count(name) {
            cards.push(Card::new(ids.alloc(), name));
        }
    }
    shuffle(&mut cards, rng);
    cards
}

/// Deal a new game to `roster`.
///
/// Only the roster's IDs and names are used; everyone comes back alive with
/// an empty hand before dealing.
pub fn deal_game(
    roster: &[PlayerState],
    setup: &GameSetup,
    rules: &HouseRules,
    ids: &mut CardIdGen,
    rng: &mut GameRng,
) -> Deal {
    let mut deck = build_deck(&setup.config, ids, rng);
    let mut hands: Vec<Vec<Card>> = vec![Vec::new(); roster.len()];

    for (&seat, names) in &setup.initial_hands {
        let Some(hand) = hands.get_mut(seat) else {
            debug!(seat, "manual hand for an empty seat ignored");
            continue;
        };
        for &name in names {
            let card = match deck.iter().position(|c| c.name == name) {
                Some(idx) => deck.remove(idx),
                None => Card::new(ids.alloc(), name),
            };
            hand.push(card);
        }
    }

    let (mut potatoes, mut others): (Vec<Card>, Vec<Card>) =
        deck.into_iter().partition(Card::is_potato);
    shuffle(&mut others, rng);

    if let Some(first) = hands.first_mut() {
        if !first.iter().any(Card::is_potato) {
            if let Some(potato) = potatoes.pop() {
                first.push(potato);
            }
        }
    }

    for hand in &mut hands {
        while hand.len() < rules.max_hand_size {
            match others.pop() {
                Some(card) => hand.push(card),
                None => break,
            }
        }
    }

    let mut live = others;
    live.append(&mut potatoes);
    shuffle(&mut live, rng);

    let mut potato_states = Vector::new();
    let mut players = Vector::new();
    for (seated, hand) in roster.iter().zip(hands) {
        for card in hand.iter().filter(|c| c.is_potato()) {
            potato_states.push_back(PotatoState::new(card.id, seated.id, 0));
        }
        players.push_back(PlayerState::new(seated.id, seated.name.clone()).with_hand(hand.into()));
    }

    Deal {
        players,
        potatoes: potato_states,
        deck: live.into(),
    }
}
