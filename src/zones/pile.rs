//! Ordered card piles.
//!
//! The deck, the discard pile and every hand are `Pile`s. Order follows the
//! library convention: index 0 is the bottom, the last card is the top.
//! Drawing pops the top of the deck; discarding pushes onto the top of the
//! discard pile. Hand order is only used for display.
//!
//! Backed by `im::Vector` so cloning a pile (and the game state holding it)
//! is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardName};
use crate::core::rng::GameRng;

/// An ordered stack of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Card IDs bottom to top.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    /// First card (from the bottom) with the given name.
    #[must_use]
    pub fn find_name(&self, name: CardName) -> Option<&Card> {
        self.cards.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn has_name(&self, name: CardName) -> bool {
        self.find_name(name).is_some()
    }

    #[must_use]
    pub fn has_potato(&self) -> bool {
        self.cards.iter().any(Card::is_potato)
    }

    /// The top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Push onto the top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove and return the top card.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Remove a card by ID.
    pub fn take(&mut self, id: CardId) -> Option<Card> {
        let idx = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(idx))
    }

    /// Remove the top-most card matching a predicate.
    pub fn take_last(&mut self, pred: impl Fn(&Card) -> bool) -> Option<Card> {
        let idx = self.cards.iter().rposition(pred)?;
        Some(self.cards.remove(idx))
    }

    /// Empty the pile, returning its cards bottom to top.
    pub fn drain(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards = self.drain();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Card>> for Pile {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().collect()
    }
}
