//! Card instances - the physical cards moving between piles.
//!
//! A `Card` is created once (deck build, manual setup or debug injection) and
//! never mutated afterwards. Its `id` is its identity; moving a card between
//! the deck, a hand and the discard pile relocates the same value.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::definition::{CardCategory, CardEffect, CardName};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c-{}", self.0)
    }
}

/// Sequential card ID allocator.
///
/// Lives inside the game state so synthesized cards never collide with
/// dealt ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdGen {
    next: u32,
}

impl CardIdGen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

/// A card in play.
///
/// Serializes with its catalogue `description` so a reader of the state can
/// show rules text. The description is ignored when deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: CardName,
    pub category: CardCategory,
}

impl Card {
    /// Create a card; the category comes from the catalogue.
    #[must_use]
    pub fn new(id: CardId, name: CardName) -> Self {
        Self {
            id,
            name,
            category: name.category(),
        }
    }

    /// Rules text.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.name.definition().description
    }

    #[must_use]
    pub fn effect(&self) -> CardEffect {
        self.name.effect()
    }

    #[must_use]
    pub fn is_potato(&self) -> bool {
        self.category == CardCategory::Potato
    }

    #[must_use]
    pub fn is_topping(&self) -> bool {
        self.category == CardCategory::Topping
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Card", 4)?;
        out.serialize_field("id", &self.id)?;
        out.serialize_field("name", &self.name)?;
        out.serialize_field("category", &self.category)?;
        out.serialize_field("description", self.description())?;
        out.end()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
