//! Card definitions - static card data.
//!
//! Every card in the game is one of seventeen names. The name alone decides
//! the card's category, how many copies a default deck holds, its rules text
//! and what happens when it is played. All of that lives in one catalogue so
//! the phase controller dispatches on [`CardEffect`] instead of display names.

use serde::{Deserialize, Serialize};

/// Card category.
///
/// Categories drive deck composition sliders and a few rules
/// (toppings stack on potatoes, potatoes can never be played).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Topping,
    Defense,
    Movement,
    Chaos,
    Potato,
}

impl CardCategory {
    /// Sum of the catalogue defaults for this category.
    ///
    /// Group sliders scale every card of the category relative to this total.
    #[must_use]
    pub fn default_total(self) -> u32 {
        CATALOGUE
            .iter()
            .filter(|def| def.category == self)
            .map(|def| def.default_count)
            .sum()
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CardCategory::Topping => "topping",
            CardCategory::Defense => "defense",
            CardCategory::Movement => "movement",
            CardCategory::Chaos => "chaos",
            CardCategory::Potato => "potato",
        };
        f.write_str(label)
    }
}

/// What a card does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEffect {
    /// +1 topping on every unfrozen potato.
    Topping,
    /// -1 topping on every potato, then scavenge a topping from discard.
    Scoop,
    /// Freeze the potatoes held by the player.
    Freeze,
    /// Reaction only: redirect a pass to a seat neighbour.
    OvenMitt,
    /// Pass a potato to the next living player.
    Passutla,
    /// Pass a potato to any player.
    Pass,
    /// Pass a potato to any player; also usable as a reaction.
    QuickPass,
    /// Flip the turn direction.
    Reverse,
    /// Everybody passes one card to their neighbour.
    FoodFight,
    /// The next card resolves twice.
    DoubleDip,
    /// Undo the previous play's potato and direction changes.
    Rewind,
    /// The potato itself. Never played.
    Potato,
}

impl CardEffect {
    /// Does this effect move a potato (and so require holding one)?
    #[must_use]
    pub fn moves_potato(self) -> bool {
        matches!(self, CardEffect::Pass | CardEffect::Passutla | CardEffect::QuickPass)
    }
}

/// Every card name in the game.
///
/// Serialized with the printed card name (`"Sour Cream"`, `"Quick Pass"`),
/// which is also the key format of persisted deck configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardName {
    Potato,
    Cheese,
    Butter,
    #[serde(rename = "Sour Cream")]
    SourCream,
    Chives,
    Bacon,
    Chilli,
    #[serde(rename = "Oven Mitt")]
    OvenMitt,
    Scoop,
    Freeze,
    Passutla,
    Pass,
    #[serde(rename = "Quick Pass")]
    QuickPass,
    Reverse,
    #[serde(rename = "Food Fight")]
    FoodFight,
    #[serde(rename = "Double Dip")]
    DoubleDip,
    Rewind,
}

impl CardName {
    /// All names in catalogue order.
    pub const ALL: [CardName; 17] = [
        CardName::Potato,
        CardName::Cheese,
        CardName::Butter,
        CardName::SourCream,
        CardName::Chives,
        CardName::Bacon,
        CardName::Chilli,
        CardName::OvenMitt,
        CardName::Scoop,
        CardName::Freeze,
        CardName::Passutla,
        CardName::Pass,
        CardName::QuickPass,
        CardName::Reverse,
        CardName::FoodFight,
        CardName::DoubleDip,
        CardName::Rewind,
    ];

    /// Catalogue entry for this name.
    #[must_use]
    pub fn definition(self) -> &'static CardDefinition {
        // CATALOGUE is laid out in the same order as ALL.
        &CATALOGUE[self as usize]
    }

    #[must_use]
    pub fn category(self) -> CardCategory {
        self.definition().category
    }

    #[must_use]
    pub fn effect(self) -> CardEffect {
        self.definition().effect
    }

    /// Printed name.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.definition().label
    }
}

impl std::fmt::Display for CardName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for CardName {
    type Err = UnknownCardName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardName::ALL
            .into_iter()
            .find(|name| name.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCardName(s.to_string()))
    }
}

/// Returned when parsing a card name that is not in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown card name: {0:?}")]
pub struct UnknownCardName(pub String);

/// Static card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardDefinition {
    pub name: CardName,
    pub label: &'static str,
    pub category: CardCategory,
    pub effect: CardEffect,
    /// Copies in a default deck.
    pub default_count: u32,
    pub description: &'static str,
}

const fn def(
    name: CardName,
    label: &'static str,
    category: CardCategory,
    effect: CardEffect,
    default_count: u32,
    description: &'static str,
) -> CardDefinition {
    CardDefinition { name, label, category, effect, default_count, description }
}

/// The full card catalogue, indexed by `CardName as usize`.
pub static CATALOGUE: [CardDefinition; 17] = {
    use CardCategory as Cat;
    use CardEffect as Fx;
    [
        def(CardName::Potato, "Potato", Cat::Potato, Fx::Potato, 3, "Explodes with too many toppings!"),
        def(CardName::Cheese, "Cheese", Cat::Topping, Fx::Topping, 5, "+1 Topping"),
        def(CardName::Butter, "Butter", Cat::Topping, Fx::Topping, 5, "+1 Topping"),
        def(CardName::SourCream, "Sour Cream", Cat::Topping, Fx::Topping, 5, "+1 Topping"),
        def(CardName::Chives, "Chives", Cat::Topping, Fx::Topping, 5, "+1 Topping"),
        def(CardName::Bacon, "Bacon", Cat::Topping, Fx::Topping, 5, "+1 Topping"),
        def(CardName::Chilli, "Chilli", Cat::Topping, Fx::Topping, 5, "+1 Topping"),
        def(CardName::OvenMitt, "Oven Mitt", Cat::Defense, Fx::OvenMitt, 5, "Bounce a passed Potato back."),
        def(CardName::Scoop, "Scoop", Cat::Defense, Fx::Scoop, 5, "Remove 1 Topping."),
        def(CardName::Freeze, "Freeze", Cat::Defense, Fx::Freeze, 2, "No toppings allowed until next turn."),
        def(CardName::Passutla, "Passutla", Cat::Movement, Fx::Passutla, 14, "Pass Potato to Next Player."),
        def(CardName::Pass, "Pass", Cat::Movement, Fx::Pass, 4, "Pass Potato to ANY Player."),
        def(CardName::QuickPass, "Quick Pass", Cat::Movement, Fx::QuickPass, 6, "Instant pass/reflect."),
        def(CardName::Reverse, "Reverse", Cat::Movement, Fx::Reverse, 3, "Reverse turn order."),
        def(CardName::FoodFight, "Food Fight", Cat::Chaos, Fx::FoodFight, 2, "Pass hand to the left."),
        def(CardName::DoubleDip, "Double Dip", Cat::Chaos, Fx::DoubleDip, 3, "Next card resolves twice."),
        def(CardName::Rewind, "Rewind", Cat::Chaos, Fx::Rewind, 1, "Undo last action (Skip Turn)."),
    ]
};
