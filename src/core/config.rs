//! Game configuration types.
//!
//! - `HouseRules`: hand size, explosion base and refill guard
//! - `DeckConfig`: deck composition (group sliders or per-card overrides)
//! - `GameSetup`: the START_GAME payload (deck config plus manual hands)
//! - `Snapshot`: the persisted test-setup format owned by debug tooling
//!
//! All of these are plain serde types with defaults, so a partially filled
//! JSON object is always accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{CardCategory, CardName};
use crate::error::ConfigError;

/// Most players a lobby can seat (player IDs are `u8`).
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Fixed rule parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseRules {
    /// Hands are refilled to (and discarded down to) this size.
    pub max_hand_size: usize,

    /// Explosion threshold is `explosion_base + living players`.
    pub explosion_base: u32,

    /// Most draw attempts a single refill makes.
    pub refill_attempt_cap: usize,

    /// Players needed to start.
    pub min_players: usize,

    /// Largest deck a configuration may build. START_GAME refuses anything
    /// bigger.
    pub max_deck_cards: u32,

    /// History entries kept; the oldest are dropped past this.
    pub history_limit: usize,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            max_hand_size: 4,
            explosion_base: 1,
            refill_attempt_cap: 10,
            min_players: 2,
            max_deck_cards: 1000,
            history_limit: 2048,
        }
    }
}

/// Deck composition.
///
/// The colour names follow the slider colours of the setup panel:
/// red = movement, blue = defense, green = toppings (per topping name),
/// yellow = chaos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckConfig {
    /// Total movement cards, split proportionally.
    pub red_count: u32,
    /// Total defense cards, split proportionally.
    pub blue_count: u32,
    /// Copies of each topping name.
    pub green_count: u32,
    /// Total chaos cards, split proportionally.
    pub yellow_count: u32,
    /// Potato cards.
    pub potato_count: u32,
    /// Use `card_counts` overrides where present.
    pub advanced_mode: bool,
    /// Per-name overrides (advanced mode only).
    pub card_counts: BTreeMap<CardName, u32>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            red_count: CardCategory::Movement.default_total(),
            blue_count: CardCategory::Defense.default_total(),
            green_count: CardName::Cheese.definition().default_count,
            yellow_count: CardCategory::Chaos.default_total(),
            potato_count: CardName::Potato.definition().default_count,
            advanced_mode: false,
            card_counts: BTreeMap::new(),
        }
    }
}

impl DeckConfig {
    /// A configuration producing no cards; hands then come only from
    /// manual setup.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            red_count: 0,
            blue_count: 0,
            green_count: 0,
            yellow_count: 0,
            potato_count: 0,
            advanced_mode: false,
            card_counts: BTreeMap::new(),
        }
    }

    /// Enable advanced mode with a per-name override (builder pattern).
    #[must_use]
    pub fn with_card_count(mut self, name: CardName, count: u32) -> Self {
        self.advanced_mode = true;
        self.card_counts.insert(name, count);
        self
    }

    /// How many copies of `name` this configuration puts in the deck.
    #[must_use]
    pub fn effective_count(&self, name: CardName) -> u32 {
        if self.advanced_mode {
            if let Some(&count) = self.card_counts.get(&name) {
                return count;
            }
        }

        let def = name.definition();
        let scaled = |group_count: u32| {
            let base = def.category.default_total();
            if base == 0 {
                return 0;
            }
            let ratio = f64::from(group_count) / f64::from(base);
            (f64::from(def.default_count) * ratio).round() as u32
        };

        match def.category {
            CardCategory::Potato => self.potato_count,
            CardCategory::Topping => self.green_count,
            CardCategory::Defense => scaled(self.blue_count),
            CardCategory::Movement => scaled(self.red_count),
            CardCategory::Chaos => scaled(self.yellow_count),
        }
    }

    /// Total cards a deck built from this configuration holds.
    ///
    /// Summed in `u64`: seventeen `u32` counts cannot overflow it.
    #[must_use]
    pub fn total_cards(&self) -> u64 {
        CardName::ALL
            .into_iter()
            .map(|name| u64::from(self.effective_count(name)))
            .sum()
    }
}

/// START_GAME payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSetup {
    pub config: DeckConfig,

    /// Seat players named `Player N` until the lobby holds this many.
    pub player_count: Option<usize>,

    /// Seat index -> card names placed in that hand before dealing.
    pub initial_hands: BTreeMap<usize, Vec<CardName>>,
}

impl GameSetup {
    #[must_use]
    pub fn with_config(mut self, config: DeckConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = Some(count);
        self
    }

    /// Add a manual hand for a seat (builder pattern).
    #[must_use]
    pub fn with_hand(mut self, seat: usize, cards: Vec<CardName>) -> Self {
        self.initial_hands.insert(seat, cards);
        self
    }
}

/// Persisted test setup: `{name, date, config, playerCount, initialHands}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    /// Free-form timestamp written by the saving tool.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub config: DeckConfig,
    pub player_count: usize,
    #[serde(default)]
    pub initial_hands: BTreeMap<usize, Vec<CardName>>,
}

impl Snapshot {
    /// Parse a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.player_count == 0 || snapshot.player_count > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount(snapshot.player_count));
        }
        Ok(snapshot)
    }

    /// Parse a list of snapshots (the stored preset collection).
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        let snapshots: Vec<Snapshot> = serde_json::from_str(json)?;
        if let Some(bad) = snapshots
            .iter()
            .find(|s| s.player_count == 0 || s.player_count > MAX_PLAYERS)
        {
            return Err(ConfigError::PlayerCount(bad.player_count));
        }
        Ok(snapshots)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The START_GAME payload this snapshot describes.
    #[must_use]
    pub fn setup(&self) -> GameSetup {
        GameSetup {
            config: self.config.clone(),
            player_count: Some(self.player_count),
            initial_hands: self.initial_hands.clone(),
        }
    }
}
