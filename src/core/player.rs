//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Allocated sequentially when a player joins the lobby and stable for the
//! lifetime of the game. IDs are never reused after a removal, so an ID is
//! not a seat index: seating order is the order of `GameState::players`.
//!
//! ## PlayerState
//!
//! Name, alive flag and hand. Dead players keep their hand for the
//! end-of-game record.

use serde::{Deserialize, Serialize};

use crate::zones::Pile;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p-{}", self.0)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub is_alive: bool,
    pub hand: Pile,
}

impl PlayerState {
    /// A living player with an empty hand.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_alive: true,
            hand: Pile::new(),
        }
    }

    /// Replace the hand (builder pattern).
    #[must_use]
    pub fn with_hand(mut self, hand: Pile) -> Self {
        self.hand = hand;
        self
    }

    #[must_use]
    pub fn holds_potato(&self) -> bool {
        self.hand.has_potato()
    }
}
