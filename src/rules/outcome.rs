//! Game results.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single survivor.
    Winner(PlayerId),
    /// Several survivors share the win.
    Winners(Vec<PlayerId>),
    /// Everyone still in the game was caught by the explosion.
    Nobody,
}

impl GameResult {
    /// Build the result from the players still alive after an explosion.
    #[must_use]
    pub fn from_survivors(mut survivors: Vec<PlayerId>) -> Self {
        match survivors.len() {
            0 => GameResult::Nobody,
            1 => GameResult::Winner(survivors.remove(0)),
            _ => GameResult::Winners(survivors),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Nobody => false,
        }
    }

    /// All winners, in seating order.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Winners(ps) => ps.clone(),
            GameResult::Nobody => Vec::new(),
        }
    }
}
