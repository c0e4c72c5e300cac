//! Error types.
//!
//! Two families:
//!
//! - [`Rejection`]: why an action was refused. Rejections never escape
//!   `dispatch`; they turn into an unchanged state, and the player-facing
//!   ones also set the state's notification.
//! - [`ConfigError`]: parsing failures at the JSON boundary (snapshots,
//!   actions).

use thiserror::Error;

use crate::cards::{CardId, CardName};
use crate::core::player::PlayerId;
use crate::core::state::{GameStatus, TurnPhase};

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("action not valid while game is {0:?}")]
    WrongStatus(GameStatus),

    #[error("action not valid in phase {0:?}")]
    WrongPhase(TurnPhase),

    #[error("need at least {needed} players, have {seated}")]
    NotEnoughPlayers { needed: usize, seated: usize },

    #[error("lobby is full")]
    LobbyFull,

    #[error("no player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is out of the game")]
    PlayerOut(PlayerId),

    #[error("card {0} is not in the player's hand")]
    CardNotInHand(CardId),

    #[error("You can only chain a Quick Pass right now!")]
    QuickPassOnly,

    #[error("You can't use {0} without a Potato!")]
    NoPotato(CardName),

    #[error("You can't discard a Potato! Pass it with a card.")]
    PotatoNotPlayable,

    #[error("no card is waiting for a target")]
    NothingPending,

    #[error("{target} is not seated next to {defender}")]
    NotNeighbour { target: PlayerId, defender: PlayerId },

    #[error("defender no longer holds {0}")]
    ReactionCardMissing(CardName),

    #[error("action chain exceeded {0} steps")]
    ChainTooLong(usize),

    #[error("deck of {cards} cards exceeds the limit of {limit}")]
    DeckTooLarge { cards: u64, limit: u32 },
}

impl Rejection {
    /// Should the player see this rejection as a notification?
    #[must_use]
    pub fn notifies(&self) -> bool {
        matches!(
            self,
            Rejection::QuickPassOnly | Rejection::NoPotato(_) | Rejection::PotatoNotPlayable
        )
    }
}

/// Failure parsing external JSON.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player count {0} out of range")]
    PlayerCount(usize),
}
