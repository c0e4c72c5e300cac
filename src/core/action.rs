//! Player actions.
//!
//! One tagged enum carries every action kind with its own payload shape. On
//! the wire an action is `{"type": "PLAY_CARD_INIT", "payload": 12}`; unit
//! actions may omit the payload.
//!
//! ```
//! use potato_pressure::core::Action;
//! use potato_pressure::cards::CardId;
//!
//! let action = Action::from_json(r#"{"type":"PLAY_CARD_INIT","payload":12}"#).unwrap();
//! assert_eq!(action, Action::PlayCardInit(CardId(12)));
//! ```

use serde::{Deserialize, Serialize};

use super::config::GameSetup;
use super::player::PlayerId;
use crate::cards::{CardId, CardName};
use crate::error::ConfigError;

/// How a targeted defender answers a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionResponse {
    /// Quick Pass: send it back to the passer. Oven Mitt: bounce to a neighbour.
    Reflect,
    /// Quick Pass: send it on past the defender. Oven Mitt: bounce to a neighbour.
    PassForward,
    /// Take the potato.
    Decline,
}

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Seat a player (lobby only).
    JoinGame(String),
    /// Unseat a player (lobby only).
    RemovePlayer(PlayerId),
    /// Deal and begin. Also redeals from a finished or running game.
    StartGame(Option<GameSetup>),
    /// Draw up to `n` cards, then end the turn.
    DrawExecute(u32),
    /// Commit a card from the current player's hand.
    PlayCardInit(CardId),
    /// Choose who receives the pending pass.
    SelectTarget(PlayerId),
    /// One player's pick for the food fight.
    #[serde(rename_all = "camelCase")]
    SelectFoodFightCard { player_id: PlayerId, card_id: CardId },
    RespondToPass(ReactionResponse),
    /// Oven Mitt bounce target.
    ResolveReactionTarget(PlayerId),
    /// Discard down to the hand limit.
    DiscardCard(CardId),
    /// Take back a Pass or Quick Pass before choosing a target.
    CancelPlay,
    /// Decline the Quick Pass chain window.
    SkipPostAction,
    EndTurn,
    /// Back to an empty lobby.
    Restart,
    /// Put a fresh copy of a card into a hand.
    #[serde(rename_all = "camelCase")]
    DebugAddCard { player_id: PlayerId, card_name: CardName },
    /// Move a named card from the deck into a hand (fresh copy if none left).
    #[serde(rename_all = "camelCase")]
    DebugDrawSpecific { player_id: PlayerId, card_name: CardName },
}

impl Action {
    /// Parse a tagged JSON action.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Wire tag, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::JoinGame(_) => "JOIN_GAME",
            Action::RemovePlayer(_) => "REMOVE_PLAYER",
            Action::StartGame(_) => "START_GAME",
            Action::DrawExecute(_) => "DRAW_EXECUTE",
            Action::PlayCardInit(_) => "PLAY_CARD_INIT",
            Action::SelectTarget(_) => "SELECT_TARGET",
            Action::SelectFoodFightCard { .. } => "SELECT_FOOD_FIGHT_CARD",
            Action::RespondToPass(_) => "RESPOND_TO_PASS",
            Action::ResolveReactionTarget(_) => "RESOLVE_REACTION_TARGET",
            Action::DiscardCard(_) => "DISCARD_CARD",
            Action::CancelPlay => "CANCEL_PLAY",
            Action::SkipPostAction => "SKIP_POST_ACTION",
            Action::EndTurn => "END_TURN",
            Action::Restart => "RESTART",
            Action::DebugAddCard { .. } => "DEBUG_ADD_CARD",
            Action::DebugDrawSpecific { .. } => "DEBUG_DRAW_SPECIFIC",
        }
    }

    /// Debug actions are allowed to create cards.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        matches!(self, Action::DebugAddCard { .. } | Action::DebugDrawSpecific { .. })
    }
}

/// A recorded action with metadata for history tracking.
///
/// Every applied step is recorded, including steps the controller chained
/// internally (a Passutla's target selection, the END_TURN after a topping).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Current player when the step was applied (none in the lobby).
    pub player: Option<PlayerId>,

    pub action: Action,

    /// Turn number when the step was applied.
    pub turn: u32,

    /// Position in the game's history.
    pub sequence: u32,

    /// Produced by the controller rather than submitted.
    pub chained: bool,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: Option<PlayerId>, action: Action, turn: u32, sequence: u32, chained: bool) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
            chained,
        }
    }
}
