//! # potato-pressure
//!
//! Rules engine for Potato Pressure, a hot-potato card game for two or more
//! players: toppings heat the potatoes, passes and reactions move them, and
//! the holder of a potato that reaches the explosion threshold is out.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `dispatch(&GameState, Action) -> GameState`. The
//!    input state is never modified; a rejected action returns it unchanged.
//!
//! 2. **Explicit Chains**: Follow-up actions (END_TURN after a topping,
//!    target selection after Passutla) run on a bounded work-list inside
//!    `dispatch`, never by recursion, and are recorded in the history.
//!
//! 3. **Data-Driven Cards**: Behavior comes from a `CardName` to
//!    `CardDefinition` lookup, matched exhaustively by the controller.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, so the
//!   working copy each dispatch takes is cheap.
//!
//! - **Seeded Randomness**: Shuffles draw from a ChaCha RNG carried in the
//!   state, so a seed and an action list replay a game exactly.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration
//! - `cards`: Card catalogue and card instances
//! - `zones`: Ordered piles (deck, discard, hands)
//! - `deck`: Deck construction and the opening deal
//! - `rules`: Phase controller, resolution engine, legal actions
//! - `store`: Owner of the live state, JSON action intake
//! - `error`: Rejections and parse errors

pub mod core;
pub mod zones;
pub mod cards;
pub mod deck;
pub mod rules;
pub mod store;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerState,
    GameRng, GameRngState,
    DeckConfig, GameSetup, HouseRules, Snapshot,
    Action, ActionRecord, ReactionResponse,
    Direction, GameState, GameStatus, PotatoState, ReactionContext, TurnPhase,
};

pub use crate::zones::Pile;

pub use crate::cards::{Card, CardCategory, CardEffect, CardId, CardName};

pub use crate::rules::{dispatch, legal_actions, GameResult};

pub use crate::store::GameStore;

pub use crate::error::{ConfigError, Rejection};
