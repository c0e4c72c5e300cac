//! Core engine types: players, state, actions, RNG, configuration.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerState};
pub use rng::{GameRng, GameRngState};
pub use config::{DeckConfig, GameSetup, HouseRules, Snapshot, MAX_PLAYERS};
pub use action::{Action, ActionRecord, ReactionResponse};
pub use state::{
    Direction, GameState, GameStatus, PendingPlay, PlaySnapshot, PotatoState, ReactionContext,
    TurnPhase,
};
