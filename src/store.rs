//! The game store: owner of the one live `GameState`.
//!
//! Presentations hold a `GameStore`, read `state()` and feed it actions,
//! either typed or as the tagged JSON the action channel carries. Every
//! accepted action replaces the state; rejected and unparseable ones leave
//! it as it was.

use tracing::warn;

use crate::core::action::Action;
use crate::core::config::HouseRules;
use crate::core::state::GameState;
use crate::rules::dispatch;

/// Single owner of the game state.
#[derive(Clone, Debug)]
pub struct GameStore {
    state: GameState,
}

impl GameStore {
    /// A store holding an empty lobby.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
        }
    }

    #[must_use]
    pub fn with_rules(seed: u64, rules: HouseRules) -> Self {
        Self {
            state: GameState::with_rules(seed, rules),
        }
    }

    /// Wrap an existing state (a restored save, a test fixture).
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply an action and return the new state.
    pub fn dispatch(&mut self, action: Action) -> &GameState {
        self.state = dispatch(&self.state, action);
        &self.state
    }

    /// Apply a tagged JSON action. Unknown tags and malformed payloads are
    /// logged and ignored.
    pub fn dispatch_json(&mut self, json: &str) -> &GameState {
        match Action::from_json(json) {
            Ok(action) => self.dispatch(action),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable action");
                &self.state
            }
        }
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
