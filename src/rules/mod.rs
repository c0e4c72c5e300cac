//! Game rules.
//!
//! - `controller`: `dispatch`, the single transition function
//! - `plays`, `reactions`, `turn`, `inject`: one handler per action
//! - `resolution`: phase-free state transforms (draws, transfers, explosion)
//! - `legal`: the actions a state accepts
//! - `outcome`: `GameResult`
//!
//! Handlers never call `dispatch`; a handler that triggers a follow-up
//! action returns it to the controller's work-list.

pub mod controller;
mod inject;
pub mod legal;
pub mod outcome;
mod plays;
mod reactions;
pub mod resolution;
mod turn;

pub use controller::{dispatch, MAX_CHAIN};
pub use legal::legal_actions;
pub use outcome::GameResult;
pub use reactions::reaction_card_for;
pub use resolution::{
    check_explosion, draw_card, explosion_threshold, next_player_from, next_player_id,
    refill_hand, respawn_potato, seat_neighbours, transfer_potato,
};
