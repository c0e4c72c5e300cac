//! Card locations.
//!
//! The game has one shared deck, one shared discard pile and one hand per
//! player. All of them are ordered `Pile`s.

pub mod pile;

pub use pile::Pile;
