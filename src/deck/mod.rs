//! Deck building and dealing.

pub mod builder;

pub use builder::{build_deck, deal_game, shuffle, Deal};
