//! Card system: catalogue and instances.
//!
//! ## Key Types
//!
//! - `CardName`: The seventeen card names
//! - `CardCategory`: Topping, defense, movement, chaos, potato
//! - `CardEffect`: Behavior tag resolved by the phase controller
//! - `CardDefinition`: Static catalogue entry for a name
//! - `Card` / `CardId`: A physical card and its identity

pub mod definition;
pub mod instance;

pub use definition::{CardCategory, CardDefinition, CardEffect, CardName, UnknownCardName, CATALOGUE};
pub use instance::{Card, CardId, CardIdGen};
