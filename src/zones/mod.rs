//! Card locations: battle zones, decks and hands.
//!
//! Every side has one deck, one hand and one three-slot battle zone. Cards
//! are owned by the location they are in and move by value.

pub mod battle_zone;
pub mod pile;

pub use battle_zone::{BattleZone, SlotKey};
pub use pile::{Deck, Hand};
