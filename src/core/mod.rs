//! Core engine types: entities, sides, RNG, configuration.
//!
//! These are the leaf building blocks every other module depends on.

pub mod entity;
pub mod side;
pub mod rng;
pub mod config;

pub use entity::{EntityAllocator, EntityId};
pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::BattleConfig;
