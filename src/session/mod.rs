//! Battle sessions.
//!
//! - `GameSessionBuilder`: builds decks and deals starting hands
//! - `GameSession`: the aggregate of all mutable battle state
//! - `TurnController`: the only way to change a session, one request or
//!   round at a time
//! - `EnemyPolicy`: how the AI side places and attacks

pub mod builder;
pub mod enemy;
pub mod state;
pub mod turn;

pub use builder::GameSessionBuilder;
pub use enemy::{EnemyPolicy, RandomEnemy};
pub use state::{GameSession, TurnState};
pub use turn::{RoundResult, TurnController};
pub use crate::events::GameOutcome;
