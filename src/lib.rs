//! # strategic-mythology
//!
//! Combat engine for a two-sided trading-card battle: the player and an
//! AI-controlled enemy each draw from a deck, place cards into a three-slot
//! battle zone and fight using essence and class matchups.
//!
//! ## Design Principles
//!
//! 1. **One aggregate**: all mutable battle state lives in a `GameSession`
//!    owned by the `TurnController`. There is no global state.
//!
//! 2. **Events, not rendering**: every state change is reported as a
//!    `BattleEvent`. Presentation is somebody else's job.
//!
//! 3. **Data-driven rules**: cards, matchup tables and tunables load from
//!    JSON. The built-in defaults match the shipped data.
//!
//! 4. **Deterministic**: one seed fixes deck order and enemy choices.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, sides, RNG, configuration
//! - `cards`: Tag vocabularies, card definitions, instances, the catalog
//! - `zones`: Battle zones, decks and hands
//! - `combat`: Matchup tables, damage calculation, combo detection
//! - `events`: The battle event vocabulary
//! - `session`: Session setup, state and the turn controller
//!
//! ## Example
//!
//! ```
//! use strategic_mythology::{CardCatalog, GameSessionBuilder, TurnController, Side};
//!
//! let catalog = CardCatalog::builtin().unwrap();
//! let session = GameSessionBuilder::new()
//!     .seed(42)
//!     .decks_from_catalog(&catalog)
//!     .build()
//!     .unwrap();
//! let game = TurnController::new(session);
//!
//! assert_eq!(game.session().hand(Side::Player).len(), 6);
//! assert!(game.outcome().is_none());
//! ```

pub mod core;
pub mod error;
pub mod cards;
pub mod zones;
pub mod combat;
pub mod events;
pub mod session;

// Re-export commonly used types
pub use crate::core::{BattleConfig, EntityId, GameRng, Side, SideMap};

pub use crate::error::{BattleError, ConfigError};

pub use crate::cards::{
    CardCatalog, CardDefinition, CardId, CardInstance, Category, ClassTag, Essence, Stats,
};

pub use crate::zones::{BattleZone, Deck, Hand, SlotKey};

pub use crate::combat::{
    Advantage, AttackReport, BattleSystem, ComboKind, ComboMatch, DamageBreakdown,
    DamageCalculator,
};

pub use crate::events::{BattleEvent, DamageSource, GameOutcome, SkipReason};

pub use crate::session::{
    EnemyPolicy, GameSession, GameSessionBuilder, RandomEnemy, RoundResult, TurnController,
    TurnState,
};
