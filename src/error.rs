//! Error types.
//!
//! `BattleError` covers everything that can be rejected during play. These are
//! always recoverable: the offending request is refused and the session is
//! left as it was (a placement pass made by `play_round` before it rejects
//! the round is kept).
//!
//! `ConfigError` covers setup. Any of these is fatal to game start.

use thiserror::Error;

use crate::cards::Category;
use crate::core::{EntityId, Side};
use crate::zones::SlotKey;

/// A rejected placement, selection, attack or round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("{0} is not a card in this session")]
    UnknownCard(EntityId),
    #[error("{card} is not in the {side} hand")]
    NotInHand { side: Side, card: EntityId },
    #[error("{card} is not in the {side} battle zone")]
    NotInZone { side: Side, card: EntityId },
    #[error("{0} cannot attack itself")]
    SelfAttack(EntityId),
    #[error("{0} is already defeated")]
    AlreadyDefeated(EntityId),
    #[error("{side} {slot} slot is already occupied")]
    SlotOccupied { side: Side, slot: SlotKey },
    #[error("{card} ({category}) cannot go in the {slot} slot")]
    CategoryMismatch {
        card: EntityId,
        category: Category,
        slot: SlotKey,
    },
    #[error("{0} has already placed a card this round")]
    AlreadyPlaced(Side),
    #[error("a card must be placed before the round can be played")]
    PlacementRequired,
    #[error("select an attacker and a defender before playing the round")]
    SelectionRequired,
    #[error("{0} is already the attacker and cannot also be the combo")]
    ComboIsAttacker(EntityId),
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("the game is over")]
    GameOver,
}

/// A failure while loading data or building a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("card catalog is empty")]
    EmptyCatalog,
    #[error("duplicate card id '{0}' in catalog")]
    DuplicateCard(String),
    #[error("card id '{0}' is not in the catalog")]
    UnknownCatalogCard(String),
    #[error("{0} deck is empty")]
    EmptyDeck(Side),
    #[error("{side} deck has {available} cards, {needed} needed for the starting hand")]
    NotEnoughCards {
        side: Side,
        needed: usize,
        available: usize,
    },
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
