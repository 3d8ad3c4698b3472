//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a catalog card inside a session.
//! It carries its own `EntityId`, the side that owns it, and its current
//! hit points. Everything else is read through to the definition.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, Category};
use super::tags::{ClassTag, Essence};
use crate::core::{EntityId, Side};

/// A card in play (deck, hand or battle zone).
///
/// ## Hit points
///
/// `hp` only ever decreases and saturates at zero. A card at zero hp is
/// defeated; the battle zone removes it before it can be targeted again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Side that owns the card.
    pub owner: Side,

    definition: CardDefinition,
    hp: u32,
}

impl CardInstance {
    /// Create an instance at full hit points.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: CardDefinition, owner: Side) -> Self {
        let hp = definition.stats.hp;
        Self {
            entity_id,
            owner,
            definition,
            hp,
        }
    }

    /// The static definition this instance was created from.
    #[must_use]
    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.definition.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.definition.category
    }

    #[must_use]
    pub fn atk(&self) -> u32 {
        self.definition.stats.atk
    }

    #[must_use]
    pub fn def(&self) -> u32 {
        self.definition.stats.def
    }

    #[must_use]
    pub fn spd(&self) -> u32 {
        self.definition.stats.spd
    }

    #[must_use]
    pub fn essence(&self) -> Option<Essence> {
        self.definition.essence
    }

    #[must_use]
    pub fn classes(&self) -> &[ClassTag] {
        &self.definition.classes
    }

    /// Current hit points.
    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Hit points the card entered play with.
    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.definition.stats.hp
    }

    /// A defeated card has no hit points left.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Subtract damage, clamping at zero. Returns the remaining hit points.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }
}
