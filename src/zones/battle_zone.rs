//! Battle zones.
//!
//! Each side owns one `BattleZone` with exactly three slots: `char`,
//! `essence` and `ability`. A slot holds at most one card, and only a card
//! of the matching category. Defeated cards are swept out with
//! `remove_defeated`, which the turn controller calls after every attack so
//! a defeated card can never be chosen as attacker or defender.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardInstance, Category};
use crate::core::{EntityId, Side};
use crate::error::BattleError;

/// Battle-zone slot key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Char,
    Essence,
    Ability,
}

impl SlotKey {
    /// All slots in display order.
    pub const ALL: [SlotKey; 3] = [SlotKey::Char, SlotKey::Essence, SlotKey::Ability];

    /// The slot a card of `category` belongs in.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Char => SlotKey::Char,
            Category::Essence => SlotKey::Essence,
            Category::Ability => SlotKey::Ability,
        }
    }

    /// The category a slot accepts.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            SlotKey::Char => Category::Char,
            SlotKey::Essence => Category::Essence,
            SlotKey::Ability => Category::Ability,
        }
    }

    const fn index(self) -> usize {
        match self {
            SlotKey::Char => 0,
            SlotKey::Essence => 1,
            SlotKey::Ability => 2,
        }
    }
}

impl From<Category> for SlotKey {
    fn from(category: Category) -> Self {
        Self::for_category(category)
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.category())
    }
}

/// Three-slot area holding a side's active combatants.
///
/// ## Usage
///
/// ```
/// use strategic_mythology::cards::{CardDefinition, CardInstance, Category};
/// use strategic_mythology::core::{EntityId, Side};
/// use strategic_mythology::zones::{BattleZone, SlotKey};
///
/// let mut zone = BattleZone::new(Side::Player);
/// let card = CardInstance::new(
///     EntityId(1),
///     CardDefinition::new("trtn", "Triton", Category::Char).with_stats(22, 8, 9, 110),
///     Side::Player,
/// );
///
/// zone.place(card, SlotKey::Char).unwrap();
/// assert_eq!(zone.get(SlotKey::Char).unwrap().name(), "Triton");
/// assert!(zone.get(SlotKey::Essence).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleZone {
    owner: Side,
    slots: [Option<CardInstance>; 3],
}

impl BattleZone {
    /// Create an empty zone for `owner`.
    #[must_use]
    pub fn new(owner: Side) -> Self {
        Self {
            owner,
            slots: [None, None, None],
        }
    }

    /// The side this zone belongs to.
    #[must_use]
    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Check whether `card` could go into `slot` right now.
    pub fn check_placement(&self, card: &CardInstance, slot: SlotKey) -> Result<(), BattleError> {
        if card.category() != slot.category() {
            return Err(BattleError::CategoryMismatch {
                card: card.entity_id,
                category: card.category(),
                slot,
            });
        }
        if self.slots[slot.index()].is_some() {
            return Err(BattleError::SlotOccupied {
                side: self.owner,
                slot,
            });
        }
        Ok(())
    }

    /// Place a card into a slot.
    ///
    /// Rejected if the slot is occupied or does not match the card's
    /// category. On rejection the zone is unchanged and the card is handed
    /// back together with the reason.
    pub fn place(&mut self, card: CardInstance, slot: SlotKey) -> Result<(), (CardInstance, BattleError)> {
        if let Err(err) = self.check_placement(&card, slot) {
            return Err((card, err));
        }
        self.slots[slot.index()] = Some(card);
        Ok(())
    }

    /// Whether the slot for `category` is open.
    #[must_use]
    pub fn has_open_slot_for(&self, category: Category) -> bool {
        self.slots[SlotKey::for_category(category).index()].is_none()
    }

    /// Get the card in a slot.
    #[must_use]
    pub fn get(&self, slot: SlotKey) -> Option<&CardInstance> {
        self.slots[slot.index()].as_ref()
    }

    /// Get the card in a slot mutably.
    pub fn get_mut(&mut self, slot: SlotKey) -> Option<&mut CardInstance> {
        self.slots[slot.index()].as_mut()
    }

    /// Find a card by entity ID.
    #[must_use]
    pub fn find(&self, entity: EntityId) -> Option<(SlotKey, &CardInstance)> {
        self.occupied().find(|(_, card)| card.entity_id == entity)
    }

    /// Find a card by entity ID, mutably.
    pub fn find_mut(&mut self, entity: EntityId) -> Option<&mut CardInstance> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|card| card.entity_id == entity)
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.find(entity).is_some()
    }

    /// Iterate over occupied slots in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotKey, &CardInstance)> {
        SlotKey::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(key, slot)| slot.as_ref().map(|card| (key, card)))
    }

    /// Iterate over occupied cards mutably, in slot order.
    pub fn occupied_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.slots.iter_mut().flatten()
    }

    /// Entity IDs of every occupied slot, in slot order.
    #[must_use]
    pub fn occupied_ids(&self) -> SmallVec<[EntityId; 3]> {
        self.occupied().map(|(_, card)| card.entity_id).collect()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All three slots occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Remove every card with no hit points left.
    ///
    /// Returns the removed cards with the slot each one occupied.
    pub fn remove_defeated(&mut self) -> Vec<(SlotKey, CardInstance)> {
        let mut removed = Vec::new();
        for key in SlotKey::ALL {
            let slot = &mut self.slots[key.index()];
            if slot.as_ref().is_some_and(CardInstance::is_defeated) {
                if let Some(card) = slot.take() {
                    log::debug!("{}: {} defeated, {} slot cleared", self.owner, card.name(), key);
                    removed.push((key, card));
                }
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;

    fn card(id: u32, category: Category, hp: u32) -> CardInstance {
        let def = CardDefinition::new(format!("c{id}"), format!("Card {id}"), category)
            .with_stats(10, 0, 0, hp);
        CardInstance::new(EntityId(id), def, Side::Player)
    }

    #[test]
    fn test_place_and_get() {
        let mut zone = BattleZone::new(Side::Player);

        zone.place(card(1, Category::Char, 10), SlotKey::Char).unwrap();
        zone.place(card(2, Category::Ability, 10), SlotKey::Ability).unwrap();

        assert_eq!(zone.len(), 2);
        assert_eq!(zone.get(SlotKey::Char).unwrap().entity_id, EntityId(1));
        assert!(zone.get(SlotKey::Essence).is_none());
        assert!(zone.has_open_slot_for(Category::Essence));
        assert!(!zone.has_open_slot_for(Category::Char));
    }

    #[test]
    fn test_occupied_slot_rejected_and_zone_unchanged() {
        let mut zone = BattleZone::new(Side::Enemy);
        zone.place(card(1, Category::Char, 10), SlotKey::Char).unwrap();
        let before = zone.clone();

        let (returned, err) = zone.place(card(2, Category::Char, 10), SlotKey::Char).unwrap_err();

        assert_eq!(returned.entity_id, EntityId(2));
        assert_eq!(
            err,
            BattleError::SlotOccupied {
                side: Side::Enemy,
                slot: SlotKey::Char
            }
        );
        assert_eq!(zone, before);
    }

    #[test]
    fn test_category_mismatch_rejected() {
        let mut zone = BattleZone::new(Side::Player);

        let (returned, err) = zone.place(card(1, Category::Essence, 10), SlotKey::Char).unwrap_err();

        assert!(matches!(err, BattleError::CategoryMismatch { slot: SlotKey::Char, .. }));
        assert_eq!(returned.hp(), 10);
        assert!(zone.is_empty());
    }

    #[test]
    fn test_remove_defeated_only_removes_zero_hp() {
        let mut zone = BattleZone::new(Side::Player);
        zone.place(card(1, Category::Char, 10), SlotKey::Char).unwrap();
        zone.place(card(2, Category::Essence, 10), SlotKey::Essence).unwrap();
        zone.place(card(3, Category::Ability, 10), SlotKey::Ability).unwrap();

        zone.get_mut(SlotKey::Essence).unwrap().take_damage(10);
        zone.get_mut(SlotKey::Ability).unwrap().take_damage(3);

        let removed = zone.remove_defeated();

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, SlotKey::Essence);
        assert_eq!(removed[0].1.entity_id, EntityId(2));
        assert_eq!(zone.occupied_ids().as_slice(), &[EntityId(1), EntityId(3)]);

        // Slot is free again
        zone.place(card(4, Category::Essence, 10), SlotKey::Essence).unwrap();
        assert!(zone.is_full());
    }

    #[test]
    fn test_find() {
        let mut zone = BattleZone::new(Side::Player);
        zone.place(card(5, Category::Ability, 10), SlotKey::Ability).unwrap();

        let (slot, found) = zone.find(EntityId(5)).unwrap();
        assert_eq!(slot, SlotKey::Ability);
        assert_eq!(found.name(), "Card 5");
        assert!(zone.find(EntityId(6)).is_none());

        zone.find_mut(EntityId(5)).unwrap().take_damage(4);
        assert_eq!(zone.get(SlotKey::Ability).unwrap().hp(), 6);
    }

    #[test]
    fn test_slot_key_category_mapping() {
        for key in SlotKey::ALL {
            assert_eq!(SlotKey::for_category(key.category()), key);
        }
        assert_eq!(format!("{}", SlotKey::Essence), "essence");
    }
}
