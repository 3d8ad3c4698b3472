//! Combo detection.
//!
//! A **pair combo** forms when two or more occupied slots of one battle zone
//! share a class tag or an essence tag. Each shared tag is one match; class
//! matches are listed before essence matches, both in the order the tag is
//! first seen scanning the zone in slot order.
//!
//! A **triple combo** forms when all three slots are occupied. Its effect is
//! flat damage to every occupied slot of the opposing zone, ignoring defense
//! and matchups.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{ClassTag, Essence};
use crate::core::EntityId;
use crate::zones::BattleZone;

/// What formed a combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "tag")]
pub enum ComboKind {
    Class(ClassTag),
    Essence(Essence),
    Triple,
}

impl std::fmt::Display for ComboKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComboKind::Class(tag) => write!(f, "class combo ({})", tag.as_str()),
            ComboKind::Essence(tag) => write!(f, "essence combo ({})", tag.as_str()),
            ComboKind::Triple => f.write_str("triple combo"),
        }
    }
}

/// One detected combo and the cards forming it, in slot order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboMatch {
    pub kind: ComboKind,
    pub cards: SmallVec<[EntityId; 3]>,
}

/// Flat damage dealt to one card by a triple combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleComboHit {
    pub target: EntityId,
    pub damage: u32,
    pub remaining_hp: u32,
    pub defeated: bool,
}

/// Every pair combo in `zone`, one per shared tag.
#[must_use]
pub fn pair_combos(zone: &BattleZone) -> Vec<ComboMatch> {
    let mut matches = Vec::new();

    let mut classes: SmallVec<[ClassTag; 6]> = SmallVec::new();
    for (_, card) in zone.occupied() {
        for &class in card.classes() {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
    }
    for class in classes {
        let cards: SmallVec<[EntityId; 3]> = zone
            .occupied()
            .filter(|(_, card)| card.classes().contains(&class))
            .map(|(_, card)| card.entity_id)
            .collect();
        if cards.len() >= 2 {
            matches.push(ComboMatch {
                kind: ComboKind::Class(class),
                cards,
            });
        }
    }

    let mut essences: SmallVec<[Essence; 3]> = SmallVec::new();
    for essence in zone.occupied().filter_map(|(_, card)| card.essence()) {
        if !essences.contains(&essence) {
            essences.push(essence);
        }
    }
    for essence in essences {
        let cards: SmallVec<[EntityId; 3]> = zone
            .occupied()
            .filter(|(_, card)| card.essence() == Some(essence))
            .map(|(_, card)| card.entity_id)
            .collect();
        if cards.len() >= 2 {
            matches.push(ComboMatch {
                kind: ComboKind::Essence(essence),
                cards,
            });
        }
    }

    matches
}

/// Whether any two occupied slots share a class or essence tag.
#[must_use]
pub fn detect_pair_combo(zone: &BattleZone) -> bool {
    !pair_combos(zone).is_empty()
}

/// Whether all three slots are occupied.
#[must_use]
pub fn detect_triple_combo(zone: &BattleZone) -> bool {
    zone.is_full()
}

/// The triple combo in `zone`, if it has one.
#[must_use]
pub fn triple_combo(zone: &BattleZone) -> Option<ComboMatch> {
    detect_triple_combo(zone).then(|| ComboMatch {
        kind: ComboKind::Triple,
        cards: zone.occupied_ids(),
    })
}

/// Deal `damage` to every occupied slot of `opponent`.
///
/// Defense and matchups do not apply. Defeated cards stay in their slots
/// until the zone's `remove_defeated` runs.
pub fn apply_triple_combo(opponent: &mut BattleZone, damage: u32) -> Vec<TripleComboHit> {
    opponent
        .occupied_mut()
        .map(|card| {
            let remaining_hp = card.take_damage(damage);
            TripleComboHit {
                target: card.entity_id,
                damage,
                remaining_hp,
                defeated: remaining_hp == 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardInstance, Category};
    use crate::core::Side;
    use crate::zones::SlotKey;

    fn card(id: u32, category: Category, classes: &[ClassTag], essence: Option<Essence>) -> CardInstance {
        let mut def = CardDefinition::new(format!("c{id}"), format!("Card {id}"), category)
            .with_stats(10, 50, 0, 100)
            .with_classes(classes.iter().copied());
        if let Some(essence) = essence {
            def = def.with_essence(essence);
        }
        CardInstance::new(EntityId(id), def, Side::Player)
    }

    fn zone_of(cards: Vec<CardInstance>) -> BattleZone {
        let mut zone = BattleZone::new(Side::Player);
        for card in cards {
            let slot = SlotKey::for_category(card.category());
            zone.place(card, slot).unwrap();
        }
        zone
    }

    #[test]
    fn test_no_combo_with_single_card() {
        let zone = zone_of(vec![card(1, Category::Char, &[ClassTag::Wars], None)]);

        assert!(!detect_pair_combo(&zone));
        assert!(!detect_triple_combo(&zone));
        assert!(triple_combo(&zone).is_none());
    }

    #[test]
    fn test_shared_class_is_pair_combo() {
        let zone = zone_of(vec![
            card(1, Category::Char, &[ClassTag::Wars, ClassTag::Heroes], None),
            card(2, Category::Ability, &[ClassTag::Heroes], None),
        ]);

        let combos = pair_combos(&zone);

        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, ComboKind::Class(ClassTag::Heroes));
        assert_eq!(combos[0].cards.as_slice(), &[EntityId(1), EntityId(2)]);
    }

    #[test]
    fn test_each_shared_tag_reported_once() {
        let zone = zone_of(vec![
            card(1, Category::Char, &[ClassTag::Sages, ClassTag::Mys], Some(Essence::Water)),
            card(2, Category::Essence, &[ClassTag::Mys, ClassTag::Sages], Some(Essence::Water)),
            card(3, Category::Ability, &[ClassTag::Mys], None),
        ]);

        let kinds: Vec<_> = pair_combos(&zone).into_iter().map(|m| m.kind).collect();

        assert_eq!(
            kinds,
            vec![
                ComboKind::Class(ClassTag::Sages),
                ComboKind::Class(ClassTag::Mys),
                ComboKind::Essence(Essence::Water),
            ]
        );
    }

    #[test]
    fn test_triple_requires_all_slots() {
        let mut zone = zone_of(vec![
            card(1, Category::Char, &[], None),
            card(2, Category::Essence, &[], Some(Essence::Fire)),
        ]);
        assert!(!detect_triple_combo(&zone));

        zone.place(card(3, Category::Ability, &[], None), SlotKey::Ability).unwrap();

        let combo = triple_combo(&zone).unwrap();
        assert_eq!(combo.kind, ComboKind::Triple);
        assert_eq!(combo.cards.len(), 3);
    }

    #[test]
    fn test_triple_combo_ignores_defense() {
        // Every card has 50 defense and 100 hp.
        let mut opponent = zone_of(vec![
            card(1, Category::Char, &[], None),
            card(3, Category::Ability, &[], None),
        ]);

        let hits = apply_triple_combo(&mut opponent, 60);

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.damage == 60 && h.remaining_hp == 40 && !h.defeated));
        assert_eq!(opponent.get(SlotKey::Char).unwrap().hp(), 40);
        assert_eq!(opponent.get(SlotKey::Ability).unwrap().hp(), 40);
    }

    #[test]
    fn test_triple_combo_can_defeat() {
        let mut opponent = zone_of(vec![card(1, Category::Char, &[], None)]);
        opponent.get_mut(SlotKey::Char).unwrap().take_damage(70);

        let hits = apply_triple_combo(&mut opponent, 60);

        assert!(hits[0].defeated);
        assert_eq!(hits[0].remaining_hp, 0);
        assert_eq!(opponent.remove_defeated().len(), 1);
    }
}
