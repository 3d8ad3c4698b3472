//! Combat resolution tests.
//!
//! These tests pin down the damage formula and combo rules:
//! - Neutral damage is attack minus defense, floored at 1
//! - Essence and class advantages scale power before defense
//! - Combos double essence/ability attackers
//! - Triple combos deal flat damage through any defense

use proptest::prelude::*;

use strategic_mythology::cards::{CardDefinition, CardInstance, Category, ClassTag, Essence};
use strategic_mythology::combat::{
    apply_triple_combo, detect_triple_combo, BattleSystem, DamageCalculator,
};
use strategic_mythology::core::{BattleConfig, EntityId, Side};
use strategic_mythology::zones::{BattleZone, SlotKey};
use strategic_mythology::BattleError;

fn card(id: u32, category: Category, atk: u32, def: u32, hp: u32) -> CardDefinition {
    CardDefinition::new(format!("c{id}"), format!("Card {id}"), category).with_stats(atk, def, 0, hp)
}

fn instance(id: u32, def: CardDefinition, owner: Side) -> CardInstance {
    CardInstance::new(EntityId(id), def, owner)
}

// =============================================================================
// End-to-end examples
// =============================================================================

#[test]
fn test_fire_beats_plant() {
    let system = BattleSystem::default();
    let calc = DamageCalculator::new(&system, &BattleConfig::default());

    let attacker = instance(
        1,
        card(1, Category::Essence, 20, 0, 50).with_essence(Essence::Fire),
        Side::Player,
    );
    let mut defender = instance(
        2,
        card(2, Category::Essence, 0, 5, 30).with_essence(Essence::Plant),
        Side::Enemy,
    );

    let breakdown = calc.breakdown(&attacker, &defender, false);
    assert_eq!(breakdown.essence_multiplier, 1.2);
    assert_eq!(breakdown.raw, 19);

    let report = calc.resolve_attack(&attacker, &mut defender, false).unwrap();
    assert_eq!(report.damage, 19);
    assert_eq!(defender.hp(), 11);
}

#[test]
fn test_heavy_defense_floors_at_one() {
    let system = BattleSystem::default();
    let calc = DamageCalculator::new(&system, &BattleConfig::default());

    let attacker = instance(1, card(1, Category::Char, 3, 0, 10), Side::Player);
    let mut defender = instance(2, card(2, Category::Char, 0, 10, 5), Side::Enemy);

    let report = calc.resolve_attack(&attacker, &mut defender, false).unwrap();

    assert_eq!(calc.breakdown(&attacker, &defender, false).raw, -7);
    assert_eq!(report.damage, 1);
    assert_eq!(defender.hp(), 4);
}

#[test]
fn test_combo_doubles_ability_attack() {
    let system = BattleSystem::default();
    let calc = DamageCalculator::new(&system, &BattleConfig::default());

    let attacker = instance(1, card(1, Category::Ability, 10, 0, 10), Side::Player);
    let defender = instance(2, card(2, Category::Char, 0, 0, 100), Side::Enemy);

    let boosted = calc.breakdown(&attacker, &defender, true);
    assert_eq!(boosted.base_power, 20);
    assert_eq!(boosted.damage, 20);
    assert_eq!(calc.breakdown(&attacker, &defender, false).damage, 10);
}

#[test]
fn test_combo_multiplier_is_configurable() {
    let system = BattleSystem::default();
    let config = BattleConfig {
        combo_attack_multiplier: 3,
        ..BattleConfig::default()
    };
    let calc = DamageCalculator::new(&system, &config);

    let attacker = instance(1, card(1, Category::Essence, 10, 0, 10), Side::Player);
    assert_eq!(calc.base_power(&attacker, true), 30);
}

#[test]
fn test_class_weakness_reduces_damage() {
    let system = BattleSystem::default();
    let calc = DamageCalculator::new(&system, &BattleConfig::default());

    // Cares are weak against mals: round(30 / 1.2) = 25.
    let attacker = instance(
        1,
        card(1, Category::Char, 30, 0, 10).with_classes([ClassTag::Cares]),
        Side::Player,
    );
    let defender = instance(
        2,
        card(2, Category::Char, 0, 0, 100).with_classes([ClassTag::Mals]),
        Side::Enemy,
    );

    assert_eq!(calc.compute_damage(&attacker, &defender, false), Ok(25));
}

#[test]
fn test_self_attack_is_an_error() {
    let system = BattleSystem::default();
    let calc = DamageCalculator::new(&system, &BattleConfig::default());
    let attacker = instance(1, card(1, Category::Char, 10, 0, 10), Side::Player);

    assert_eq!(
        calc.compute_damage(&attacker, &attacker, false),
        Err(BattleError::SelfAttack(EntityId(1)))
    );
}

// =============================================================================
// Battle zone and triple combo
// =============================================================================

#[test]
fn test_occupied_slot_hands_card_back() {
    let mut zone = BattleZone::new(Side::Player);
    zone.place(instance(1, card(1, Category::Char, 1, 1, 10), Side::Player), SlotKey::Char)
        .unwrap();
    let before = zone.clone();

    let (returned, err) = zone
        .place(instance(2, card(2, Category::Char, 1, 1, 10), Side::Player), SlotKey::Char)
        .unwrap_err();

    assert!(matches!(err, BattleError::SlotOccupied { .. }));
    assert_eq!(returned.entity_id, EntityId(2));
    assert_eq!(zone, before);
}

#[test]
fn test_triple_combo_deals_flat_damage() {
    let mut own = BattleZone::new(Side::Player);
    for (id, category) in [(1, Category::Char), (2, Category::Essence), (3, Category::Ability)] {
        own.place(instance(id, card(id, category, 1, 0, 10), Side::Player), SlotKey::for_category(category))
            .unwrap();
    }
    let mut opponent = BattleZone::new(Side::Enemy);
    opponent
        .place(instance(4, card(4, Category::Char, 0, 500, 200), Side::Enemy), SlotKey::Char)
        .unwrap();
    opponent
        .place(instance(5, card(5, Category::Essence, 0, 0, 60), Side::Enemy), SlotKey::Essence)
        .unwrap();

    assert!(detect_triple_combo(&own));
    let hits = apply_triple_combo(&mut opponent, BattleConfig::default().triple_combo_damage);

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| hit.damage == 60));
    assert_eq!(opponent.get(SlotKey::Char).unwrap().hp(), 140);
    assert!(opponent.get(SlotKey::Essence).unwrap().is_defeated());

    let removed = opponent.remove_defeated();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].0, SlotKey::Essence);
}

#[test]
fn test_two_slots_are_not_a_triple() {
    let mut zone = BattleZone::new(Side::Player);
    zone.place(instance(1, card(1, Category::Char, 1, 0, 10), Side::Player), SlotKey::Char)
        .unwrap();
    zone.place(instance(2, card(2, Category::Ability, 1, 0, 10), Side::Player), SlotKey::Ability)
        .unwrap();

    assert!(!detect_triple_combo(&zone));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_neutral_damage_is_floored_difference(atk in 0u32..500, def in 0u32..500) {
        let system = BattleSystem::default();
        let calc = DamageCalculator::new(&system, &BattleConfig::default());
        let attacker = instance(1, card(1, Category::Char, atk, 0, 10), Side::Player);
        let defender = instance(2, card(2, Category::Char, 0, def, 10), Side::Enemy);

        let expected = (i64::from(atk) - i64::from(def)).max(1);
        prop_assert_eq!(i64::from(calc.compute_damage(&attacker, &defender, false).unwrap()), expected);
    }

    #[test]
    fn prop_damage_at_least_one_and_hp_never_negative(
        atk in 0u32..300,
        def in 0u32..300,
        hp in 1u32..300,
        combo in any::<bool>(),
        essences in (0usize..Essence::ALL.len(), 0usize..Essence::ALL.len()),
    ) {
        let system = BattleSystem::default();
        let calc = DamageCalculator::new(&system, &BattleConfig::default());
        let attacker = instance(
            1,
            card(1, Category::Essence, atk, 0, 10).with_essence(Essence::ALL[essences.0]),
            Side::Player,
        );
        let mut defender = instance(
            2,
            card(2, Category::Essence, 0, def, hp).with_essence(Essence::ALL[essences.1]),
            Side::Enemy,
        );

        let before = defender.hp();
        let report = calc.resolve_attack(&attacker, &mut defender, combo).unwrap();

        prop_assert!(report.damage >= 1);
        prop_assert!(defender.hp() <= before);
        prop_assert_eq!(defender.hp(), before.saturating_sub(report.damage));
    }
}
