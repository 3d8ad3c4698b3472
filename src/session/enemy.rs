//! Enemy decision policies.
//!
//! The enemy side makes two decisions per round: which card to place, and
//! which of its cards attacks which player card. Both are behind
//! `EnemyPolicy` so scripted or smarter opponents can be swapped in.

use crate::core::{EntityId, GameRng};
use crate::zones::{BattleZone, Hand};

/// How the enemy side chooses its actions.
pub trait EnemyPolicy: Send + Sync {
    /// Choose a card from `hand` to place into `zone`.
    ///
    /// Returns `None` if nothing should (or can) be placed. Returning a card
    /// whose slot is occupied is treated the same as `None`.
    fn choose_placement(&self, hand: &Hand, zone: &BattleZone, rng: &mut GameRng)
        -> Option<EntityId>;

    /// Choose an attacker from `own` and a target from `opponent`.
    ///
    /// Only called when both zones hold at least one card.
    fn choose_attack(
        &self,
        own: &BattleZone,
        opponent: &BattleZone,
        rng: &mut GameRng,
    ) -> Option<(EntityId, EntityId)>;
}

/// Default enemy: places the first card that fits, attacks at random.
///
/// Attacker and target are each drawn uniformly from the occupied slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomEnemy;

impl EnemyPolicy for RandomEnemy {
    fn choose_placement(
        &self,
        hand: &Hand,
        zone: &BattleZone,
        _rng: &mut GameRng,
    ) -> Option<EntityId> {
        hand.first_matching(|category| zone.has_open_slot_for(category))
            .map(|card| card.entity_id)
    }

    fn choose_attack(
        &self,
        own: &BattleZone,
        opponent: &BattleZone,
        rng: &mut GameRng,
    ) -> Option<(EntityId, EntityId)> {
        let attackers = own.occupied_ids();
        let targets = opponent.occupied_ids();
        let attacker = *rng.choose(attackers.as_slice())?;
        let target = *rng.choose(targets.as_slice())?;
        Some((attacker, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardInstance, Category};
    use crate::core::Side;
    use crate::zones::SlotKey;

    fn card(id: u32, category: Category, owner: Side) -> CardInstance {
        let def = CardDefinition::new(format!("c{id}"), format!("Card {id}"), category)
            .with_stats(10, 0, 0, 10);
        CardInstance::new(EntityId(id), def, owner)
    }

    #[test]
    fn test_places_first_card_that_fits() {
        let mut zone = BattleZone::new(Side::Enemy);
        zone.place(card(0, Category::Char, Side::Enemy), SlotKey::Char).unwrap();

        let mut hand = Hand::new(6);
        hand.push(card(1, Category::Char, Side::Enemy)).unwrap();
        hand.push(card(2, Category::Ability, Side::Enemy)).unwrap();
        hand.push(card(3, Category::Essence, Side::Enemy)).unwrap();

        let choice = RandomEnemy.choose_placement(&hand, &zone, &mut GameRng::new(0));
        assert_eq!(choice, Some(EntityId(2)));
    }

    #[test]
    fn test_no_placement_when_nothing_fits() {
        let mut zone = BattleZone::new(Side::Enemy);
        zone.place(card(0, Category::Char, Side::Enemy), SlotKey::Char).unwrap();
        let mut hand = Hand::new(6);
        hand.push(card(1, Category::Char, Side::Enemy)).unwrap();

        assert_eq!(RandomEnemy.choose_placement(&hand, &zone, &mut GameRng::new(0)), None);
        assert_eq!(RandomEnemy.choose_placement(&Hand::new(6), &zone, &mut GameRng::new(0)), None);
    }

    #[test]
    fn test_attack_picks_occupied_cards() {
        let mut own = BattleZone::new(Side::Enemy);
        own.place(card(10, Category::Char, Side::Enemy), SlotKey::Char).unwrap();
        own.place(card(11, Category::Ability, Side::Enemy), SlotKey::Ability).unwrap();
        let mut opponent = BattleZone::new(Side::Player);
        opponent.place(card(20, Category::Essence, Side::Player), SlotKey::Essence).unwrap();

        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            let (attacker, target) = RandomEnemy.choose_attack(&own, &opponent, &mut rng).unwrap();
            assert!(own.contains(attacker));
            assert_eq!(target, EntityId(20));
        }
    }

    #[test]
    fn test_no_attack_against_empty_zone() {
        let mut own = BattleZone::new(Side::Enemy);
        own.place(card(10, Category::Char, Side::Enemy), SlotKey::Char).unwrap();
        let opponent = BattleZone::new(Side::Player);

        assert_eq!(RandomEnemy.choose_attack(&own, &opponent, &mut GameRng::new(0)), None);
    }
}
