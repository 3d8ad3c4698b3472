//! Damage calculation.
//!
//! One attack is resolved in four steps:
//!
//! 1. **Base power**: the attacker's `atk`, multiplied by the combo factor
//!    when a combo is active and the attacker is an essence or ability card.
//! 2. **Essence multiplier**: strong, weak or neutral per the essence table.
//! 3. **Class multiplier**: strong, weak or neutral per the class table.
//! 4. **Defense**: `round(power * essence * class) - def`, floored at
//!    `minDamage`.
//!
//! Defense is subtracted after the multipliers. The result is always at
//! least `minDamage` and hit points saturate at zero.
//!
//! ```
//! use strategic_mythology::cards::{CardDefinition, CardInstance, Category, Essence};
//! use strategic_mythology::combat::{BattleSystem, DamageCalculator};
//! use strategic_mythology::core::{BattleConfig, EntityId, Side};
//!
//! let system = BattleSystem::default();
//! let config = BattleConfig::default();
//! let calc = DamageCalculator::new(&system, &config);
//!
//! let attacker = CardInstance::new(
//!     EntityId(1),
//!     CardDefinition::new("fire", "Fire", Category::Essence)
//!         .with_stats(20, 0, 0, 50)
//!         .with_essence(Essence::Fire),
//!     Side::Player,
//! );
//! let mut defender = CardInstance::new(
//!     EntityId(2),
//!     CardDefinition::new("plant", "Plant", Category::Essence)
//!         .with_stats(0, 5, 0, 30)
//!         .with_essence(Essence::Plant),
//!     Side::Enemy,
//! );
//!
//! let report = calc.resolve_attack(&attacker, &mut defender, false).unwrap();
//! assert_eq!(report.damage, 19);
//! assert_eq!(defender.hp(), 11);
//! ```

use serde::{Deserialize, Serialize};

use super::matchups::{Advantage, BattleSystem};
use crate::cards::{CardInstance, Category};
use crate::core::{BattleConfig, EntityId};
use crate::error::BattleError;

/// Every intermediate value of one damage computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Attack after the combo boost.
    pub base_power: u32,
    pub essence_multiplier: f64,
    pub class_multiplier: f64,
    /// Rounded, multiplied power minus defense. May be negative.
    pub raw: i64,
    /// Final damage after the floor.
    pub damage: u32,
}

/// Outcome of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub damage: u32,
    pub remaining_hp: u32,
    pub defeated: bool,
}

/// Computes and applies attack damage against a `BattleSystem`.
#[derive(Clone, Copy, Debug)]
pub struct DamageCalculator<'a> {
    system: &'a BattleSystem,
    combo_attack_multiplier: u32,
}

impl<'a> DamageCalculator<'a> {
    #[must_use]
    pub fn new(system: &'a BattleSystem, config: &BattleConfig) -> Self {
        Self {
            system,
            combo_attack_multiplier: config.combo_attack_multiplier,
        }
    }

    /// Attack power before multipliers.
    ///
    /// Only essence and ability cards are boosted by a combo.
    #[must_use]
    pub fn base_power(&self, attacker: &CardInstance, combo_active: bool) -> u32 {
        let boosted = combo_active
            && matches!(attacker.category(), Category::Essence | Category::Ability);
        if boosted {
            attacker.atk().saturating_mul(self.combo_attack_multiplier)
        } else {
            attacker.atk()
        }
    }

    #[must_use]
    pub fn essence_advantage(&self, attacker: &CardInstance, defender: &CardInstance) -> Advantage {
        self.system
            .essence_bonuses
            .advantage(attacker.essence(), defender.essence())
    }

    #[must_use]
    pub fn class_advantage(&self, attacker: &CardInstance, defender: &CardInstance) -> Advantage {
        self.system
            .class_bonuses
            .advantage(attacker.classes(), defender.classes())
    }

    #[must_use]
    pub fn essence_multiplier(&self, attacker: &CardInstance, defender: &CardInstance) -> f64 {
        let bonus = self.system.damage_calculation.essence_bonus_multiplier;
        self.essence_advantage(attacker, defender).multiplier(bonus)
    }

    #[must_use]
    pub fn class_multiplier(&self, attacker: &CardInstance, defender: &CardInstance) -> f64 {
        let bonus = self.system.damage_calculation.class_bonus_multiplier;
        self.class_advantage(attacker, defender).multiplier(bonus)
    }

    /// Full computation without validation or mutation.
    #[must_use]
    pub fn breakdown(
        &self,
        attacker: &CardInstance,
        defender: &CardInstance,
        combo_active: bool,
    ) -> DamageBreakdown {
        let base_power = self.base_power(attacker, combo_active);
        let essence_multiplier = self.essence_multiplier(attacker, defender);
        let class_multiplier = self.class_multiplier(attacker, defender);

        let power = (f64::from(base_power) * essence_multiplier * class_multiplier).round() as i64;
        let raw = power - i64::from(defender.def());
        let floor = i64::from(self.system.damage_calculation.min_damage);
        let damage = u32::try_from(raw.max(floor)).unwrap_or(u32::MAX);

        DamageBreakdown {
            base_power,
            essence_multiplier,
            class_multiplier,
            raw,
            damage,
        }
    }

    /// Damage `attacker` would deal to `defender`.
    ///
    /// Rejects self-attacks and defeated combatants.
    pub fn compute_damage(
        &self,
        attacker: &CardInstance,
        defender: &CardInstance,
        combo_active: bool,
    ) -> Result<u32, BattleError> {
        if attacker.entity_id == defender.entity_id {
            return Err(BattleError::SelfAttack(attacker.entity_id));
        }
        for card in [attacker, defender] {
            if card.is_defeated() {
                return Err(BattleError::AlreadyDefeated(card.entity_id));
            }
        }
        Ok(self.breakdown(attacker, defender, combo_active).damage)
    }

    /// Compute damage and apply it to `defender`.
    pub fn resolve_attack(
        &self,
        attacker: &CardInstance,
        defender: &mut CardInstance,
        combo_active: bool,
    ) -> Result<AttackReport, BattleError> {
        let damage = self.compute_damage(attacker, defender, combo_active)?;
        let remaining_hp = apply_damage(defender, damage);

        log::debug!(
            "{} hits {} for {} ({} hp left)",
            attacker.name(),
            defender.name(),
            damage,
            remaining_hp
        );

        Ok(AttackReport {
            attacker: attacker.entity_id,
            defender: defender.entity_id,
            damage,
            remaining_hp,
            defeated: remaining_hp == 0,
        })
    }
}

/// Subtract `damage` from the card's hit points, clamping at zero.
///
/// Returns the remaining hit points.
pub fn apply_damage(defender: &mut CardInstance, damage: u32) -> u32 {
    defender.take_damage(damage)
}
