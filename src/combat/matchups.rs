//! Matchup tables.
//!
//! Two independent, read-only tables drive the damage multipliers:
//!
//! - **Essence table**: each essence is strong against at most one essence
//!   and weak against at most one.
//! - **Class table**: each class is strong against a set of classes and weak
//!   against another set.
//!
//! Relationships are not required to be symmetric. `light` is strong against
//! `dark` without either listing a weakness; entries are used exactly as
//! authored.
//!
//! Both tables, plus the multipliers and damage floor, load from a single
//! battle-system JSON file (`BattleSystem`).

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{ClassSet, ClassTag, Essence};
use crate::error::ConfigError;

/// How an attacker's tag relates to a defender's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Strong,
    Weak,
    Neutral,
}

impl Advantage {
    /// Multiplier for this advantage given the table's bonus factor.
    ///
    /// Strong multiplies by `bonus`, weak by exactly `1 / bonus`.
    #[must_use]
    pub fn multiplier(self, bonus: f64) -> f64 {
        match self {
            Advantage::Strong => bonus,
            Advantage::Weak => 1.0 / bonus,
            Advantage::Neutral => 1.0,
        }
    }
}

/// One essence table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssenceMatchup {
    #[serde(default)]
    pub strong_against: Option<Essence>,
    #[serde(default)]
    pub weak_against: Option<Essence>,
}

/// One class table entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMatchup {
    #[serde(default)]
    pub strong_against: ClassSet,
    #[serde(default)]
    pub weak_against: ClassSet,
}

/// Essence matchup table keyed by attacker essence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EssenceTable {
    entries: FxHashMap<Essence, EssenceMatchup>,
}

impl EssenceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, essence: Essence, strong: Option<Essence>, weak: Option<Essence>) -> Self {
        self.entries.insert(
            essence,
            EssenceMatchup {
                strong_against: strong,
                weak_against: weak,
            },
        );
        self
    }

    #[must_use]
    pub fn get(&self, essence: Essence) -> Option<&EssenceMatchup> {
        self.entries.get(&essence)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relation of an attacking essence to a defending one.
    ///
    /// Missing essence on either side is neutral. Strength is checked first.
    #[must_use]
    pub fn advantage(&self, attacker: Option<Essence>, defender: Option<Essence>) -> Advantage {
        let (Some(attacker), Some(defender)) = (attacker, defender) else {
            return Advantage::Neutral;
        };
        match self.get(attacker) {
            Some(entry) if entry.strong_against == Some(defender) => Advantage::Strong,
            Some(entry) if entry.weak_against == Some(defender) => Advantage::Weak,
            _ => Advantage::Neutral,
        }
    }
}

/// Class matchup table keyed by attacker class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassTable {
    entries: FxHashMap<ClassTag, ClassMatchup>,
}

impl ClassTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry (builder pattern).
    #[must_use]
    pub fn with<const S: usize, const W: usize>(
        mut self,
        class: ClassTag,
        strong: [ClassTag; S],
        weak: [ClassTag; W],
    ) -> Self {
        self.entries.insert(
            class,
            ClassMatchup {
                strong_against: strong.into_iter().collect(),
                weak_against: weak.into_iter().collect(),
            },
        );
        self
    }

    #[must_use]
    pub fn get(&self, class: ClassTag) -> Option<&ClassMatchup> {
        self.entries.get(&class)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relation of an attacker's class set to a defender's.
    ///
    /// Strong if any attacker class lists any defender class as a strength;
    /// otherwise weak if any lists one as a weakness. Empty sets are neutral.
    #[must_use]
    pub fn advantage(&self, attacker: &[ClassTag], defender: &[ClassTag]) -> Advantage {
        if attacker.is_empty() || defender.is_empty() {
            return Advantage::Neutral;
        }
        let entries: Vec<&ClassMatchup> = attacker.iter().filter_map(|c| self.get(*c)).collect();
        let lists_any = |set: &ClassSet| set.iter().any(|c| defender.contains(c));

        if entries.iter().any(|e| lists_any(&e.strong_against)) {
            Advantage::Strong
        } else if entries.iter().any(|e| lists_any(&e.weak_against)) {
            Advantage::Weak
        } else {
            Advantage::Neutral
        }
    }
}

/// Damage formula constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageCalculation {
    /// Floor applied to every computed attack.
    pub min_damage: u32,
    pub essence_bonus_multiplier: f64,
    pub class_bonus_multiplier: f64,
}

impl Default for DamageCalculation {
    fn default() -> Self {
        Self {
            min_damage: 1,
            essence_bonus_multiplier: 1.2,
            class_bonus_multiplier: 1.2,
        }
    }
}

/// The full matchup definition: damage constants plus both tables.
///
/// ```
/// use strategic_mythology::cards::Essence;
/// use strategic_mythology::combat::{Advantage, BattleSystem};
///
/// let system = BattleSystem::default();
/// let adv = system.essence_bonuses.advantage(Some(Essence::Fire), Some(Essence::Plant));
///
/// assert_eq!(adv, Advantage::Strong);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSystem {
    #[serde(default)]
    pub damage_calculation: DamageCalculation,
    pub essence_bonuses: EssenceTable,
    pub class_bonuses: ClassTable,
}

impl Default for BattleSystem {
    fn default() -> Self {
        Self {
            damage_calculation: DamageCalculation::default(),
            essence_bonuses: default_essence_table(),
            class_bonuses: default_class_table(),
        }
    }
}

impl BattleSystem {
    /// Parse and validate a battle-system definition.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let system: Self = serde_json::from_str(json)?;
        system.validate()?;
        Ok(system)
    }

    /// Read, parse and validate a battle-system file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let calc = &self.damage_calculation;
        for (field, value) in [
            ("essenceBonusMultiplier", calc.essence_bonus_multiplier),
            ("classBonusMultiplier", calc.class_bonus_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{value} is not a positive finite number"),
                });
            }
        }
        if calc.min_damage == 0 {
            return Err(ConfigError::InvalidValue {
                field: "minDamage",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn default_essence_table() -> EssenceTable {
    use Essence::*;

    EssenceTable::new()
        .with(Fire, Some(Plant), Some(Water))
        .with(Water, Some(Fire), Some(Earth))
        .with(Air, Some(Earth), Some(Fire))
        .with(Earth, Some(Water), Some(Air))
        .with(Electricity, Some(Water), Some(Earth))
        .with(Love, Some(Malice), Some(Hubris))
        .with(Malice, Some(Wisdom), Some(Love))
        .with(Hubris, Some(Wisdom), Some(Justice))
        .with(Wisdom, Some(Hubris), Some(Malice))
        .with(Light, Some(Dark), None)
        .with(Dark, Some(Light), None)
        .with(Vit, Some(Death), None)
        .with(Death, Some(Vit), None)
        .with(Justice, Some(Hubris), None)
        .with(Luck, None, None)
}

fn default_class_table() -> ClassTable {
    use ClassTag::*;

    ClassTable::new()
        .with(Wars, [Oracles, Sages], [Ecs, Cares])
        .with(Heroes, [Auth, Mys], [Wilds, Oracles])
        .with(Wilds, [Sages, Auth], [Wars, Ecs])
        .with(Mals, [Cares, Ecs], [Sages, Heroes])
        .with(Oracles, [Auth, Heroes], [Wars, Wilds])
        .with(Ecs, [Wilds, Wars], [Cares, Sages])
        .with(Cares, [Wars, Heroes], [Mals, Auth])
        .with(Auth, [Sages, Wilds], [Heroes, Oracles])
        .with(Sages, [Cares, Ecs], [Wilds, Wars])
        .with(Mys, [Auth, Sages], [Heroes, Oracles])
}
