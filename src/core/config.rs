//! Battle configuration.
//!
//! Tunable rules that are not part of the matchup definition: hand capacity,
//! starting hand size and the combo constants. The engine
//! reads these at session start and never mutates them.
//!
//! ```
//! use strategic_mythology::core::BattleConfig;
//!
//! let config = BattleConfig::from_json_str(r#"{ "handSize": 5, "startingHandSize": 4 }"#).unwrap();
//!
//! assert_eq!(config.hand_size, 5);
//! assert_eq!(config.triple_combo_damage, 60); // defaulted
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Session-wide rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleConfig {
    /// Maximum cards a hand may hold.
    pub hand_size: usize,

    /// Cards dealt to each side before round 1.
    pub starting_hand_size: usize,

    /// Base-power factor for combo-boosted essence/ability attackers.
    pub combo_attack_multiplier: u32,

    /// Flat damage a triple combo deals to each occupied opposing slot.
    pub triple_combo_damage: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            hand_size: 6,
            starting_hand_size: 6,
            combo_attack_multiplier: 2,
            triple_combo_damage: 60,
        }
    }
}

impl BattleConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "handSize",
                reason: "must be at least 1".into(),
            });
        }
        if self.starting_hand_size > self.hand_size {
            return Err(ConfigError::InvalidValue {
                field: "startingHandSize",
                reason: format!("{} exceeds handSize {}", self.starting_hand_size, self.hand_size),
            });
        }
        if self.combo_attack_multiplier == 0 {
            return Err(ConfigError::InvalidValue {
                field: "comboAttackMultiplier",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();

        assert_eq!(config.hand_size, 6);
        assert_eq!(config.starting_hand_size, 6);
        assert_eq!(config.combo_attack_multiplier, 2);
        assert_eq!(config.triple_combo_damage, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BattleConfig::from_json_str(r#"{ "tripleComboDamage": 45 }"#).unwrap();

        assert_eq!(config.triple_combo_damage, 45);
        assert_eq!(config.hand_size, 6);
    }

    #[test]
    fn test_rejects_starting_hand_over_capacity() {
        let err = BattleConfig::from_json_str(r#"{ "handSize": 3, "startingHandSize": 4 }"#)
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { field: "startingHandSize", .. }));
    }

    #[test]
    fn test_rejects_zero_hand_size() {
        let err = BattleConfig::from_json_str(r#"{ "handSize": 0, "startingHandSize": 0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "handSize", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = BattleConfig::from_json_str("{ handSize: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = BattleConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
