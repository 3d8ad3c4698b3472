//! Combat resolution: matchup tables, damage and combos.
//!
//! ## Components
//!
//! - `matchups`: essence and class strong/weak tables, loaded as a
//!   `BattleSystem`
//! - `damage`: the `DamageCalculator`
//! - `combo`: pair and triple combo detection
//!
//! Nothing here owns game state. The turn controller hands in cards and
//! zones and records what happened.

pub mod matchups;
pub mod damage;
pub mod combo;

pub use matchups::{
    Advantage, BattleSystem, ClassMatchup, ClassTable, DamageCalculation, EssenceMatchup,
    EssenceTable,
};
pub use damage::{apply_damage, AttackReport, DamageBreakdown, DamageCalculator};
pub use combo::{
    apply_triple_combo, detect_pair_combo, detect_triple_combo, pair_combos, triple_combo,
    ComboKind, ComboMatch, TripleComboHit,
};
