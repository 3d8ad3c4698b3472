//! Tag vocabularies: essences and classes.
//!
//! Both vocabularies are closed. Card data naming a tag outside them fails
//! to load rather than silently producing a card with no matchups. A few
//! legacy spellings from older data files are accepted as aliases.
//!
//! Some essences (`plant`, `decay`, `insight`) have no matchup entry of their
//! own; they still appear as targets in other entries or on cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Elemental/affinity tag driving the essence matchup axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Essence {
    Fire,
    Water,
    Air,
    Earth,
    #[serde(alias = "zap")]
    Electricity,
    Love,
    Malice,
    Hubris,
    Wisdom,
    Light,
    Dark,
    Vit,
    Death,
    #[serde(alias = "just")]
    Justice,
    Luck,
    Plant,
    Decay,
    Insight,
}

impl Essence {
    /// Every essence, in table order.
    pub const ALL: [Essence; 18] = [
        Essence::Fire,
        Essence::Water,
        Essence::Air,
        Essence::Earth,
        Essence::Electricity,
        Essence::Love,
        Essence::Malice,
        Essence::Hubris,
        Essence::Wisdom,
        Essence::Light,
        Essence::Dark,
        Essence::Vit,
        Essence::Death,
        Essence::Justice,
        Essence::Luck,
        Essence::Plant,
        Essence::Decay,
        Essence::Insight,
    ];

    /// Lowercase data-file name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Essence::Fire => "fire",
            Essence::Water => "water",
            Essence::Air => "air",
            Essence::Earth => "earth",
            Essence::Electricity => "electricity",
            Essence::Love => "love",
            Essence::Malice => "malice",
            Essence::Hubris => "hubris",
            Essence::Wisdom => "wisdom",
            Essence::Light => "light",
            Essence::Dark => "dark",
            Essence::Vit => "vit",
            Essence::Death => "death",
            Essence::Justice => "justice",
            Essence::Luck => "luck",
            Essence::Plant => "plant",
            Essence::Decay => "decay",
            Essence::Insight => "insight",
        }
    }
}

impl std::fmt::Display for Essence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Archetype tag driving the class matchup axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassTag {
    #[serde(alias = "warriors")]
    Wars,
    Heroes,
    Wilds,
    Mals,
    Oracles,
    Ecs,
    Cares,
    Auth,
    Sages,
    Mys,
}

impl ClassTag {
    /// Every class, in table order.
    pub const ALL: [ClassTag; 10] = [
        ClassTag::Wars,
        ClassTag::Heroes,
        ClassTag::Wilds,
        ClassTag::Mals,
        ClassTag::Oracles,
        ClassTag::Ecs,
        ClassTag::Cares,
        ClassTag::Auth,
        ClassTag::Sages,
        ClassTag::Mys,
    ];

    /// Lowercase data-file name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ClassTag::Wars => "wars",
            ClassTag::Heroes => "heroes",
            ClassTag::Wilds => "wilds",
            ClassTag::Mals => "mals",
            ClassTag::Oracles => "oracles",
            ClassTag::Ecs => "ecs",
            ClassTag::Cares => "cares",
            ClassTag::Auth => "auth",
            ClassTag::Sages => "sages",
            ClassTag::Mys => "mys",
        }
    }
}

impl std::fmt::Display for ClassTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card's class tags. Cards carry at most a handful.
pub type ClassSet = SmallVec<[ClassTag; 3]>;
