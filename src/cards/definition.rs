//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a catalog card: its
//! category, combat stats and tags. The hit points a card has left during a
//! battle are stored separately in `CardInstance`.
//!
//! ## Data format
//!
//! Definitions load from the same record shape the card data files use:
//!
//! ```json
//! { "id": "trtn", "name": "Triton", "type": "char",
//!   "classes": ["wilds", "auth"], "essences": ["water"],
//!   "hp": 110, "atk": 22, "def": 8, "spd": 9 }
//! ```
//!
//! `type` is authoritative when present. Without it the category is inferred:
//! a card naming an `essence` is an essence card, anything else is a char.
//! Records that only list `essences` take the first one as their essence tag.

use serde::{Deserialize, Serialize};

use super::tags::{ClassSet, ClassTag, Essence};

/// Catalog identifier of a card (e.g. `"trtn"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card category. Each category owns one battle-zone slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Char,
    Essence,
    Ability,
}

impl Category {
    /// Infer a category for a card whose data gives none.
    #[must_use]
    pub fn infer(essence: Option<Essence>) -> Self {
        if essence.is_some() {
            Category::Essence
        } else {
            Category::Char
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Char => write!(f, "char"),
            Category::Essence => write!(f, "essence"),
            Category::Ability => write!(f, "ability"),
        }
    }
}

/// Combat stats. All values are non-negative by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
    pub hp: u32,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use strategic_mythology::cards::{CardDefinition, Category, ClassTag, Essence};
///
/// let triton = CardDefinition::new("trtn", "Triton", Category::Char)
///     .with_stats(22, 8, 9, 110)
///     .with_essence(Essence::Water)
///     .with_classes([ClassTag::Wilds, ClassTag::Auth]);
///
/// assert_eq!(triton.stats.atk, 22);
/// assert!(triton.has_class(ClassTag::Auth));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub struct CardDefinition {
    /// Catalog identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Which battle-zone slot the card goes into.
    pub category: Category,

    /// Combat stats; `hp` is the starting value.
    pub stats: Stats,

    /// Essence tag, if any.
    pub essence: Option<Essence>,

    /// Class tags, possibly empty.
    pub classes: ClassSet,
}

impl CardDefinition {
    /// Create a definition with zeroed stats and no tags.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            category,
            stats: Stats::default(),
            essence: None,
            classes: ClassSet::new(),
        }
    }

    /// Set all combat stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, atk: u32, def: u32, spd: u32, hp: u32) -> Self {
        self.stats = Stats { atk, def, spd, hp };
        self
    }

    /// Set the essence tag (builder pattern).
    #[must_use]
    pub fn with_essence(mut self, essence: Essence) -> Self {
        self.essence = Some(essence);
        self
    }

    /// Set the class tags (builder pattern). Duplicates are dropped.
    #[must_use]
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = ClassTag>) -> Self {
        self.classes.clear();
        for class in classes {
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Check whether the card carries a class tag.
    #[must_use]
    pub fn has_class(&self, class: ClassTag) -> bool {
        self.classes.contains(&class)
    }
}

/// On-disk card record.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CardRecord {
    id: String,
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(default)]
    hp: u32,
    #[serde(default)]
    atk: u32,
    #[serde(default)]
    def: u32,
    #[serde(default)]
    spd: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    essence: Option<Essence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    essences: Vec<Essence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    classes: Vec<ClassTag>,
}

impl TryFrom<CardRecord> for CardDefinition {
    type Error = String;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(format!("card '{}' has an empty id", record.name));
        }

        let category = record.category.unwrap_or_else(|| Category::infer(record.essence));
        let essence = record.essence.or_else(|| record.essences.first().copied());

        let mut def = CardDefinition::new(record.id, record.name, category)
            .with_stats(record.atk, record.def, record.spd, record.hp)
            .with_classes(record.classes);
        def.essence = essence;
        Ok(def)
    }
}

impl From<CardDefinition> for CardRecord {
    fn from(def: CardDefinition) -> Self {
        Self {
            id: def.id.0,
            name: def.name,
            category: Some(def.category),
            hp: def.stats.hp,
            atk: def.stats.atk,
            def: def.stats.def,
            spd: def.stats.spd,
            essence: def.essence,
            essences: Vec::new(),
            classes: def.classes.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new("fire", "Burnt Offering", Category::Essence)
            .with_stats(10, 0, 0, 50)
            .with_essence(Essence::Fire);

        assert_eq!(card.id, CardId::new("fire"));
        assert_eq!(card.stats, Stats { atk: 10, def: 0, spd: 0, hp: 50 });
        assert_eq!(card.essence, Some(Essence::Fire));
        assert!(card.classes.is_empty());
    }

    #[test]
    fn test_with_classes_dedups() {
        let card = CardDefinition::new("a", "A", Category::Ability)
            .with_classes([ClassTag::Wars, ClassTag::Heroes, ClassTag::Wars]);

        assert_eq!(card.classes.as_slice(), &[ClassTag::Wars, ClassTag::Heroes]);
    }

    #[test]
    fn test_explicit_type_is_authoritative() {
        let json = r#"{ "id": "athletics", "name": "Athletics", "type": "ability",
                        "classes": ["wars", "heroes", "wilds"], "hp": 50, "atk": 10, "def": 0 }"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(card.category, Category::Ability);
        assert_eq!(card.classes.len(), 3);
    }

    #[test]
    fn test_category_inferred_from_essence() {
        let json = r#"{ "id": "water", "name": "Tidal Wave", "essence": "water", "hp": 50, "atk": 10 }"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(card.category, Category::Essence);
    }

    #[test]
    fn test_category_falls_back_to_char() {
        let json = r#"{ "id": "x", "name": "Nobody", "classes": ["mys"], "hp": 10 }"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(card.category, Category::Char);
    }

    #[test]
    fn test_essences_list_supplies_essence() {
        let json = r#"{ "id": "amph", "name": "Amphitrite", "type": "char",
                        "classes": ["cares", "wilds"], "essences": ["water", "vit"],
                        "hp": 100, "atk": 20, "def": 5, "spd": 10, "img": "./amph.png" }"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(card.category, Category::Char);
        assert_eq!(card.essence, Some(Essence::Water));
        assert_eq!(card.stats.spd, 10);
    }

    #[test]
    fn test_empty_id_rejected() {
        let json = r#"{ "id": " ", "name": "Blank" }"#;
        assert!(serde_json::from_str::<CardDefinition>(json).is_err());
    }

    #[test]
    fn test_negative_stat_rejected() {
        let json = r#"{ "id": "neg", "name": "Neg", "hp": -5 }"#;
        assert!(serde_json::from_str::<CardDefinition>(json).is_err());
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new("trtn", "Triton", Category::Char)
            .with_stats(22, 8, 9, 110)
            .with_essence(Essence::Water)
            .with_classes([ClassTag::Wilds, ClassTag::Auth]);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
