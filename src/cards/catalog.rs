//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition the game knows about,
//! loaded from one or more JSON card files. Lookup is by `CardId`; iteration
//! follows load order so that decks built from the catalog are reproducible.

use std::path::Path;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, Category};
use crate::error::ConfigError;

const BUILTIN_CARDS: &str = include_str!("../../data/cards.json");

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use strategic_mythology::cards::CardCatalog;
///
/// let catalog = CardCatalog::from_json_str(r#"[
///     { "id": "fire", "name": "Burnt Offering", "type": "essence", "essence": "fire", "hp": 50, "atk": 10 },
///     { "id": "trtn", "name": "Triton", "type": "char", "classes": ["wilds", "auth"], "hp": 110, "atk": 22, "def": 8 }
/// ]"#).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get("trtn").unwrap().name, "Triton");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    order: Vec<CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON array of card records.
    ///
    /// An empty array is an error: a game cannot start without cards.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.load_json_str(json)?;
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(catalog)
    }

    /// The catalog shipped with the crate (`data/cards.json`).
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_CARDS)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.load_path(path)?;
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(catalog)
    }

    /// Append the cards of another JSON card file.
    ///
    /// Returns the number of cards added. Nothing is added if any record in
    /// the file is malformed or collides with an existing id.
    pub fn load_json_str(&mut self, json: &str) -> Result<usize, ConfigError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;

        let mut seen = rustc_hash::FxHashSet::default();
        for card in &cards {
            if self.contains(&card.id) || !seen.insert(card.id.clone()) {
                return Err(ConfigError::DuplicateCard(card.id.to_string()));
            }
        }

        let added = cards.len();
        for card in cards {
            self.insert(card);
        }
        log::debug!("catalog: loaded {} cards ({} total)", added, self.len());
        Ok(added)
    }

    /// Append the cards of a JSON card file on disk.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_json_str(&json)
    }

    /// Register a single card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), ConfigError> {
        if self.contains(&card.id) {
            return Err(ConfigError::DuplicateCard(card.id.to_string()));
        }
        self.insert(card);
        Ok(())
    }

    fn insert(&mut self, card: CardDefinition) {
        self.order.push(card.id.clone());
        self.cards.insert(card.id.clone(), card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.get(&CardId::new(id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Find cards of one category.
    pub fn find_by_category(&self, category: Category) -> impl Iterator<Item = &CardDefinition> {
        self.iter().filter(move |c| c.category == category)
    }

    /// Resolve a deck list of card ids to definitions, in list order.
    pub fn resolve<'a, I>(&self, ids: I) -> Result<Vec<CardDefinition>, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownCatalogCard(id.to_string()))
            })
            .collect()
    }
}
