//! Card system: tag vocabularies, definitions, instances and the catalog.
//!
//! ## Definitions vs Instances
//!
//! - `CardDefinition`: Static data for a catalog card (stats, category, tags)
//! - `CardInstance`: One copy of a card in a session, with its own hit points
//!
//! The `CardCatalog` stores definitions and loads them from JSON card files.

pub mod tags;
pub mod definition;
pub mod instance;
pub mod catalog;

pub use tags::{ClassSet, ClassTag, Essence};
pub use definition::{CardDefinition, CardId, Category, Stats};
pub use instance::CardInstance;
pub use catalog::CardCatalog;
