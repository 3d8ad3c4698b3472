//! Card-instance identification.
//!
//! Every card that enters a session (deck, hand, or battle zone) receives a
//! unique `EntityId`. Two copies of the same catalog card are different
//! entities, so identity checks such as "a card cannot attack itself"
//! compare entity IDs rather than catalog IDs.
//!
//! ## Usage
//!
//! ```
//! use strategic_mythology::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::default();
//! let first = alloc.alloc();
//! let second = alloc.alloc();
//!
//! assert_eq!(first, EntityId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Monotonic allocator for entity IDs.
///
/// IDs are never reused within a session, so a stale selection can never
/// alias a card that entered play later.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Allocate the next entity ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
