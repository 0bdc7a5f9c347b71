//! Entity identification.
//!
//! Every card instance the simulation creates (deck cards, the commander,
//! tokens) gets a unique `EntityId`. Opponents are not cards; they are
//! addressed by a separate `OpponentId` so the two can never be confused.
//!
//! ## Usage
//!
//! ```
//! use soul_sisters_sim::core::{EntityId, OpponentId};
//!
//! let card = EntityId::new(10);
//! assert_eq!(card.raw(), 10);
//!
//! let opponent = OpponentId::new(2);
//! assert_eq!(opponent.index(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// IDs are allocated by the owning `GameState` and never reused within a
/// game, so a stale ID held by a pending trigger cannot alias a newer card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

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
        write!(f, "Entity({})", self.0)
    }
}

/// Index of a simulated opponent (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpponentId(pub u8);

impl OpponentId {
    /// Create a new opponent ID.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the opponent index as usize (for array indexing).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all opponent IDs for a given opponent count.
    pub fn all(count: usize) -> impl Iterator<Item = OpponentId> {
        (0..count as u8).map(OpponentId)
    }
}

impl std::fmt::Display for OpponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Opponent({})", self.0)
    }
}
