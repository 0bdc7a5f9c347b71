//! The trigger stack: pending ability invocations, resolved LIFO.
//!
//! This file holds the data structure only. Pushing with the doubling rule
//! and draining (which needs the whole `GameState`) live in
//! `game::triggers`.

use serde::{Deserialize, Serialize};

use crate::cards::{Ability, TriggerEvent};
use crate::core::{EntityId, OpponentId};

/// What put an entry on the stack.
///
/// A permanent source is a handle, not a copy: the resolving ability reads
/// the card's fields as they are at resolution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackSource {
    /// A card the player owns.
    Permanent(EntityId),
    /// A spell cast by an opponent.
    Opponent(OpponentId),
}

impl StackSource {
    /// The card handle, for permanent sources.
    #[must_use]
    pub fn entity(self) -> Option<EntityId> {
        match self {
            StackSource::Permanent(id) => Some(id),
            StackSource::Opponent(_) => None,
        }
    }

    #[must_use]
    pub fn is_opponent(self) -> bool {
        matches!(self, StackSource::Opponent(_))
    }
}

impl std::fmt::Display for StackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackSource::Permanent(id) => write!(f, "{id}"),
            StackSource::Opponent(id) => write!(f, "{id}"),
        }
    }
}

/// Event parameters carried by an entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerParams {
    /// Life gained, for `LifeGained`.
    pub amount: Option<i64>,
    /// The card that entered or died.
    pub subject: Option<EntityId>,
    /// Target of an opponent's removal spell.
    pub target: Option<EntityId>,
}

impl TriggerParams {
    /// No parameters.
    pub const NONE: TriggerParams = TriggerParams { amount: None, subject: None, target: None };

    #[must_use]
    pub fn amount(amount: i64) -> Self {
        Self { amount: Some(amount), ..Self::NONE }
    }

    #[must_use]
    pub fn subject(subject: EntityId) -> Self {
        Self { subject: Some(subject), ..Self::NONE }
    }

    #[must_use]
    pub fn target(target: EntityId) -> Self {
        Self { target: Some(target), ..Self::NONE }
    }
}

/// One pending ability invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct StackEntry {
    pub ability: Ability,
    pub source: StackSource,
    pub event: TriggerEvent,
    pub params: TriggerParams,
}

impl StackEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(ability: Ability, source: StackSource, event: TriggerEvent, params: TriggerParams) -> Self {
        Self { ability, source, event, params }
    }

    /// `true` for opponent removal or board wipe spells.
    #[must_use]
    pub fn is_opponent_removal(&self) -> bool {
        self.source.is_opponent()
            && matches!(self.ability, Ability::DestroyTarget | Ability::DestroyAllCreatures)
    }
}

/// How a drain finished.
#[derive(Clone, Debug, PartialEq)]
pub enum DrainOutcome {
    /// Every entry resolved (the stack may have been empty to begin with).
    Resolved { count: usize },
    /// The depth ceiling was exceeded. `discarded` holds what was left
    /// when the stack was cleared.
    Aborted { resolved: usize, discarded: Vec<StackEntry> },
}

impl DrainOutcome {
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, DrainOutcome::Aborted { .. })
    }

    /// Entries that actually resolved.
    #[must_use]
    pub fn resolved(&self) -> usize {
        match self {
            DrainOutcome::Resolved { count } => *count,
            DrainOutcome::Aborted { resolved, .. } => *resolved,
        }
    }
}

/// LIFO stack of pending entries (index 0 = bottom, last = top).
#[derive(Clone, Debug, Default)]
pub struct TriggerStack {
    entries: Vec<StackEntry>,
    /// How many drains are currently running (nested drains from mutators
    /// called by a resolving ability).
    drain_depth: usize,
}

impl TriggerStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry on top.
    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry);
    }

    /// Pop the most recently pushed entry.
    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    /// Peek at the top entry.
    #[must_use]
    pub fn peek_top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries (bottom to top).
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Remove every pending entry and hand them back (bottom to top).
    pub fn clear(&mut self) -> Vec<StackEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Remove the topmost entry matching `pred`, leaving the rest in place.
    pub fn excise_topmost(&mut self, pred: impl Fn(&StackEntry) -> bool) -> Option<StackEntry> {
        let index = self.entries.iter().rposition(pred)?;
        Some(self.entries.remove(index))
    }

    /// Current nesting depth of running drains.
    #[must_use]
    pub fn drain_depth(&self) -> usize {
        self.drain_depth
    }

    pub(crate) fn enter_drain(&mut self) {
        self.drain_depth += 1;
    }

    pub(crate) fn exit_drain(&mut self) {
        self.drain_depth = self.drain_depth.saturating_sub(1);
    }
}
