//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` tracks which zone each card is in and the order of
//! every zone. All five zones are ordered: battlefield order is the
//! enumeration order for trigger bursts, and library order decides draws.
//!
//! Orders are `im::Vector`s, so `snapshot` is an O(1) clone. Entry bursts
//! take a battlefield snapshot before the entering card is added.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// The player's zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// The deck. Last element is the top.
    Library,
    Hand,
    Battlefield,
    Graveyard,
    /// Where the commander waits between casts.
    Command,
}

impl Zone {
    const fn index(self) -> usize {
        match self {
            Zone::Library => 0,
            Zone::Hand => 1,
            Zone::Battlefield => 2,
            Zone::Graveyard => 3,
            Zone::Command => 4,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Graveyard => "graveyard",
            Zone::Command => "command zone",
        };
        f.write_str(name)
    }
}

/// Manages card locations across zones.
///
/// A card is in at most one zone at a time; adding a card that is already
/// tracked panics.
///
/// ## Usage
///
/// ```
/// use soul_sisters_sim::core::EntityId;
/// use soul_sisters_sim::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::new();
/// zones.add(EntityId(10), Zone::Library);
/// zones.add(EntityId(11), Zone::Library);
///
/// // Last added is on top
/// assert_eq!(zones.top(Zone::Library), Some(EntityId(11)));
///
/// zones.move_to(EntityId(11), Zone::Hand);
/// assert_eq!(zones.zone_of(EntityId(11)), Some(Zone::Hand));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: entity_id -> zone
    locations: FxHashMap<EntityId, Zone>,

    /// Per-zone order, indexed by `Zone::index`.
    orders: [Vector<EntityId>; 5],
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn order(&self, zone: Zone) -> &Vector<EntityId> {
        &self.orders[zone.index()]
    }

    fn order_mut(&mut self, zone: Zone) -> &mut Vector<EntityId> {
        &mut self.orders[zone.index()]
    }

    fn detach(&mut self, entity: EntityId, zone: Zone) {
        let order = self.order_mut(zone);
        if let Some(i) = order.index_of(&entity) {
            order.remove(i);
        }
    }

    /// Add a card to the end (top) of a zone.
    ///
    /// Panics if the entity is already in the manager.
    pub fn add(&mut self, entity: EntityId, zone: Zone) {
        if self.locations.contains_key(&entity) {
            panic!("Entity {:?} already exists in zone manager", entity);
        }
        self.locations.insert(entity, zone);
        self.order_mut(zone).push_back(entity);
    }

    /// Move a card to the end of another zone.
    ///
    /// Returns the old zone, or `None` if the card wasn't found. Moving a
    /// card to the zone it is already in leaves its position unchanged.
    pub fn move_to(&mut self, entity: EntityId, new_zone: Zone) -> Option<Zone> {
        let old_zone = self.locations.get(&entity).copied()?;
        if old_zone == new_zone {
            return Some(old_zone);
        }

        self.detach(entity, old_zone);
        self.locations.insert(entity, new_zone);
        self.order_mut(new_zone).push_back(entity);

        Some(old_zone)
    }

    /// Remove a card from the manager entirely.
    ///
    /// Returns the zone it was in, or `None` if not found.
    pub fn remove(&mut self, entity: EntityId) -> Option<Zone> {
        let zone = self.locations.remove(&entity)?;
        self.detach(entity, zone);
        Some(zone)
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<Zone> {
        self.locations.get(&entity).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in(&self, entity: EntityId, zone: Zone) -> bool {
        self.locations.get(&entity) == Some(&zone)
    }

    /// Iterate a zone in order (index 0 first).
    pub fn iter(&self, zone: Zone) -> impl Iterator<Item = EntityId> + '_ {
        self.order(zone).iter().copied()
    }

    /// Cheap copy of a zone's current order.
    #[must_use]
    pub fn snapshot(&self, zone: Zone) -> Vector<EntityId> {
        self.order(zone).clone()
    }

    /// Card at `index` in a zone.
    #[must_use]
    pub fn get(&self, zone: Zone, index: usize) -> Option<EntityId> {
        self.order(zone).get(index).copied()
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        self.order(zone).len()
    }

    /// Check if a zone is empty.
    #[must_use]
    pub fn is_empty(&self, zone: Zone) -> bool {
        self.order(zone).is_empty()
    }

    /// Top card of a zone (last element).
    #[must_use]
    pub fn top(&self, zone: Zone) -> Option<EntityId> {
        self.order(zone).last().copied()
    }

    /// Shuffle a zone.
    pub fn shuffle(&mut self, zone: Zone, rng: &mut GameRng) {
        let mut cards: Vec<EntityId> = self.order(zone).iter().copied().collect();
        rng.shuffle(&mut cards);
        *self.order_mut(zone) = cards.into_iter().collect();
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check if the manager contains an entity.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut manager = ZoneManager::new();

        manager.add(EntityId(10), Zone::Hand);
        manager.add(EntityId(11), Zone::Hand);

        assert_eq!(manager.zone_of(EntityId(10)), Some(Zone::Hand));
        assert_eq!(manager.zone_of(EntityId(99)), None);
        assert!(manager.is_in(EntityId(11), Zone::Hand));
        assert_eq!(manager.len(Zone::Hand), 2);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut manager = ZoneManager::new();
        for i in [3, 1, 2] {
            manager.add(EntityId(i), Zone::Battlefield);
        }

        let order: Vec<_> = manager.iter(Zone::Battlefield).collect();
        assert_eq!(order, vec![EntityId(3), EntityId(1), EntityId(2)]);
        assert_eq!(manager.top(Zone::Battlefield), Some(EntityId(2)));
        assert_eq!(manager.get(Zone::Battlefield, 1), Some(EntityId(1)));
    }

    #[test]
    fn test_move_between_zones() {
        let mut manager = ZoneManager::new();
        manager.add(EntityId(10), Zone::Library);

        let old = manager.move_to(EntityId(10), Zone::Hand);

        assert_eq!(old, Some(Zone::Library));
        assert_eq!(manager.zone_of(EntityId(10)), Some(Zone::Hand));
        assert_eq!(manager.len(Zone::Library), 0);
        assert_eq!(manager.len(Zone::Hand), 1);
        assert_eq!(manager.move_to(EntityId(99), Zone::Hand), None);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_moves() {
        let mut manager = ZoneManager::new();
        manager.add(EntityId(1), Zone::Battlefield);
        manager.add(EntityId(2), Zone::Hand);

        let before = manager.snapshot(Zone::Battlefield);
        manager.move_to(EntityId(2), Zone::Battlefield);

        assert_eq!(before.len(), 1);
        assert_eq!(manager.len(Zone::Battlefield), 2);
    }

    #[test]
    fn test_remove() {
        let mut manager = ZoneManager::new();
        manager.add(EntityId(10), Zone::Battlefield);

        assert_eq!(manager.remove(EntityId(10)), Some(Zone::Battlefield));
        assert!(!manager.contains(EntityId(10)));
        assert!(manager.is_empty(Zone::Battlefield));
        assert_eq!(manager.remove(EntityId(10)), None);
    }

    #[test]
    fn test_shuffle() {
        let mut manager = ZoneManager::new();
        for i in 0..20 {
            manager.add(EntityId(i), Zone::Library);
        }

        let before: Vec<_> = manager.iter(Zone::Library).collect();

        let mut rng = GameRng::new(42);
        manager.shuffle(Zone::Library, &mut rng);

        let after: Vec<_> = manager.iter(Zone::Library).collect();

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
        assert!(after.iter().all(|e| manager.is_in(*e, Zone::Library)));
    }

    #[test]
    #[should_panic(expected = "Entity")]
    fn test_duplicate_entity_panics() {
        let mut manager = ZoneManager::new();
        manager.add(EntityId(10), Zone::Hand);
        manager.add(EntityId(10), Zone::Graveyard);
    }

    #[test]
    fn test_total_cards() {
        let mut manager = ZoneManager::new();
        assert_eq!(manager.total_cards(), 0);

        manager.add(EntityId(10), Zone::Library);
        manager.add(EntityId(11), Zone::Command);

        assert_eq!(manager.total_cards(), 2);
    }
}
