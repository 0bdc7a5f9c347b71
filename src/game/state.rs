//! The game state aggregate.
//!
//! `GameState` owns everything one simulated game touches: card instances,
//! zones, life, per-turn counters, the commander, the trigger stack, the
//! property bag and the game's own RNG.
//!
//! The mutators live in sibling modules:
//! - `play`: land drops, casting, commander, graveyard casting, turns
//! - `events`: life, deaths, tokens, opponent-side events
//! - `mana`: producer enumeration and payment
//! - `triggers`: enqueue with the doubling rule, drain
//!
//! Every public mutator drains the trigger stack before returning, so the
//! stack is empty whenever control is back with the caller.

use rustc_hash::FxHashMap;

use crate::cards::Card;
use crate::core::{EntityId, GameRng, GameResult, SimConfig};
use crate::stack::TriggerStack;
use crate::zones::{Zone, ZoneManager};

/// Property bag key for cumulative life lost by all opponents.
pub const OPPONENT_LIFE_LOST: &str = "opponent_life_lost";

/// Counters reset at the start of every turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnCounters {
    pub lands_played: u32,
    pub nonland_cards_played: u32,
    pub life_gained: i64,
    pub cards_drawn: u32,
    /// The once-per-turn graveyard cast has been used.
    pub graveyard_cast_used: bool,
}

/// Full state of one simulated game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) config: SimConfig,
    pub(crate) rng: GameRng,

    /// Card instances by entity ID.
    pub(crate) cards: FxHashMap<EntityId, Card>,
    pub(crate) zones: ZoneManager,
    next_entity_id: u32,

    pub(crate) life: i64,
    pub(crate) turn: u32,
    pub(crate) counters: TurnCounters,

    pub(crate) commander: Option<EntityId>,
    pub(crate) commander_casts: u32,

    pub(crate) stack: TriggerStack,
    pub(crate) cascade_aborts: u32,

    /// Cross-cutting numeric accumulators.
    properties: FxHashMap<String, i64>,
}

impl GameState {
    /// Create an empty game: no cards, starting life, turn 0.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: SimConfig, rng: GameRng) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            life: config.starting_life,
            config,
            rng,
            cards: FxHashMap::default(),
            zones: ZoneManager::new(),
            next_entity_id: 0,
            turn: 0,
            counters: TurnCounters::default(),
            commander: None,
            commander_casts: 0,
            stack: TriggerStack::new(),
            cascade_aborts: 0,
            properties: FxHashMap::default(),
        })
    }

    /// Create an empty game seeded directly.
    pub fn with_seed(config: SimConfig, seed: u64) -> GameResult<Self> {
        Self::new(config, GameRng::new(seed))
    }

    /// Build a ready-to-play game: the deck becomes the library (in the
    /// given order), the commander goes to the command zone.
    ///
    /// Call `new_game` to shuffle and draw the opening hand.
    pub fn with_deck(
        config: SimConfig,
        rng: GameRng,
        deck: Vec<Card>,
        commander: Option<Card>,
    ) -> GameResult<Self> {
        let mut state = Self::new(config, rng)?;
        for card in deck {
            state.add_card(card, Zone::Library);
        }
        if let Some(card) = commander {
            let id = state.add_card(card, Zone::Command);
            state.commander = Some(id);
        }
        Ok(state)
    }

    /// Shuffle the library and draw the opening hand.
    pub fn new_game(&mut self) {
        self.zones.shuffle(Zone::Library, &mut self.rng);
        let hand_size = self.config.opening_hand_size;
        for _ in 0..hand_size {
            if self.draw_one().is_none() {
                break;
            }
        }
        self.counters = TurnCounters::default();
    }

    // === Entity Management ===

    fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Store a card and place it in a zone, without firing anything.
    pub(crate) fn add_card(&mut self, card: Card, zone: Zone) -> EntityId {
        let id = self.insert_card(card);
        self.zones.add(id, zone);
        id
    }

    /// Store a card that is not in any zone yet.
    pub(crate) fn insert_card(&mut self, card: Card) -> EntityId {
        let id = self.alloc_entity();
        self.cards.insert(id, card);
        id
    }

    /// Get a card instance.
    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a mutable card instance.
    pub fn card_mut(&mut self, id: EntityId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    pub(crate) fn card_name(&self, id: EntityId) -> String {
        self.cards.get(&id).map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    /// Find the first card with `name` in a zone.
    #[must_use]
    pub fn find_in(&self, zone: Zone, name: &str) -> Option<EntityId> {
        self.zones
            .iter(zone)
            .find(|id| self.cards.get(id).is_some_and(|c| c.name == name))
    }

    // === Fixture helpers ===

    /// Put a card straight onto the battlefield (untapped, no triggers).
    pub fn add_to_battlefield(&mut self, card: Card) -> EntityId {
        self.add_card(card, Zone::Battlefield)
    }

    /// Put a card into the hand.
    pub fn add_to_hand(&mut self, card: Card) -> EntityId {
        self.add_card(card, Zone::Hand)
    }

    /// Put a card on top of the library.
    pub fn add_to_library_top(&mut self, card: Card) -> EntityId {
        self.add_card(card, Zone::Library)
    }

    /// Put a card into the graveyard.
    pub fn add_to_graveyard(&mut self, card: Card) -> EntityId {
        self.add_card(card, Zone::Graveyard)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    #[must_use]
    pub fn life(&self) -> i64 {
        self.life
    }

    /// Turn number (0 before the first `start_turn`).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn counters(&self) -> &TurnCounters {
        &self.counters
    }

    /// The commander's handle, wherever it is.
    #[must_use]
    pub fn commander(&self) -> Option<EntityId> {
        self.commander
    }

    /// `true` while the commander waits in the command zone.
    #[must_use]
    pub fn commander_in_command_zone(&self) -> bool {
        self.commander.is_some_and(|id| self.zones.is_in(id, Zone::Command))
    }

    #[must_use]
    pub fn commander_casts(&self) -> u32 {
        self.commander_casts
    }

    #[must_use]
    pub fn stack(&self) -> &TriggerStack {
        &self.stack
    }

    /// Number of cascades aborted by the depth ceiling so far.
    #[must_use]
    pub fn cascade_aborts(&self) -> u32 {
        self.cascade_aborts
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Cards in a zone, in order.
    pub fn cards_in(&self, zone: Zone) -> impl Iterator<Item = (EntityId, &Card)> + '_ {
        self.zones
            .iter(zone)
            .filter_map(move |id| self.cards.get(&id).map(|c| (id, c)))
    }

    /// Creatures on the battlefield, in order.
    pub fn creatures(&self) -> impl Iterator<Item = (EntityId, &Card)> + '_ {
        self.cards_in(Zone::Battlefield).filter(|(_, c)| c.is_creature())
    }

    #[must_use]
    pub fn creature_count(&self) -> usize {
        self.creatures().count()
    }

    /// Sum of power over creatures with a defined power.
    #[must_use]
    pub fn total_power(&self) -> i64 {
        self.creatures().filter_map(|(_, c)| c.power).map(i64::from).sum()
    }

    /// Sum of toughness over creatures with a defined toughness.
    #[must_use]
    pub fn total_toughness(&self) -> i64 {
        self.creatures().filter_map(|(_, c)| c.toughness).map(i64::from).sum()
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.zones.len(Zone::Hand)
    }

    #[must_use]
    pub fn library_size(&self) -> usize {
        self.zones.len(Zone::Library)
    }

    #[must_use]
    pub fn graveyard_size(&self) -> usize {
        self.zones.len(Zone::Graveyard)
    }

    #[must_use]
    pub fn graveyard_creatures(&self) -> usize {
        self.cards_in(Zone::Graveyard).filter(|(_, c)| c.is_creature()).count()
    }

    // === Property bag ===

    /// Read a property (0 if never set).
    #[must_use]
    pub fn property(&self, key: &str) -> i64 {
        self.properties.get(key).copied().unwrap_or(0)
    }

    /// Add to a property.
    pub fn add_property(&mut self, key: &str, delta: i64) {
        *self.properties.entry(key.to_string()).or_insert(0) += delta;
    }

    /// Cumulative life lost by opponents.
    #[must_use]
    pub fn opponent_life_lost(&self) -> i64 {
        self.property(OPPONENT_LIFE_LOST)
    }
}
