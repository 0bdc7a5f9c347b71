//! Card instances.
//!
//! A `Card` is one physical object in the game: printed characteristics
//! (name, type, cost, mana production, abilities) plus the mutable state
//! the game tracks on it (power/toughness after counters, tapped).
//!
//! ## Power and toughness
//!
//! `power`/`toughness` are `None` for anything that isn't creature-like.
//! `None` means "not applicable" and is never treated as 0: counter
//! effects skip it. The printed values are captured once at construction
//! in `base_power`/`base_toughness` and used to compute counter deltas.
//!
//! ## Building cards
//!
//! ```
//! use soul_sisters_sim::cards::{Ability, Card, CardType, TriggerEvent};
//! use soul_sisters_sim::mana::{ManaColor, ManaCost};
//!
//! let warden = Card::creature("Soul Warden", ManaCost::new(1, 0, 0), 1, 1)
//!     .with_ability(TriggerEvent::AnyCreatureEnters, Ability::gain_life(1));
//! assert_eq!(warden.base_power(), Some(1));
//!
//! let shrine = Card::land("Godless Shrine", &[ManaColor::White, ManaColor::Black])
//!     .with_etb_life_cost(2);
//! assert_eq!(shrine.card_type, CardType::Land);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::mana::{ManaColor, ManaCost};

use super::ability::{Ability, AbilityBinding, TriggerEvent};

/// Printed card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Instant,
    Sorcery,
    Planeswalker,
}

impl CardType {
    /// `true` for types that stay on the battlefield once they resolve.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Land => "Land",
            CardType::Creature => "Creature",
            CardType::Artifact => "Artifact",
            CardType::Enchantment => "Enchantment",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
            CardType::Planeswalker => "Planeswalker",
        };
        f.write_str(name)
    }
}

/// A single card instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub name: String,
    pub card_type: CardType,
    pub cost: ManaCost,

    /// Colours this permanent can tap for. Empty for non-producers.
    pub produces: SmallVec<[ManaColor; 2]>,

    /// Current power (after counters). `None` if not creature-like.
    pub power: Option<i32>,
    /// Current toughness (after counters). `None` if not creature-like.
    pub toughness: Option<i32>,
    base_power: Option<i32>,
    base_toughness: Option<i32>,

    /// Tap state; only meaningful for producers.
    pub tapped: bool,
    pub enters_tapped: bool,
    /// Life paid when this land is played.
    pub etb_life_cost: i64,
    /// Life paid each time this producer is tapped for a cost.
    pub tap_life_cost: i64,

    /// Created by an effect; ceases to exist instead of going to the graveyard.
    pub is_token: bool,
    /// While on the battlefield, triggers from sources with base power 2 or
    /// less are put on the stack twice.
    pub doubles_small_triggers: bool,
    /// While on the battlefield, once per turn a creature with mana value 2
    /// or less may be cast from the graveyard.
    pub grants_graveyard_cast: bool,

    abilities: SmallVec<[AbilityBinding; 2]>,
}

impl Card {
    /// Create a card with no stats, production or abilities.
    pub fn new(name: impl Into<String>, card_type: CardType, cost: ManaCost) -> Self {
        Self {
            name: name.into(),
            card_type,
            cost,
            produces: SmallVec::new(),
            power: None,
            toughness: None,
            base_power: None,
            base_toughness: None,
            tapped: false,
            enters_tapped: false,
            etb_life_cost: 0,
            tap_life_cost: 0,
            is_token: false,
            doubles_small_triggers: false,
            grants_graveyard_cast: false,
            abilities: SmallVec::new(),
        }
    }

    /// A land producing the given colours.
    pub fn land(name: impl Into<String>, produces: &[ManaColor]) -> Self {
        Self::new(name, CardType::Land, ManaCost::FREE).with_produces(produces)
    }

    /// A creature with printed power/toughness.
    pub fn creature(name: impl Into<String>, cost: ManaCost, power: i32, toughness: i32) -> Self {
        Self::new(name, CardType::Creature, cost).with_stats(power, toughness)
    }

    /// A creature token.
    pub fn token(name: impl Into<String>, power: i32, toughness: i32) -> Self {
        let mut card = Self::creature(name, ManaCost::FREE, power, toughness);
        card.is_token = true;
        card
    }

    // === Builder ===

    /// Set printed power/toughness (also captured as the base values).
    #[must_use]
    pub fn with_stats(mut self, power: i32, toughness: i32) -> Self {
        self.power = Some(power);
        self.toughness = Some(toughness);
        self.base_power = Some(power);
        self.base_toughness = Some(toughness);
        self
    }

    /// Set the colours this permanent can tap for.
    #[must_use]
    pub fn with_produces(mut self, colors: &[ManaColor]) -> Self {
        self.produces = SmallVec::from_slice(colors);
        self
    }

    /// Mark as entering the battlefield tapped.
    #[must_use]
    pub fn entering_tapped(mut self) -> Self {
        self.enters_tapped = true;
        self
    }

    /// Life paid when played.
    #[must_use]
    pub fn with_etb_life_cost(mut self, life: i64) -> Self {
        self.etb_life_cost = life;
        self
    }

    /// Life paid per tap.
    #[must_use]
    pub fn with_tap_life_cost(mut self, life: i64) -> Self {
        self.tap_life_cost = life;
        self
    }

    /// Mark as the trigger doubler.
    #[must_use]
    pub fn doubling_small_triggers(mut self) -> Self {
        self.doubles_small_triggers = true;
        self
    }

    /// Mark as granting the once-per-turn graveyard cast.
    #[must_use]
    pub fn granting_graveyard_cast(mut self) -> Self {
        self.grants_graveyard_cast = true;
        self
    }

    /// Append an ability binding.
    #[must_use]
    pub fn with_ability(mut self, event: TriggerEvent, ability: Ability) -> Self {
        self.abilities.push(AbilityBinding::new(event, ability));
        self
    }

    // === Queries ===

    /// Printed power.
    #[must_use]
    pub fn base_power(&self) -> Option<i32> {
        self.base_power
    }

    /// Printed toughness.
    #[must_use]
    pub fn base_toughness(&self) -> Option<i32> {
        self.base_toughness
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.card_type == CardType::Land
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    /// `true` if this card stays on the battlefield when cast.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.card_type.is_permanent()
    }

    /// `true` if this permanent can tap for mana.
    #[must_use]
    pub fn is_mana_producer(&self) -> bool {
        !self.produces.is_empty()
    }

    /// Mana value (lands are free).
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.cost.total()
    }

    /// All bindings, in printed order.
    #[must_use]
    pub fn abilities(&self) -> &[AbilityBinding] {
        &self.abilities
    }

    /// Abilities bound to `event`, in printed order.
    pub fn abilities_for(&self, event: TriggerEvent) -> impl Iterator<Item = &Ability> + '_ {
        self.abilities
            .iter()
            .filter(move |b| b.event == event)
            .map(|b| &b.ability)
    }

    /// `true` if any ability reacts to `event`.
    #[must_use]
    pub fn has_trigger(&self, event: TriggerEvent) -> bool {
        self.abilities.iter().any(|b| b.event == event)
    }

    /// Net +1/+1 counters, measured as power above printed power.
    #[must_use]
    pub fn counters(&self) -> i32 {
        match (self.power, self.base_power) {
            (Some(p), Some(base)) => (p - base).max(0),
            _ => 0,
        }
    }

    // === Mutation ===

    /// Add +N/+N. Fields that are `None` are left alone.
    pub fn add_counters(&mut self, amount: i32) {
        if let Some(p) = self.power.as_mut() {
            *p += amount;
        }
        if let Some(t) = self.toughness.as_mut() {
            *t += amount;
        }
    }

    /// Drop counters and untap (leaving the battlefield).
    pub fn reset(&mut self) {
        self.power = self.base_power;
        self.toughness = self.base_toughness;
        self.tapped = false;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.card_type, self.power, self.toughness) {
            (CardType::Land, _, _) => {
                write!(f, "{} (Land)", self.name)?;
                if self.tapped {
                    f.write_str(" (tapped)")?;
                }
                Ok(())
            }
            (_, Some(p), Some(t)) => write!(f, "{} ({} {}/{}, {})", self.name, self.card_type, p, t, self.cost),
            _ => write!(f, "{} ({}, {})", self.name, self.card_type, self.cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_captures_base_stats() {
        let mut card = Card::creature("Karlov", ManaCost::new(1, 1, 0), 2, 2);
        card.add_counters(3);

        assert_eq!(card.power, Some(5));
        assert_eq!(card.toughness, Some(5));
        assert_eq!(card.base_power(), Some(2));
        assert_eq!(card.counters(), 3);

        card.reset();
        assert_eq!(card.power, Some(2));
        assert_eq!(card.counters(), 0);
    }

    #[test]
    fn test_counters_skip_missing_stats() {
        let mut card = Card::new("Sol Ring", CardType::Artifact, ManaCost::new(0, 0, 1));
        card.add_counters(2);

        assert_eq!(card.power, None);
        assert_eq!(card.toughness, None);
        assert_eq!(card.counters(), 0);
    }

    #[test]
    fn test_abilities_for_preserves_order() {
        let card = Card::creature("Archivist", ManaCost::new(1, 0, 1), 2, 2)
            .with_ability(TriggerEvent::OpponentSearchedLibrary, Ability::draw(1))
            .with_ability(TriggerEvent::SelfEnters, Ability::add_counters(1))
            .with_ability(TriggerEvent::OpponentSearchedLibrary, Ability::gain_life(1));

        let found: Vec<_> = card.abilities_for(TriggerEvent::OpponentSearchedLibrary).collect();
        assert_eq!(found, vec![&Ability::draw(1), &Ability::gain_life(1)]);
        assert!(card.has_trigger(TriggerEvent::SelfEnters));
        assert!(!card.has_trigger(TriggerEvent::LifeGained));
    }

    #[test]
    fn test_land_and_token() {
        let land = Card::land("Caves", &[ManaColor::White, ManaColor::Black]).with_tap_life_cost(1);
        assert!(land.is_land());
        assert!(land.is_mana_producer());
        assert_eq!(land.mana_value(), 0);
        assert_eq!(land.power, None);

        let token = Card::token("Vampire", 1, 1);
        assert!(token.is_token);
        assert!(token.is_creature());
    }

    #[test]
    fn test_instants_are_not_permanents() {
        assert!(!CardType::Instant.is_permanent());
        assert!(!CardType::Sorcery.is_permanent());
        assert!(CardType::Artifact.is_permanent());
    }

    #[test]
    fn test_display() {
        let card = Card::creature("Soul Warden", ManaCost::new(1, 0, 0), 1, 1);
        assert_eq!(card.to_string(), "Soul Warden (Creature 1/1, {W})");
    }
}
