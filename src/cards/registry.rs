//! Card registry: the printed card table.
//!
//! The `CardRegistry` maps card names to prototype cards. `get_card`
//! returns a fresh clone every time, so the copy in a player's hand never
//! aliases the copy on the battlefield.
//!
//! `CardRegistry::standard()` holds every card the stock deck uses.
//!
//! ## Example
//!
//! ```
//! use soul_sisters_sim::cards::{Card, CardRegistry};
//! use soul_sisters_sim::mana::ManaCost;
//!
//! let mut registry = CardRegistry::new();
//! registry.register(Card::creature("Grizzly Bears", ManaCost::new(0, 0, 2), 2, 2));
//!
//! let mut bears = registry.get_card("Grizzly Bears").unwrap();
//! bears.add_counters(1);
//!
//! // The prototype is untouched.
//! assert_eq!(registry.get_card("Grizzly Bears").unwrap().power, Some(2));
//! ```

use rustc_hash::FxHashMap;

use crate::core::{GameError, GameResult};
use crate::mana::{ManaColor, ManaCost};

use super::ability::{Ability, Amount, TokenSpec, TriggerEvent};
use super::card::{Card, CardType};

const W: ManaColor = ManaColor::White;
const B: ManaColor = ManaColor::Black;
const C: ManaColor = ManaColor::Colorless;

/// 1/1 Vampire made by death and opponent-creature triggers.
pub const VAMPIRE_TOKEN: TokenSpec = TokenSpec::new("Vampire", 1, 1);
/// 1/1 Cat made at end of turn after gaining life.
pub const CAT_TOKEN: TokenSpec = TokenSpec::new("Cat", 1, 1);

/// Registry of printed cards, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, Card>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prototype card.
    ///
    /// Panics if a card with the same name already exists.
    pub fn register(&mut self, card: Card) {
        if self.cards.contains_key(&card.name) {
            panic!("Card {:?} already registered", card.name);
        }
        self.cards.insert(card.name.clone(), card);
    }

    /// Construct a fresh instance of the named card.
    pub fn get_card(&self, name: &str) -> GameResult<Card> {
        self.cards
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::UnknownCard(name.to_string()))
    }

    /// Check if a card is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over registered prototypes (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// The full table for the stock life-gain deck.
    #[must_use]
    pub fn standard() -> Self {
        let mut r = Self::new();
        register_lands(&mut r);
        register_creatures(&mut r);
        register_artifacts(&mut r);
        register_enchantments(&mut r);
        register_spells(&mut r);
        r
    }
}

fn cost(white: u32, black: u32, generic: u32) -> ManaCost {
    ManaCost::new(white, black, generic)
}

fn register_lands(r: &mut CardRegistry) {
    r.register(Card::land("Plains", &[W]));
    r.register(Card::land("Swamp", &[B]));
    r.register(Card::land("Barren Moor", &[B]).entering_tapped());
    r.register(Card::land("Brightclimb Pathway", &[W]));
    r.register(Card::land("Caves of Koilos", &[W, B]).with_tap_life_cost(1));
    r.register(Card::land("Command Tower", &[W, B]));
    r.register(Card::land("Exotic Orchard", &[W, B]));
    r.register(Card::land("Fetid Heath", &[W, B]));
    r.register(Card::land("Godless Shrine", &[W, B]).with_etb_life_cost(2));
    r.register(Card::land("Isolated Chapel", &[W, B]));
    r.register(Card::land("Marsh Flats", &[W, B]));
    r.register(
        Card::land("Radiant Fountain", &[W])
            .entering_tapped()
            .with_ability(TriggerEvent::SelfEnters, Ability::gain_life(2)),
    );
    r.register(Card::land("Rogue's Passage", &[C]));
    r.register(Card::land("Secluded Steppe", &[W]).entering_tapped());
    r.register(Card::land("Shattered Sanctum", &[W, B]));
    r.register(Card::land("Shineshadow Snarl", &[W, B]));
    r.register(Card::land("Shizo, Death's Storehouse", &[B]));
    r.register(Card::land("Silent Clearing", &[W, B]));
    r.register(Card::land("Tainted Field", &[W, B]));
    r.register(Card::land("Urborg, Tomb of Yawgmoth", &[B]));
    r.register(Card::land("Vault of Champions", &[W, B]));
    r.register(Card::land("Vault of the Archangel", &[C]));
}

fn register_creatures(r: &mut CardRegistry) {
    use TriggerEvent::*;

    let soul_sister = |name: &str| {
        Card::creature(name, cost(1, 0, 0), 1, 1).with_ability(AnyCreatureEnters, Ability::gain_life(1))
    };
    let death_watcher = |name: &str, power: i32, toughness: i32| {
        Card::creature(name, cost(0, 1, 0), power, toughness)
            .with_ability(CreatureDies, Ability::gain_life(1))
    };
    let welcomer = |name: &str, power: i32, toughness: i32| {
        Card::creature(name, cost(1, 0, 0), power, toughness)
            .with_ability(MyCreatureEnters, Ability::gain_life(1))
    };

    r.register(
        Card::creature("Aerith Gainsborough", cost(1, 0, 0), 2, 2)
            .with_ability(LifeGained, Ability::add_counters(1)),
    );
    r.register(
        Card::creature("Amalia Benavides Aguirre", cost(1, 1, 0), 1, 3)
            .with_ability(LifeGained, Ability::Explore),
    );
    r.register(
        Card::creature("Archangel of Thune", cost(2, 0, 3), 3, 4)
            .with_ability(LifeGained, Ability::AddCountersToAllCreatures { amount: 1 }),
    );
    r.register(
        Card::creature("Archivist of Oghma", cost(1, 0, 1), 2, 2)
            .with_ability(OpponentSearchedLibrary, Ability::draw(1))
            .with_ability(OpponentSearchedLibrary, Ability::gain_life(1)),
    );
    r.register(soul_sister("Auriok Champion"));
    r.register(death_watcher("Blood Artist", 0, 1));
    r.register(
        Card::creature("Charismatic Conqueror", cost(1, 1, 0), 2, 2).with_ability(
            OpponentCreatureEnters,
            Ability::ChanceToCreateToken { chance: 0.15, token: VAMPIRE_TOKEN },
        ),
    );
    r.register(death_watcher("Cruel Celebrant", 1, 2));
    r.register(
        Card::creature("Dark Confidant", cost(0, 1, 0), 2, 1)
            .with_ability(StartOfTurn, Ability::RevealAndLoseLife),
    );
    r.register(
        Card::creature("Daxos, Blessed by the Sun", cost(1, 0, 0), 2, 0)
            .with_ability(MyCreatureEnters, Ability::gain_life(1))
            .with_ability(MyCreatureDies, Ability::draw(1)),
    );
    r.register(death_watcher("Deathgreeter", 1, 1));
    r.register(
        Card::creature("Delney, Streetwise Lookout", cost(1, 0, 1), 2, 2).doubling_small_triggers(),
    );
    r.register(
        Card::creature("Elas il-Kor, Sadistic Pilgrim", cost(0, 1, 0), 2, 2)
            .with_ability(MyCreatureEnters, Ability::drain_each_opponent(1)),
    );
    r.register(
        Card::creature("Elenda's Hierophant", cost(1, 0, 0), 1, 4)
            .with_ability(SelfDies, Ability::TokensEqualToPower { token: VAMPIRE_TOKEN }),
    );
    r.register(
        Card::creature("Esper Sentinel", cost(1, 0, 0), 1, 1)
            .with_ability(OpponentPlaysCard, Ability::PayOrDraw { pay_rate: None }),
    );
    r.register(
        Card::creature("Essence Channeler", cost(0, 0, 2), 2, 1)
            .with_ability(AnyCreatureEnters, Ability::Scry { amount: 1 })
            .with_ability(SelfDies, Ability::MoveCountersOnDeath),
    );
    r.register(welcomer("Guide of Souls", 1, 2));
    r.register(
        Card::creature("Heliod, Sun-Crowned", cost(1, 0, 2), 5, 5)
            .with_ability(LifeGained, Ability::add_counters(1)),
    );
    r.register(welcomer("Hinterland Sanctifier", 2, 1));
    r.register(
        Card::creature("Kambal, Consul of Allocation", cost(1, 1, 0), 2, 3)
            .with_ability(OpponentPlaysCard, Ability::ChanceToGainLife { chance: 0.2, amount: 2 }),
    );
    r.register(
        Card::creature("Karlov of the Ghost Council", cost(1, 1, 0), 2, 2)
            .with_ability(LifeGained, Ability::add_counters(2)),
    );
    r.register(
        Card::creature("Leonin Elder", cost(1, 0, 0), 1, 1)
            .with_ability(AnyPlaysCard, Ability::ChanceToGainLife { chance: 0.1, amount: 1 }),
    );
    r.register(Card::creature("Lotho, Corrupt Shirriff", cost(1, 1, 0), 2, 1));
    r.register(welcomer("Lunarch Veteran", 1, 1));
    r.register(
        Card::creature("Lurrus of the Dream-Den", cost(1, 1, 0), 3, 2)
            .granting_graveyard_cast()
            .with_ability(AnyCreatureEnters, Ability::gain_life(1)),
    );
    r.register(
        Card::creature("Marauding Blight-Priest", cost(0, 1, 1), 3, 2)
            .with_ability(LifeGained, Ability::DrainOpponents { amount: Amount::Triggering, all_opponents: true }),
    );
    r.register(
        Card::creature("Mother of Runes", cost(1, 0, 0), 1, 1)
            .with_ability(OpponentPlaysRemoval, Ability::CounterNextRemoval),
    );
    r.register(
        Card::creature("Ocelot Pride", cost(1, 0, 0), 2, 2)
            .with_ability(EndOfTurn, Ability::TokenIfLifeGainedThisTurn { token: CAT_TOKEN }),
    );
    r.register(
        Card::creature("Selfless Spirit", cost(1, 0, 0), 2, 1)
            .with_ability(OpponentPlaysRemoval, Ability::SacrificeToCounterRemoval)
            .with_ability(OpponentPlaysBoardWipe, Ability::SacrificeToCounterRemoval),
    );
    r.register(
        Card::creature("Serra Ascendant", cost(1, 0, 0), 1, 1)
            .with_ability(SelfEnters, Ability::add_counters(5)),
    );
    r.register(soul_sister("Soul Warden"));
    r.register(soul_sister("Soul's Attendant"));
    r.register(
        Card::creature("Spectrum Sentinel", cost(1, 0, 0), 1, 2)
            .with_ability(OpponentPlaysLand, Ability::GainLifeOnNonbasicLand { amount: 1 }),
    );
    r.register(
        Card::creature("Starscape Cleric", cost(1, 0, 0), 2, 2)
            .with_ability(LifeGained, Ability::DrainOpponents { amount: Amount::Triggering, all_opponents: true }),
    );
    r.register(welcomer("Suture Priest", 1, 2));
    r.register(
        Card::creature("Voice of the Blessed", cost(1, 0, 1), 2, 2)
            .with_ability(LifeGained, Ability::add_counters(1)),
    );
    r.register(
        Card::creature("Vito, Thorn of the Dusk Rose", cost(0, 1, 1), 1, 3).with_ability(
            LifeGained,
            Ability::DrainOpponents { amount: Amount::Triggering, all_opponents: false },
        ),
    );
    r.register(
        Card::creature("Zulaport Cutthroat", cost(0, 1, 0), 1, 1)
            .with_ability(MyCreatureDies, Ability::drain_one_opponent(1)),
    );
}

fn register_artifacts(r: &mut CardRegistry) {
    use TriggerEvent::*;

    let artifact = |name: &str, c: ManaCost| Card::new(name, CardType::Artifact, c);

    r.register(
        artifact("Aetherflux Reservoir", cost(0, 0, 4)).with_ability(MyPlaysCard, Ability::GainLifePerSpellCast),
    );
    r.register(artifact("Bolas's Citadel", cost(0, 1, 5)));
    r.register(artifact("Lightning Greaves", cost(0, 0, 2)));
    r.register(artifact("Mox Amber", cost(0, 0, 0)).with_produces(&[W, B]));
    r.register(artifact("Orzhov Signet", cost(0, 0, 2)).with_produces(&[W, B]));
    r.register(
        artifact("Sensei's Divining Top", cost(0, 0, 1)).with_ability(MyCreatureEnters, Ability::Scry { amount: 1 }),
    );
    r.register(artifact("Shadowspear", cost(0, 0, 1)));
    r.register(artifact("Skullclamp", cost(0, 0, 1)));
    r.register(artifact("Smothering Tithe", cost(1, 0, 2)));
    r.register(artifact("Sol Ring", cost(0, 0, 2)).with_produces(&[C]));
}

fn register_enchantments(r: &mut CardRegistry) {
    use TriggerEvent::*;

    let enchantment = |name: &str, c: ManaCost| Card::new(name, CardType::Enchantment, c);

    r.register(enchantment("Ajani's Welcome", cost(1, 0, 0)).with_ability(MyCreatureEnters, Ability::gain_life(1)));
    r.register(
        enchantment("Authority of the Consuls", cost(1, 0, 0))
            .with_ability(OpponentCreatureEnters, Ability::gain_life(1)),
    );
    r.register(
        enchantment("Blind Obedience", cost(1, 0, 1))
            .with_ability(MyPlaysCard, Ability::SpendManaToGainLife { amount: 1 }),
    );
    r.register(
        enchantment("Case of the Uneaten Feast", cost(1, 0, 0))
            .with_ability(MyCreatureEnters, Ability::gain_life(1)),
    );
    r.register(
        enchantment("Cleric Class", cost(1, 0, 0))
            .with_ability(LifeGained, Ability::GainLifeSilently { amount: 1 }),
    );
    r.register(enchantment("Sanguine Bond", cost(0, 1, 4)).with_ability(
        LifeGained,
        Ability::DrainOpponents { amount: Amount::Triggering, all_opponents: false },
    ));
    r.register(
        Card::new("Sorin of House Markov", CardType::Planeswalker, cost(0, 1, 2))
            .with_ability(MyPlaysCard, Ability::SpendManaToGainLife { amount: 1 }),
    );
}

fn register_spells(r: &mut CardRegistry) {
    let instant = |name: &str, c: ManaCost| Card::new(name, CardType::Instant, c);
    let sorcery = |name: &str, c: ManaCost| Card::new(name, CardType::Sorcery, c);

    r.register(instant("Anguished Unmaking", cost(1, 1, 0)));
    r.register(sorcery("Ascend from Avernus", cost(1, 0, 1)));
    r.register(sorcery("Damn", cost(1, 1, 0)));
    r.register(instant("Deadly Rollick", cost(0, 0, 0)));
    r.register(instant("Flare of Fortitude", cost(1, 0, 0)));
    r.register(instant("Flawless Maneuver", cost(1, 0, 2)));
    r.register(instant("Path to Exile", cost(1, 0, 0)));
    r.register(sorcery("Raise the Past", cost(0, 0, 3)));
    r.register(sorcery("Rally the Ancestors", cost(1, 0, 1)));
    r.register(instant("Swords to Plowshares", cost(1, 0, 0)));
    r.register(instant("Teferi's Protection", cost(1, 0, 2)));
    r.register(sorcery("The Meathook Massacre", cost(0, 1, 2)));
    r.register(sorcery("Toxic Deluge", cost(0, 1, 2)));
}
