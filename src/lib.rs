//! # soul-sisters-sim
//!
//! A seeded Monte Carlo simulator for a white-black life-gain commander
//! deck ("Soul Sisters") played against a table of probabilistic opponents.
//!
//! ## Design Principles
//!
//! 1. **One Mutable Aggregate**: `GameState` owns every card, zone, counter
//!    and the trigger stack. Each simulated game gets its own.
//!
//! 2. **Drain Before Return**: Every public mutator pushes its triggers and
//!    drains the stack before returning, so callers never see pending work.
//!
//! 3. **Abilities Are Data**: A card's abilities are `(TriggerEvent, Ability)`
//!    bindings over closed enums, resolved by one exhaustive match.
//!
//! 4. **Reproducible**: All randomness comes from the game's own seeded
//!    `GameRng`; zone order is deterministic.
//!
//! ## Architecture
//!
//! - **LIFO Trigger Stack**: Within one burst triggers are pushed in
//!   battlefield order, so the last permanent enumerated reacts first. A
//!   depth ceiling turns runaway cascades into a logged, cleared stack.
//!
//! - **Greedy Mana Solver**: Coloured requirements claim the first
//!   matching producer, generic takes the rest. Fast, and knowingly
//!   incomplete for multi-colour producers.
//!
//! - **Scaled Opponents**: Per-turn action counts are sampled from a
//!   distribution whose weight grows with the turn number.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, errors
//! - `cards`: Cards, trigger events, abilities, the card table and deck list
//! - `zones`: Library, hand, battlefield, graveyard, command zone
//! - `mana`: Colours, costs, the payment solver
//! - `stack`: The trigger stack
//! - `effects`: Ability resolution
//! - `game`: `GameState` and its mutators
//! - `opponent`: Scaling and the opponent simulator
//! - `sim`: The game driver and statistics

pub mod core;
pub mod cards;
pub mod zones;
pub mod mana;
pub mod stack;
pub mod effects;
pub mod game;
pub mod opponent;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    EntityId, OpponentId,
    GameRng,
    SimConfig, OpponentConfig, ScalingConfig, ScalingFormula, MaxEvents, OpponentActionKind,
    GameError, GameResult, RuleViolation,
};

pub use crate::cards::{
    Ability, AbilityBinding, Amount, TokenSpec, TriggerEvent,
    Card, CardType, CardRegistry,
    standard_commander, standard_deck,
};

pub use crate::zones::{Zone, ZoneManager};

pub use crate::mana::{ManaColor, ManaCost, ManaPool, PaymentPlan, PaymentRejection};

pub use crate::stack::{DrainOutcome, StackEntry, StackSource, TriggerParams, TriggerStack};

pub use crate::effects::{AbilityResolver, ResolveResult};

pub use crate::game::{GameState, TurnCounters, OPPONENT_LIFE_LOST};

pub use crate::opponent::{ActionReport, ActionScaling, Opponent, OpponentSimulator, TurnReport};

pub use crate::sim::{Simulation, SimulationSummary, TurnAverages, TurnStats};
