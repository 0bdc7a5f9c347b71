//! Probabilistic opponents.
//!
//! ## Key Types
//!
//! - `ActionScaling`: Turn-indexed scaling factor and event-count sampling
//! - `OpponentSimulator`: Creature counters per opponent and the actions
//!   that route into the player's `GameState`
//!
//! ## Usage
//!
//! ```
//! use soul_sisters_sim::core::{OpponentActionKind, OpponentId, SimConfig};
//! use soul_sisters_sim::game::GameState;
//! use soul_sisters_sim::opponent::OpponentSimulator;
//!
//! let config = SimConfig::default();
//! let mut state = GameState::with_seed(config.clone(), 1).unwrap();
//! let mut opponents = OpponentSimulator::new(&config.opponents);
//!
//! opponents
//!     .force_action(OpponentId::new(0), OpponentActionKind::PlayCreature, &mut state)
//!     .unwrap();
//! assert_eq!(opponents.total_creatures(), 1);
//! ```

pub mod scaling;
pub mod simulator;

pub use scaling::{ActionScaling, EventDistribution};
pub use simulator::{ActionReport, Opponent, OpponentSimulator, TurnReport};
