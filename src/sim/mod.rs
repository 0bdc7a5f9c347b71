//! Whole-game simulation and reporting.
//!
//! ## Key Types
//!
//! - `Simulation`: Sets up the standard deck and drives turns
//! - `TurnStats`: End-of-turn board snapshot
//! - `SimulationSummary`: Per-turn averages across many games
//!
//! ## Usage
//!
//! ```
//! use soul_sisters_sim::core::SimConfig;
//! use soul_sisters_sim::sim::Simulation;
//!
//! let sim = Simulation::new(SimConfig::default().with_turns(5)).unwrap();
//! let summary = sim.run_many(4, 42).unwrap();
//!
//! assert_eq!(summary.games, 4);
//! assert_eq!(summary.per_turn.len(), 5);
//! ```

pub mod runner;
pub mod stats;

pub use runner::Simulation;
pub use stats::{SimulationSummary, TurnAverages, TurnStats};
