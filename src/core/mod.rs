//! Core engine types: entities, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{EntityId, OpponentId};
pub use rng::GameRng;
pub use config::{
    MaxEvents, OpponentActionKind, OpponentConfig, ScalingConfig, ScalingFormula, SimConfig,
};
pub use error::{GameError, GameResult, RuleViolation};
