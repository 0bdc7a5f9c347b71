//! Card system: printed cards, abilities, and the card table.
//!
//! ## Key Types
//!
//! - `Card`: One card instance (printed characteristics plus tap state and
//!   current power/toughness)
//! - `TriggerEvent`: The closed set of events a card can react to
//! - `Ability`: The closed catalogue of effects a trigger can run
//! - `CardRegistry`: Name-keyed factory producing fresh `Card` instances
//!
//! ## Fresh instances
//!
//! Every zone holds its own `Card` object. The registry clones a prototype
//! on each `get_card`, so counters on a battlefield creature never leak
//! into another copy.

pub mod ability;
pub mod card;
pub mod decklist;
pub mod registry;

pub use ability::{Ability, AbilityBinding, Amount, TokenSpec, TriggerEvent};
pub use card::{Card, CardType};
pub use decklist::{standard_commander, standard_deck};
pub use registry::CardRegistry;
