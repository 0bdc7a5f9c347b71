//! Trigger stack.
//!
//! Every ability invocation, whether a player's permanent reacting to an
//! event or an opponent's removal spell, is a `StackEntry` on one shared
//! LIFO `TriggerStack`. The last entry pushed resolves first.
//!
//! ## Key Types
//!
//! - `StackEntry`: (ability, source, event, params)
//! - `StackSource`: a player permanent handle or an opponent
//! - `TriggerParams`: amount / subject / target carried by the event
//! - `DrainOutcome`: whether a drain ran to empty or hit the depth ceiling
//!
//! `GameState::enqueue` and `GameState::drain` drive the stack; see
//! `game::triggers`.

mod trigger_stack;

pub use trigger_stack::{DrainOutcome, StackEntry, StackSource, TriggerParams, TriggerStack};
