//! The ability-action library.
//!
//! Abilities are data (`cards::Ability`); this module gives them meaning.
//! `AbilityResolver::resolve` takes a popped `StackEntry` and applies it
//! to the `GameState`:
//! - life gain and loss, opponent drain
//! - draws, scry, explore
//! - +1/+1 counters
//! - token creation (through the normal entry burst)
//! - out-of-band excision of pending opponent removal
//! - opponent removal and board wipes themselves
//!
//! Every arm is a no-op for zero amounts and treats a missing
//! power/toughness as "not applicable".

mod resolver;

pub use resolver::{AbilityResolver, ResolveResult};
