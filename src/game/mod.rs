//! The game state aggregate and every mutator that drives it.
//!
//! ## Key Types
//!
//! - `GameState`: Cards, zones, life, counters, commander, trigger stack
//! - `TurnCounters`: Per-turn tallies reset by `start_turn`
//!
//! ## Usage
//!
//! ```
//! use soul_sisters_sim::cards::{Ability, Card, TriggerEvent};
//! use soul_sisters_sim::core::SimConfig;
//! use soul_sisters_sim::game::GameState;
//! use soul_sisters_sim::mana::{ManaColor, ManaCost};
//!
//! let mut state = GameState::with_seed(SimConfig::default(), 42).unwrap();
//! state.add_to_battlefield(Card::land("Plains", &[ManaColor::White]));
//! state.add_to_battlefield(
//!     Card::creature("Soul Warden", ManaCost::new(1, 0, 0), 1, 1)
//!         .with_ability(TriggerEvent::AnyCreatureEnters, Ability::gain_life(1)),
//! );
//!
//! let bears = state.add_to_hand(Card::creature("Bears", ManaCost::new(1, 0, 0), 2, 2));
//! state.play_card(bears).unwrap();
//!
//! assert_eq!(state.life(), 41);
//! assert!(state.stack().is_empty());
//! ```

mod events;
mod mana;
mod play;
mod state;
mod triggers;

pub use play::{COMMANDER_TAX, GRAVEYARD_CAST_MAX_MANA_VALUE};
pub use state::{GameState, TurnCounters, OPPONENT_LIFE_LOST};
