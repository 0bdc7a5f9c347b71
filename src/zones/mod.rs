//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Zone`: Library, hand, battlefield, graveyard, command zone
//! - `ZoneManager`: Card location tracking, ordering and movement

pub mod manager;

pub use manager::{Zone, ZoneManager};
