//! Simulation configuration.
//!
//! Everything tunable about a run lives here and is fixed before the run
//! starts: a `GameState` takes its own copy and only hands out `&SimConfig`.
//!
//! - `SimConfig`: life, hand sizes, stack ceiling, per-card probabilities
//! - `OpponentConfig`: opponent count, creature cap, per-action base rates
//! - `ScalingConfig`: how those base rates grow with the turn number
//!
//! ## Usage
//!
//! ```
//! use soul_sisters_sim::core::{SimConfig, ScalingFormula};
//!
//! let config = SimConfig::default()
//!     .with_turns(12)
//!     .with_opponent_count(1)
//!     .with_scaling_formula(ScalingFormula::Linear);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.opponents.count, 1);
//! ```

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// The four things an opponent can do to the player's board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpponentActionKind {
    /// An opponent creature enters the battlefield.
    PlayCreature,
    /// An opponent creature dies.
    CreatureDeath,
    /// Targeted removal against one random player creature.
    PlayRemoval,
    /// Destroy every player creature.
    PlayBoardWipe,
}

impl OpponentActionKind {
    /// All kinds, in the order an opponent turn resolves them.
    pub const ALL: [OpponentActionKind; 4] = [
        OpponentActionKind::PlayCreature,
        OpponentActionKind::CreatureDeath,
        OpponentActionKind::PlayRemoval,
        OpponentActionKind::PlayBoardWipe,
    ];
}

impl std::fmt::Display for OpponentActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OpponentActionKind::PlayCreature => "play_creature",
            OpponentActionKind::CreatureDeath => "creature_death",
            OpponentActionKind::PlayRemoval => "play_removal",
            OpponentActionKind::PlayBoardWipe => "play_board_wipe",
        };
        f.write_str(name)
    }
}

/// Growth curve used by the opponent scaling model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingFormula {
    /// `1 + base * t`
    Linear,
    /// `1 + base * (e^(t/2) - 1)`
    #[default]
    Exponential,
    /// `1 + base * ln(t + 1)`
    Logarithmic,
}

/// Upper bound on events per turn, per action kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxEvents {
    pub play_creature: u32,
    pub creature_death: u32,
    pub play_removal: u32,
    pub play_board_wipe: u32,
}

impl MaxEvents {
    /// Look up the cap for one action kind.
    #[must_use]
    pub fn for_kind(&self, kind: OpponentActionKind) -> u32 {
        match kind {
            OpponentActionKind::PlayCreature => self.play_creature,
            OpponentActionKind::CreatureDeath => self.creature_death,
            OpponentActionKind::PlayRemoval => self.play_removal,
            OpponentActionKind::PlayBoardWipe => self.play_board_wipe,
        }
    }
}

impl Default for MaxEvents {
    fn default() -> Self {
        Self {
            play_creature: 3,
            creature_death: 2,
            play_removal: 2,
            play_board_wipe: 1,
        }
    }
}

/// Turn-indexed scaling of opponent action rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Growth rate fed into the formula.
    pub base_factor: f64,
    /// Ceiling the factor is clamped to.
    pub max_factor: f64,
    /// Before this turn the factor is exactly 1.0.
    pub start_turn: u32,
    pub formula: ScalingFormula,
    pub max_events: MaxEvents,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            base_factor: 0.1,
            max_factor: 4.0,
            start_turn: 1,
            formula: ScalingFormula::Exponential,
            max_events: MaxEvents::default(),
        }
    }
}

/// Opponent population and per-action base probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    /// Number of simulated opponents. Also the multiplier for
    /// "each opponent loses life" effects.
    pub count: usize,
    /// Creature cap per opponent.
    pub max_creatures: u32,
    pub land_play_probability: f64,
    pub creature_play_probability: f64,
    pub creature_death_probability: f64,
    pub removal_probability: f64,
    pub board_wipe_probability: f64,
    pub scaling: ScalingConfig,
}

impl OpponentConfig {
    /// Base probability for one action kind.
    #[must_use]
    pub fn probability(&self, kind: OpponentActionKind) -> f64 {
        match kind {
            OpponentActionKind::PlayCreature => self.creature_play_probability,
            OpponentActionKind::CreatureDeath => self.creature_death_probability,
            OpponentActionKind::PlayRemoval => self.removal_probability,
            OpponentActionKind::PlayBoardWipe => self.board_wipe_probability,
        }
    }
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            count: 3,
            max_creatures: 24,
            land_play_probability: 0.85,
            creature_play_probability: 0.70,
            creature_death_probability: 0.15,
            removal_probability: 0.10,
            board_wipe_probability: 0.05,
            scaling: ScalingConfig::default(),
        }
    }
}

/// Complete configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Turns played per game.
    pub turns: u32,
    pub starting_life: i64,
    pub opening_hand_size: usize,
    /// End-of-turn discard threshold.
    pub max_hand_size: usize,
    /// Pending-entry ceiling (and nested-drain ceiling) before a cascade is
    /// forcibly aborted.
    pub stack_depth_limit: usize,
    /// Chance an opponent pays for a "pay or let me draw" tax.
    pub pay_rate: f64,
    /// Chance an opponent's land drop is a non-basic.
    pub nonbasic_land_chance: f64,
    pub opponents: OpponentConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            turns: 10,
            starting_life: 40,
            opening_hand_size: 7,
            max_hand_size: 7,
            stack_depth_limit: 200,
            pay_rate: 0.2,
            nonbasic_land_chance: 0.25,
            opponents: OpponentConfig::default(),
        }
    }
}

impl SimConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of turns per game.
    #[must_use]
    pub fn with_turns(mut self, turns: u32) -> Self {
        self.turns = turns;
        self
    }

    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the stack depth ceiling.
    #[must_use]
    pub fn with_stack_depth_limit(mut self, limit: usize) -> Self {
        self.stack_depth_limit = limit;
        self
    }

    /// Set the pay rate for "pay or draw" abilities.
    #[must_use]
    pub fn with_pay_rate(mut self, rate: f64) -> Self {
        self.pay_rate = rate;
        self
    }

    /// Set the chance an opponent land is non-basic.
    #[must_use]
    pub fn with_nonbasic_land_chance(mut self, chance: f64) -> Self {
        self.nonbasic_land_chance = chance;
        self
    }

    /// Set the number of opponents.
    #[must_use]
    pub fn with_opponent_count(mut self, count: usize) -> Self {
        self.opponents.count = count;
        self
    }

    /// Replace the whole opponent configuration.
    #[must_use]
    pub fn with_opponents(mut self, opponents: OpponentConfig) -> Self {
        self.opponents = opponents;
        self
    }

    /// Set the base probability for one opponent action kind.
    #[must_use]
    pub fn with_action_probability(mut self, kind: OpponentActionKind, probability: f64) -> Self {
        let slot = match kind {
            OpponentActionKind::PlayCreature => &mut self.opponents.creature_play_probability,
            OpponentActionKind::CreatureDeath => &mut self.opponents.creature_death_probability,
            OpponentActionKind::PlayRemoval => &mut self.opponents.removal_probability,
            OpponentActionKind::PlayBoardWipe => &mut self.opponents.board_wipe_probability,
        };
        *slot = probability;
        self
    }

    /// Set the scaling formula.
    #[must_use]
    pub fn with_scaling_formula(mut self, formula: ScalingFormula) -> Self {
        self.opponents.scaling.formula = formula;
        self
    }

    /// Replace the whole scaling configuration.
    #[must_use]
    pub fn with_scaling(mut self, scaling: ScalingConfig) -> Self {
        self.opponents.scaling = scaling;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), GameError> {
        let probabilities = [
            ("pay_rate", self.pay_rate),
            ("nonbasic_land_chance", self.nonbasic_land_chance),
            ("land_play_probability", self.opponents.land_play_probability),
            ("creature_play_probability", self.opponents.creature_play_probability),
            ("creature_death_probability", self.opponents.creature_death_probability),
            ("removal_probability", self.opponents.removal_probability),
            ("board_wipe_probability", self.opponents.board_wipe_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!("{name} must be in [0, 1], got {p}")));
            }
        }

        let scaling = &self.opponents.scaling;
        if !(scaling.base_factor >= 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "scaling base_factor must be non-negative, got {}",
                scaling.base_factor
            )));
        }
        if !(scaling.max_factor >= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "scaling max_factor must be at least 1.0, got {}",
                scaling.max_factor
            )));
        }
        if self.stack_depth_limit == 0 {
            return Err(GameError::InvalidConfig("stack_depth_limit must be positive".into()));
        }
        if self.opponents.count == 0 || self.opponents.count > u8::MAX as usize {
            return Err(GameError::InvalidConfig(format!(
                "opponent count must be in 1..=255, got {}",
                self.opponents.count
            )));
        }
        if self.turns == 0 {
            return Err(GameError::InvalidConfig("turns must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.starting_life, 40);
        assert_eq!(config.opening_hand_size, 7);
        assert_eq!(config.stack_depth_limit, 200);
        assert_eq!(config.opponents.max_creatures, 24);
        assert_eq!(config.opponents.scaling.formula, ScalingFormula::Exponential);
        assert_eq!(config.opponents.scaling.max_events.for_kind(OpponentActionKind::PlayCreature), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimConfig::new()
            .with_turns(5)
            .with_opponent_count(2)
            .with_action_probability(OpponentActionKind::PlayRemoval, 0.5)
            .with_pay_rate(0.0);

        assert_eq!(config.turns, 5);
        assert_eq!(config.opponents.count, 2);
        assert_eq!(config.opponents.probability(OpponentActionKind::PlayRemoval), 0.5);
        assert_eq!(config.pay_rate, 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let config = SimConfig::new().with_action_probability(OpponentActionKind::PlayCreature, 1.5);
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_depth_and_opponents() {
        assert!(SimConfig::new().with_stack_depth_limit(0).validate().is_err());
        assert!(SimConfig::new().with_opponent_count(0).validate().is_err());
        assert!(SimConfig::new().with_turns(0).validate().is_err());
    }

    #[test]
    fn test_action_kind_display() {
        assert_eq!(OpponentActionKind::PlayBoardWipe.to_string(), "play_board_wipe");
        assert_eq!(OpponentActionKind::ALL.len(), 4);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = SimConfig::new().with_scaling_formula(ScalingFormula::Logarithmic);
        let json = serde_json::to_string(&config).unwrap();
        let restored: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
