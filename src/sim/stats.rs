//! Per-turn statistics and their averages across games.

use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Board snapshot recorded at the end of one turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub turn: u32,
    pub life: i64,
    pub creatures: usize,
    pub total_power: i64,
    pub total_toughness: i64,
    /// Cumulative life lost by opponents.
    pub damage_to_opponents: i64,
    pub hand_size: usize,
    pub graveyard_size: usize,
    pub graveyard_creatures: usize,
    /// Creatures across every opponent.
    pub opponent_creatures: u32,
    /// Cumulative cascades aborted by the stack ceiling.
    pub cascade_aborts: u32,
}

impl TurnStats {
    /// Read everything off the state at a turn boundary.
    #[must_use]
    pub fn capture(state: &GameState, opponent_creatures: u32) -> Self {
        Self {
            turn: state.turn(),
            life: state.life(),
            creatures: state.creature_count(),
            total_power: state.total_power(),
            total_toughness: state.total_toughness(),
            damage_to_opponents: state.opponent_life_lost(),
            hand_size: state.hand_size(),
            graveyard_size: state.graveyard_size(),
            graveyard_creatures: state.graveyard_creatures(),
            opponent_creatures,
            cascade_aborts: state.cascade_aborts(),
        }
    }
}

/// Mean of every `TurnStats` field for one turn number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnAverages {
    pub turn: u32,
    pub life: f64,
    pub creatures: f64,
    pub total_power: f64,
    pub total_toughness: f64,
    pub damage_to_opponents: f64,
    pub hand_size: f64,
    pub graveyard_size: f64,
    pub graveyard_creatures: f64,
    pub opponent_creatures: f64,
    pub cascade_aborts: f64,
}

impl TurnAverages {
    fn accumulate(&mut self, stats: &TurnStats) {
        self.life += stats.life as f64;
        self.creatures += stats.creatures as f64;
        self.total_power += stats.total_power as f64;
        self.total_toughness += stats.total_toughness as f64;
        self.damage_to_opponents += stats.damage_to_opponents as f64;
        self.hand_size += stats.hand_size as f64;
        self.graveyard_size += stats.graveyard_size as f64;
        self.graveyard_creatures += stats.graveyard_creatures as f64;
        self.opponent_creatures += f64::from(stats.opponent_creatures);
        self.cascade_aborts += f64::from(stats.cascade_aborts);
    }

    fn scale(&mut self, divisor: f64) {
        for field in [
            &mut self.life,
            &mut self.creatures,
            &mut self.total_power,
            &mut self.total_toughness,
            &mut self.damage_to_opponents,
            &mut self.hand_size,
            &mut self.graveyard_size,
            &mut self.graveyard_creatures,
            &mut self.opponent_creatures,
            &mut self.cascade_aborts,
        ] {
            *field /= divisor;
        }
    }
}

/// Averages over many games, one row per turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub per_turn: Vec<TurnAverages>,
}

impl SimulationSummary {
    /// Average per-turn stats. Every game must cover the same turns;
    /// rows are built from the shortest game.
    #[must_use]
    pub fn from_games(games: &[Vec<TurnStats>]) -> Self {
        let turns = games.iter().map(Vec::len).min().unwrap_or(0);
        let mut per_turn: Vec<TurnAverages> = (0..turns)
            .map(|i| TurnAverages { turn: games[0][i].turn, ..TurnAverages::default() })
            .collect();

        for game in games {
            for (row, stats) in per_turn.iter_mut().zip(game) {
                row.accumulate(stats);
            }
        }
        if !games.is_empty() {
            for row in &mut per_turn {
                row.scale(games.len() as f64);
            }
        }

        Self { games: games.len(), per_turn }
    }

    /// Averages for one turn (1-based).
    #[must_use]
    pub fn turn(&self, turn: u32) -> Option<&TurnAverages> {
        self.per_turn.iter().find(|row| row.turn == turn)
    }

    /// The last row.
    #[must_use]
    pub fn final_turn(&self) -> Option<&TurnAverages> {
        self.per_turn.last()
    }
}
