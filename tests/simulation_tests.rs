//! Whole-game driver tests.

use soul_sisters_sim::core::{GameError, OpponentConfig, SimConfig};
use soul_sisters_sim::opponent::OpponentSimulator;
use soul_sisters_sim::sim::{Simulation, SimulationSummary, TurnStats};

fn simulation(turns: u32) -> Simulation {
    Simulation::new(SimConfig::default().with_turns(turns)).unwrap()
}

// =============================================================================
// Determinism
// =============================================================================

/// The same seed replays the same game.
#[test]
fn test_single_game_is_reproducible() {
    let sim = simulation(8);
    let a = sim.run_single_game(1234).unwrap();
    let b = sim.run_single_game(1234).unwrap();
    assert_eq!(a, b);
}

/// The same base seed produces the same summary.
#[test]
fn test_run_many_is_reproducible() {
    let sim = simulation(6);
    let a = sim.run_many(6, 99).unwrap();
    let b = sim.run_many(6, 99).unwrap();
    assert_eq!(a, b);
}

/// The number of games does not change the per-turn layout.
#[test]
fn test_game_count_keeps_turn_rows() {
    let sim = simulation(5);
    let three = sim.run_many(3, 7).unwrap();
    let five = sim.run_many(5, 7).unwrap();
    assert_eq!(three.games, 3);
    assert_eq!(five.games, 5);
    assert_eq!(three.per_turn.len(), five.per_turn.len());
}

// =============================================================================
// Shape
// =============================================================================

/// One row per turn, numbered from 1, with non-decreasing cumulative
/// counters.
#[test]
fn test_single_game_shape() {
    let stats = simulation(10).run_single_game(5).unwrap();

    assert_eq!(stats.len(), 10);
    for (i, row) in stats.iter().enumerate() {
        assert_eq!(row.turn, i as u32 + 1);
        assert!(row.hand_size <= 7);
    }
    for pair in stats.windows(2) {
        assert!(pair[1].damage_to_opponents >= pair[0].damage_to_opponents);
        assert!(pair[1].cascade_aborts >= pair[0].cascade_aborts);
    }
}

/// The summary has a row per turn and averages land inside the observed
/// range.
#[test]
fn test_summary_shape() {
    let summary = simulation(4).run_many(8, 3).unwrap();

    assert_eq!(summary.games, 8);
    assert_eq!(summary.per_turn.len(), 4);
    assert!(summary.turn(1).is_some());
    assert!(summary.turn(5).is_none());

    let last = summary.final_turn().unwrap();
    assert_eq!(last.turn, 4);
    assert!(last.hand_size <= 7.0);
}

/// Averaging two hand-built games.
#[test]
fn test_summary_averages() {
    let game = |life: i64| {
        vec![TurnStats { turn: 1, life, creatures: 2, ..TurnStats::default() }]
    };
    let summary = SimulationSummary::from_games(&[game(40), game(50)]);

    let row = summary.turn(1).unwrap();
    assert_eq!(row.life, 45.0);
    assert_eq!(row.creatures, 2.0);
}

/// The summary serializes for downstream tooling.
#[test]
fn test_summary_serializes() {
    let summary = simulation(2).run_many(2, 11).unwrap();
    let json = serde_json::to_string(&summary).unwrap();
    let back: SimulationSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.games, summary.games);
    assert_eq!(back.per_turn.len(), 2);
}

// =============================================================================
// Configuration
// =============================================================================

/// Invalid configuration is rejected up front.
#[test]
fn test_invalid_config_rejected() {
    let config = SimConfig::default().with_pay_rate(1.5);
    assert!(matches!(Simulation::new(config), Err(GameError::InvalidConfig(_))));
}

/// Quiet opponents never grow a board.
#[test]
fn test_passive_opponents() {
    let config = SimConfig::default().with_turns(6).with_opponents(OpponentConfig {
        land_play_probability: 0.0,
        creature_play_probability: 0.0,
        creature_death_probability: 0.0,
        removal_probability: 0.0,
        board_wipe_probability: 0.0,
        ..OpponentConfig::default()
    });
    let sim = Simulation::new(config).unwrap();

    let stats = sim.run_single_game(21).unwrap();
    assert!(stats.iter().all(|row| row.opponent_creatures == 0));
}

/// Turns can be driven one at a time against a caller-owned state.
#[test]
fn test_manual_turns() {
    let sim = simulation(3);
    let mut state = sim.setup_game(soul_sisters_sim::core::GameRng::new(4)).unwrap();
    let mut opponents = OpponentSimulator::new(&sim.config().opponents);

    let first = sim.play_turn(&mut state, &mut opponents).unwrap();
    let second = sim.play_turn(&mut state, &mut opponents).unwrap();

    assert_eq!(first.turn, 1);
    assert_eq!(second.turn, 2);
    assert!(state.stack().is_empty());
}
