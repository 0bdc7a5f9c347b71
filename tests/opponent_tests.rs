//! Opponent model integration tests.
//!
//! Scaling properties are checked for every formula; the simulator is
//! driven against real boards.

use proptest::prelude::*;

use soul_sisters_sim::cards::CardRegistry;
use soul_sisters_sim::core::{
    GameRng, OpponentActionKind, OpponentConfig, OpponentId, ScalingConfig, ScalingFormula, SimConfig,
};
use soul_sisters_sim::game::GameState;
use soul_sisters_sim::opponent::{ActionScaling, OpponentSimulator};

fn formula_strategy() -> impl Strategy<Value = ScalingFormula> {
    prop_oneof![
        Just(ScalingFormula::Linear),
        Just(ScalingFormula::Exponential),
        Just(ScalingFormula::Logarithmic),
    ]
}

// =============================================================================
// Scaling
// =============================================================================

proptest! {
    /// The factor never decreases turn over turn and never exceeds the
    /// ceiling.
    #[test]
    fn prop_scaling_monotone_and_capped(
        formula in formula_strategy(),
        base_factor in 0.0f64..2.0,
        max_factor in 1.0f64..10.0,
        start_turn in 0u32..6,
    ) {
        let scaling = ActionScaling::new(ScalingConfig {
            base_factor,
            max_factor,
            start_turn,
            formula,
            ..ScalingConfig::default()
        });

        let mut previous = scaling.scaling_factor(0);
        for turn in 0..40 {
            let factor = scaling.scaling_factor(turn);
            prop_assert!(factor >= previous, "turn {}: {} < {}", turn, factor, previous);
            prop_assert!(factor <= max_factor);
            prop_assert!(factor >= 1.0);
            previous = factor;
        }
    }

    /// Sampled counts stay within the per-kind cap.
    #[test]
    fn prop_event_count_within_cap(
        seed in any::<u64>(),
        probability in 0.0f64..=1.0,
        turn in 0u32..30,
    ) {
        let scaling = ActionScaling::default();
        let mut rng = GameRng::new(seed);
        for kind in OpponentActionKind::ALL {
            let cap = scaling.config().max_events.for_kind(kind);
            prop_assert!(scaling.event_count(probability, kind, turn, &mut rng) <= cap);
        }
    }
}

/// Higher turns push more mass away from zero events.
#[test]
fn test_later_turns_are_busier() {
    let scaling = ActionScaling::new(ScalingConfig { formula: ScalingFormula::Linear, ..ScalingConfig::default() });
    let early = scaling.distribution(0.3, OpponentActionKind::PlayCreature, 1);
    let late = scaling.distribution(0.3, OpponentActionKind::PlayCreature, 10);
    assert!(late[0] < early[0]);
}

// =============================================================================
// Simulator
// =============================================================================

/// A long game with default rates never exceeds the creature caps.
#[test]
fn test_population_stays_bounded() {
    let config = SimConfig::default();
    let mut state = GameState::with_seed(config.clone(), 77).unwrap();
    let mut opponents = OpponentSimulator::new(&config.opponents);

    for _ in 0..50 {
        state.start_turn();
        opponents.take_turn(&mut state);
        for opponent in opponents.opponents() {
            assert!(opponent.creatures() <= opponent.max_creatures());
        }
        assert!(state.stack().is_empty());
    }
}

/// Removal and wipes route through the player's death mutator.
#[test]
fn test_forced_removal_fires_death_triggers() {
    let registry = CardRegistry::standard();
    let mut state = GameState::with_seed(SimConfig::default(), 8).unwrap();
    state.add_to_battlefield(registry.get_card("Blood Artist").unwrap());
    state.add_to_battlefield(registry.get_card("Cruel Celebrant").unwrap());
    let mut opponents = OpponentSimulator::new(&OpponentConfig::default());

    let action = opponents
        .force_action(OpponentId::new(2), OpponentActionKind::PlayRemoval, &mut state)
        .unwrap()
        .unwrap();

    assert_eq!(action.creatures_killed, 1);
    assert_eq!(state.creature_count(), 1);
    assert_eq!(state.life(), 42);
}

/// Opponent land drops trigger landfall-style watchers; fetched
/// non-basics also count as library searches.
#[test]
fn test_land_drops_and_searches() {
    let registry = CardRegistry::standard();
    let config = SimConfig::default()
        .with_nonbasic_land_chance(1.0)
        .with_opponents(OpponentConfig {
            land_play_probability: 1.0,
            creature_play_probability: 0.0,
            creature_death_probability: 0.0,
            removal_probability: 0.0,
            board_wipe_probability: 0.0,
            ..OpponentConfig::default()
        });
    let mut state = GameState::with_seed(config.clone(), 8).unwrap();
    for _ in 0..10 {
        state.add_to_library_top(registry.get_card("Plains").unwrap());
    }
    state.add_to_battlefield(registry.get_card("Archivist of Oghma").unwrap());
    state.add_to_battlefield(registry.get_card("Spectrum Sentinel").unwrap());
    let mut opponents = OpponentSimulator::new(&config.opponents);

    state.start_turn();
    let report = opponents.take_turn(&mut state);

    assert_eq!(report.lands_played, 3);
    // Archivist: +1 life and a card per search; Sentinel: +1 per non-basic.
    assert_eq!(state.life(), 46);
    assert_eq!(state.hand_size(), 3);
}

/// Unknown opponents are reported as errors.
#[test]
fn test_unknown_opponent() {
    let mut state = GameState::with_seed(SimConfig::default(), 1).unwrap();
    let mut opponents = OpponentSimulator::new(&OpponentConfig { count: 1, ..OpponentConfig::default() });

    assert!(opponents.opponent(OpponentId::new(1)).is_err());
    assert!(opponents
        .force_action(OpponentId::new(1), OpponentActionKind::PlayCreature, &mut state)
        .is_err());
}
