//! The game driver.
//!
//! One turn of the driver:
//!
//! 1. `start_turn`, then draw a card (including turn 1).
//! 2. Play one land chosen at random from hand.
//! 3. Cast the commander if it is in the command zone and affordable.
//! 4. Try every nonland permanent in hand, in random order.
//! 5. Try one graveyard cast.
//! 6. Let the opponents act.
//! 7. `end_turn`, then record `TurnStats`.
//!
//! Rule violations from individual plays are logged at `debug` and skipped.
//! Any other error aborts the game.

use tracing::debug;

use crate::cards::{standard_commander, standard_deck, CardRegistry};
use crate::core::{EntityId, GameResult, GameRng, SimConfig};
use crate::game::GameState;
use crate::opponent::OpponentSimulator;
use crate::zones::Zone;

use super::stats::{SimulationSummary, TurnStats};

/// Runs whole games of the standard deck against simulated opponents.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    registry: CardRegistry,
}

impl Simulation {
    /// Create a simulation over the standard card table.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: SimConfig) -> GameResult<Self> {
        Self::with_registry(config, CardRegistry::standard())
    }

    /// Create a simulation over a custom card table. The table must
    /// contain every card of the standard deck list.
    pub fn with_registry(config: SimConfig, registry: CardRegistry) -> GameResult<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Build a fresh game: library, commander, opening hand.
    pub fn setup_game(&self, rng: GameRng) -> GameResult<GameState> {
        let deck = standard_deck(&self.registry)?;
        let commander = standard_commander(&self.registry)?;
        let mut state = GameState::with_deck(self.config.clone(), rng, deck, Some(commander))?;
        state.new_game();
        Ok(state)
    }

    /// Play one game from `seed`, returning one `TurnStats` per turn.
    pub fn run_single_game(&self, seed: u64) -> GameResult<Vec<TurnStats>> {
        self.play_game(GameRng::new(seed))
    }

    /// Play `games` independent games and average them per turn.
    ///
    /// Each game runs on its own `GameState` with a stream forked from
    /// `base_seed`, so the summary is reproducible.
    pub fn run_many(&self, games: usize, base_seed: u64) -> GameResult<SimulationSummary> {
        let mut root = GameRng::new(base_seed);
        let results = (0..games)
            .map(|_| self.play_game(root.fork()))
            .collect::<GameResult<Vec<_>>>()?;
        Ok(SimulationSummary::from_games(&results))
    }

    fn play_game(&self, rng: GameRng) -> GameResult<Vec<TurnStats>> {
        let mut state = self.setup_game(rng)?;
        let mut opponents = OpponentSimulator::new(&self.config.opponents);

        let mut history = Vec::with_capacity(self.config.turns as usize);
        for _ in 0..self.config.turns {
            history.push(self.play_turn(&mut state, &mut opponents)?);
        }
        Ok(history)
    }

    /// Play one full turn cycle and record the result.
    pub fn play_turn(&self, state: &mut GameState, opponents: &mut OpponentSimulator) -> GameResult<TurnStats> {
        state.start_turn();
        state.draw_one();

        Self::play_random_land(state)?;

        if state.can_cast_commander() {
            skip_violation(state.cast_commander())?;
        }

        let mut spells: Vec<EntityId> = state
            .cards_in(Zone::Hand)
            .filter(|(_, c)| !c.is_land() && c.is_permanent())
            .map(|(id, _)| id)
            .collect();
        state.rng_mut().shuffle(&mut spells);
        for id in spells {
            if state.zones().is_in(id, Zone::Hand) {
                skip_violation(state.play_card(id))?;
            }
        }

        let castable = state.graveyard_castable();
        if let Some(&id) = state.rng_mut().choose(&castable) {
            skip_violation(state.cast_from_graveyard(id))?;
        }

        let report = opponents.take_turn(state);
        debug!(turn = report.turn, actions = report.actions.len(), lands = report.lands_played, "opponents acted");

        state.end_turn();
        Ok(TurnStats::capture(state, opponents.total_creatures()))
    }

    fn play_random_land(state: &mut GameState) -> GameResult<()> {
        let lands: Vec<EntityId> = state
            .cards_in(Zone::Hand)
            .filter(|(_, c)| c.is_land())
            .map(|(id, _)| id)
            .collect();
        if let Some(&id) = state.rng_mut().choose(&lands) {
            skip_violation(state.play_land(id))?;
        }
        Ok(())
    }
}

/// Swallow a rule violation (logged), propagate anything else.
fn skip_violation(result: GameResult<()>) -> GameResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_rule_violation() => {
            debug!(error = %e, "skipped illegal play");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_game() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        let state = sim.setup_game(GameRng::new(1)).unwrap();

        assert_eq!(state.hand_size(), 7);
        assert_eq!(state.library_size(), 92);
        assert!(state.commander_in_command_zone());
    }

    #[test]
    fn test_single_game_records_every_turn() {
        let sim = Simulation::new(SimConfig::default().with_turns(6)).unwrap();
        let history = sim.run_single_game(42).unwrap();

        assert_eq!(history.len(), 6);
        for (i, stats) in history.iter().enumerate() {
            assert_eq!(stats.turn, i as u32 + 1);
            assert!(stats.hand_size <= 7);
        }
    }

    #[test]
    fn test_single_game_is_reproducible() {
        let sim = Simulation::new(SimConfig::default().with_turns(8)).unwrap();
        assert_eq!(sim.run_single_game(7).unwrap(), sim.run_single_game(7).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Simulation::new(SimConfig::default().with_opponent_count(0)).is_err());
    }

    #[test]
    fn test_skip_violation() {
        use crate::core::{GameError, RuleViolation};

        assert_eq!(skip_violation(Ok(())), Ok(true));
        assert_eq!(skip_violation(Err(RuleViolation::NoCommander.into())), Ok(false));
        assert!(skip_violation(Err(GameError::UnknownCard("X".into()))).is_err());
    }
}
