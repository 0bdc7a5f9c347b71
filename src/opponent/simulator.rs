//! The opponent table.
//!
//! Opponents are not modelled as decks: each one is a creature counter
//! bounded by the configured cap. Their only job is to fire the player's
//! triggers.
//!
//! ## Turn structure
//!
//! 1. Each opponent in turn order may play one land (gated by the
//!    land-play probability); a non-basic also counts as a library search.
//! 2. For each action kind in `OpponentActionKind::ALL` order, sample how
//!    many attempts happen this turn from `ActionScaling`.
//! 3. Each attempt re-rolls the kind's base probability before executing.
//!
//! All randomness comes from the game's own `GameRng`.

use tracing::debug;

use crate::core::{EntityId, GameError, GameResult, OpponentActionKind, OpponentConfig, OpponentId};
use crate::game::GameState;

use super::scaling::ActionScaling;

/// One simulated opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opponent {
    id: OpponentId,
    creatures: u32,
    max_creatures: u32,
}

impl Opponent {
    #[must_use]
    pub fn new(id: OpponentId, max_creatures: u32) -> Self {
        Self { id, creatures: 0, max_creatures }
    }

    #[must_use]
    pub fn id(&self) -> OpponentId {
        self.id
    }

    #[must_use]
    pub fn creatures(&self) -> u32 {
        self.creatures
    }

    #[must_use]
    pub fn max_creatures(&self) -> u32 {
        self.max_creatures
    }

    /// `true` if another creature fits under the cap.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.creatures < self.max_creatures
    }

    fn add_creature(&mut self) -> bool {
        let added = self.has_room();
        if added {
            self.creatures += 1;
        }
        added
    }

    fn remove_creature(&mut self) -> bool {
        let removed = self.creatures > 0;
        if removed {
            self.creatures -= 1;
        }
        removed
    }

    fn reset(&mut self) {
        self.creatures = 0;
    }
}

/// One executed opponent action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    pub kind: OpponentActionKind,
    pub opponent: OpponentId,
    /// Player creature targeted by removal.
    pub target: Option<EntityId>,
    /// Player creatures that left the battlefield as a result.
    pub creatures_killed: usize,
}

/// Everything that happened during one call to `take_turn`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub lands_played: u32,
    pub actions: Vec<ActionReport>,
}

impl TurnReport {
    /// Number of executed actions of one kind.
    #[must_use]
    pub fn count(&self, kind: OpponentActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }
}

/// Which opponents an attempt may pick from.
#[derive(Clone, Copy, Debug)]
enum Pool {
    All,
    Single(usize),
}

/// Simulates the opponents at the table.
#[derive(Clone, Debug)]
pub struct OpponentSimulator {
    config: OpponentConfig,
    scaling: ActionScaling,
    opponents: Vec<Opponent>,
}

impl OpponentSimulator {
    /// Seat `config.count` opponents with empty boards.
    #[must_use]
    pub fn new(config: &OpponentConfig) -> Self {
        let opponents = OpponentId::all(config.count)
            .map(|id| Opponent::new(id, config.max_creatures))
            .collect();
        Self {
            config: config.clone(),
            scaling: ActionScaling::new(config.scaling.clone()),
            opponents,
        }
    }

    #[must_use]
    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    #[must_use]
    pub fn scaling(&self) -> &ActionScaling {
        &self.scaling
    }

    /// Look up one opponent.
    pub fn opponent(&self, id: OpponentId) -> GameResult<&Opponent> {
        self.opponents.get(id.index()).ok_or(GameError::UnknownOpponent(id))
    }

    /// Creatures across all opponents.
    #[must_use]
    pub fn total_creatures(&self) -> u32 {
        self.opponents.iter().map(Opponent::creatures).sum()
    }

    /// Clear every opponent's board.
    pub fn reset(&mut self) {
        for opponent in &mut self.opponents {
            opponent.reset();
        }
    }

    /// Run one full opponent turn for the whole table.
    pub fn take_turn(&mut self, state: &mut GameState) -> TurnReport {
        let mut report = TurnReport { turn: state.turn(), ..TurnReport::default() };
        for index in 0..self.opponents.len() {
            report.lands_played += u32::from(self.land_drop(index, state));
        }
        self.scaled_actions(Pool::All, state, &mut report);
        report
    }

    /// Run one turn for a single opponent. Creature enters/dies only touch
    /// that opponent's counter.
    pub fn take_single_opponent_turn(&mut self, id: OpponentId, state: &mut GameState) -> GameResult<TurnReport> {
        let index = self.opponent(id)?.id.index();
        let mut report = TurnReport { turn: state.turn(), ..TurnReport::default() };
        report.lands_played += u32::from(self.land_drop(index, state));
        self.scaled_actions(Pool::Single(index), state, &mut report);
        Ok(report)
    }

    /// Execute one action for one opponent, bypassing the probability gate.
    ///
    /// Population preconditions still apply: `Ok(None)` if the opponent is
    /// at the cap (creature enters), has no creatures (creature dies) or the
    /// player has no creature to target (removal).
    pub fn force_action(
        &mut self,
        id: OpponentId,
        kind: OpponentActionKind,
        state: &mut GameState,
    ) -> GameResult<Option<ActionReport>> {
        let index = self.opponent(id)?.id.index();
        Ok(self.execute(kind, Pool::Single(index), state))
    }

    // === Internals ===

    fn land_drop(&mut self, index: usize, state: &mut GameState) -> bool {
        let rng = state.rng_mut();
        if !rng.chance(self.config.land_play_probability) {
            return false;
        }
        let nonbasic_chance = state.config().nonbasic_land_chance;
        let searched = state.rng_mut().chance(nonbasic_chance);
        state.opponent_plays_land(self.opponents[index].id, searched);
        true
    }

    fn scaled_actions(&mut self, pool: Pool, state: &mut GameState, report: &mut TurnReport) {
        let turn = state.turn();
        for kind in OpponentActionKind::ALL {
            let probability = self.config.probability(kind);
            let attempts = self.scaling.event_count(probability, kind, turn, state.rng_mut());
            for _ in 0..attempts {
                if !state.rng_mut().chance(probability) {
                    continue;
                }
                if let Some(action) = self.execute(kind, pool, state) {
                    report.actions.push(action);
                }
            }
        }
    }

    fn pick(&self, pool: Pool, state: &mut GameState, eligible: impl Fn(&Opponent) -> bool) -> Option<usize> {
        match pool {
            Pool::Single(index) => eligible(&self.opponents[index]).then_some(index),
            Pool::All => {
                let candidates: Vec<usize> = (0..self.opponents.len())
                    .filter(|i| eligible(&self.opponents[*i]))
                    .collect();
                state.rng_mut().choose(&candidates).copied()
            }
        }
    }

    fn execute(&mut self, kind: OpponentActionKind, pool: Pool, state: &mut GameState) -> Option<ActionReport> {
        let report = |opponent: OpponentId| ActionReport { kind, opponent, target: None, creatures_killed: 0 };

        match kind {
            OpponentActionKind::PlayCreature => {
                let index = self.pick(pool, state, Opponent::has_room)?;
                let opponent = &mut self.opponents[index];
                opponent.add_creature();
                let id = opponent.id;
                state.opponent_creature_enters(id);
                Some(report(id))
            }
            OpponentActionKind::CreatureDeath => {
                let index = self.pick(pool, state, |o| o.creatures > 0)?;
                let opponent = &mut self.opponents[index];
                opponent.remove_creature();
                let id = opponent.id;
                state.opponent_creature_dies(id);
                Some(report(id))
            }
            OpponentActionKind::PlayRemoval => {
                let targets: Vec<EntityId> = state.creatures().map(|(id, _)| id).collect();
                let target = *state.rng_mut().choose(&targets)?;
                let id = self.caster(pool, state);
                let before = state.creature_count();
                state.opponent_casts_removal(id, target);
                debug!(opponent = %id, target = %target, "removal resolved");
                Some(ActionReport {
                    target: Some(target),
                    creatures_killed: before.saturating_sub(state.creature_count()),
                    ..report(id)
                })
            }
            OpponentActionKind::PlayBoardWipe => {
                let id = self.caster(pool, state);
                let before = state.creature_count();
                state.opponent_casts_board_wipe(id);
                Some(ActionReport {
                    creatures_killed: before.saturating_sub(state.creature_count()),
                    ..report(id)
                })
            }
        }
    }

    fn caster(&self, pool: Pool, state: &mut GameState) -> OpponentId {
        let index = match pool {
            Pool::Single(index) => index,
            Pool::All => state.rng_mut().gen_range_usize(0..self.opponents.len()),
        };
        self.opponents[index].id
    }
}
