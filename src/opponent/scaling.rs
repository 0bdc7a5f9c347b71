//! Turn-indexed scaling of opponent action rates.
//!
//! ## Scaling factor
//!
//! Before `start_turn` the factor is exactly 1.0. From then on, with
//! `t = turn - start_turn + 1` and `b = base_factor`:
//!
//! | Formula | Factor |
//! |---|---|
//! | Linear | `1 + b*t` |
//! | Exponential | `1 + b*(e^(t/2) - 1)` |
//! | Logarithmic | `1 + b*ln(t + 1)` |
//!
//! The result is clamped to `max_factor`.
//!
//! ## Event counts
//!
//! For a base probability `p` and factor `s`, count 0 gets mass `1 - p*s`
//! and each count `k` in `1..=max` gets `p*s * 0.5^(k-1)`. The masses are
//! normalized and one uniform draw picks the count from the cumulative
//! distribution. When `p*s > 1` the count-0 mass is negative; it is kept
//! as-is, which shifts the normalized mass onto the higher counts.

use smallvec::SmallVec;

use crate::core::{GameRng, OpponentActionKind, ScalingConfig, ScalingFormula};

/// Probability masses over event counts `0..=max`, indexed by count.
pub type EventDistribution = SmallVec<[f64; 4]>;

/// Computes scaling factors and samples per-turn event counts.
///
/// Built from a `ScalingConfig` and passed explicitly to whoever needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionScaling {
    config: ScalingConfig,
}

impl ActionScaling {
    #[must_use]
    pub fn new(config: ScalingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    /// Multiplier on base probabilities for `turn`.
    #[must_use]
    pub fn scaling_factor(&self, turn: u32) -> f64 {
        let config = &self.config;
        if turn < config.start_turn {
            return 1.0;
        }

        let t = f64::from(turn - config.start_turn + 1);
        let b = config.base_factor;
        let factor = match config.formula {
            ScalingFormula::Linear => 1.0 + b * t,
            ScalingFormula::Exponential => 1.0 + b * ((t * 0.5).exp() - 1.0),
            ScalingFormula::Logarithmic => 1.0 + b * (t + 1.0).ln(),
        };
        factor.min(config.max_factor)
    }

    /// Normalized distribution over event counts for one action kind.
    #[must_use]
    pub fn distribution(&self, base_probability: f64, kind: OpponentActionKind, turn: u32) -> EventDistribution {
        let scaled = base_probability * self.scaling_factor(turn);
        let max = self.config.max_events.for_kind(kind);

        let mut masses: EventDistribution = (0..=max)
            .map(|count| match count {
                0 => 1.0 - scaled,
                k => scaled * 0.5_f64.powi(k as i32 - 1),
            })
            .collect();

        let total: f64 = masses.iter().sum();
        if total > 0.0 {
            for mass in &mut masses {
                *mass /= total;
            }
        }
        masses
    }

    /// Sample how many times `kind` is attempted on `turn`.
    ///
    /// Consumes exactly one uniform draw. Falls back to 0 if rounding
    /// leaves the draw above the final cumulative mass.
    pub fn event_count(
        &self,
        base_probability: f64,
        kind: OpponentActionKind,
        turn: u32,
        rng: &mut GameRng,
    ) -> u32 {
        let roll = rng.next_f64();
        let mut cumulative = 0.0;
        for (count, mass) in self.distribution(base_probability, kind, turn).into_iter().enumerate() {
            cumulative += mass;
            if roll <= cumulative {
                return count as u32;
            }
        }
        0
    }
}

impl Default for ActionScaling {
    fn default() -> Self {
        Self::new(ScalingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaling(formula: ScalingFormula) -> ActionScaling {
        ActionScaling::new(ScalingConfig { formula, ..ScalingConfig::default() })
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_factor_before_start_is_one() {
        let scaling = ActionScaling::new(ScalingConfig { start_turn: 5, ..ScalingConfig::default() });
        assert_eq!(scaling.scaling_factor(0), 1.0);
        assert_eq!(scaling.scaling_factor(4), 1.0);
        assert!(scaling.scaling_factor(5) > 1.0);
    }

    #[test]
    fn test_factor_formulas() {
        assert!(approx(scaling(ScalingFormula::Linear).scaling_factor(3), 1.3));
        assert!(approx(
            scaling(ScalingFormula::Exponential).scaling_factor(2),
            1.0 + 0.1 * (1.0_f64.exp() - 1.0)
        ));
        assert!(approx(scaling(ScalingFormula::Logarithmic).scaling_factor(1), 1.0 + 0.1 * 2.0_f64.ln()));
    }

    #[test]
    fn test_factor_clamped_to_ceiling() {
        let scaling = scaling(ScalingFormula::Exponential);
        assert_eq!(scaling.scaling_factor(100), 4.0);
    }

    #[test]
    fn test_distribution_shape() {
        let scaling = ActionScaling::new(ScalingConfig {
            base_factor: 0.0,
            ..ScalingConfig::default()
        });
        // p = 0.5, factor 1.0, max 3: raw masses 0.5, 0.5, 0.25, 0.125
        let dist = scaling.distribution(0.5, OpponentActionKind::PlayCreature, 3);
        assert_eq!(dist.len(), 4);
        assert!(approx(dist.iter().sum::<f64>(), 1.0));
        assert!(approx(dist[0], 0.5 / 1.375));
        assert!(approx(dist[3], 0.125 / 1.375));
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let scaling = scaling(ScalingFormula::Exponential);
        let mut rng = GameRng::new(1);
        for turn in 1..20 {
            assert_eq!(scaling.event_count(0.0, OpponentActionKind::PlayRemoval, turn, &mut rng), 0);
        }
    }

    #[test]
    fn test_event_count_bounded_by_max() {
        let scaling = scaling(ScalingFormula::Linear);
        let mut rng = GameRng::new(99);
        for turn in 1..30 {
            let count = scaling.event_count(1.0, OpponentActionKind::PlayBoardWipe, turn, &mut rng);
            assert!(count <= 1);
        }
    }

    #[test]
    fn test_event_count_reproducible() {
        let scaling = ActionScaling::default();
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        let seq_a: Vec<u32> =
            (1..15).map(|t| scaling.event_count(0.7, OpponentActionKind::PlayCreature, t, &mut a)).collect();
        let seq_b: Vec<u32> =
            (1..15).map(|t| scaling.event_count(0.7, OpponentActionKind::PlayCreature, t, &mut b)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
