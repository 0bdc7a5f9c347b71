//! Error taxonomy.
//!
//! - `RuleViolation`: an illegal play attempt (second land, unpayable cost,
//!   commander not in the command zone...). Expected and recoverable; the
//!   driver logs it and moves on to the next candidate play.
//! - `GameError`: everything a caller might see, including rule violations
//!   and conditions that indicate a defect (`InsufficientResources` after a
//!   passing feasibility check).
//!
//! Runaway trigger cascades are not errors. The stack reports them through
//! `DrainOutcome::Aborted` and the game continues.

use thiserror::Error;

use super::OpponentId;

/// An illegal play attempt, carrying the card name and a reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("cannot play {card}: a land was already played this turn")]
    LandAlreadyPlayed { card: String },

    #[error("cannot play {card} as a land: it is a {card_type}")]
    NotALand { card: String, card_type: String },

    #[error("cannot play {card}: it is not in hand")]
    NotInHand { card: String },

    #[error("cannot pay for {card}: {reason}")]
    CannotPayCost { card: String, reason: String },

    #[error("cannot cast commander {card}: it is not in the command zone")]
    CommanderNotInCommandZone { card: String },

    #[error("no commander is configured for this game")]
    NoCommander,

    #[error("cannot cast {card} from the graveyard: {reason}")]
    GraveyardCastUnavailable { card: String, reason: String },
}

/// Top-level error for game operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("rule violation: {0}")]
    RuleViolation(#[from] RuleViolation),

    /// Commit was attempted against an infeasible cost. The solver must
    /// never reach this after a passing `can_pay`.
    #[error("insufficient mana to pay {card}: {missing} unpaid")]
    InsufficientResources { card: String, missing: u32 },

    #[error("unknown card: {0}")]
    UnknownCard(String),

    #[error("unknown opponent: {0}")]
    UnknownOpponent(OpponentId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// `true` for errors the driver should skip rather than propagate.
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, GameError::RuleViolation(_))
    }
}

/// Result alias for game operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violation_converts() {
        let err: GameError = RuleViolation::LandAlreadyPlayed { card: "Plains".into() }.into();
        assert!(err.is_rule_violation());
        assert_eq!(
            err.to_string(),
            "rule violation: cannot play Plains: a land was already played this turn"
        );
    }

    #[test]
    fn test_defects_are_not_rule_violations() {
        let err = GameError::InsufficientResources { card: "Sol Ring".into(), missing: 1 };
        assert!(!err.is_rule_violation());
        assert!(!GameError::UnknownCard("Nope".into()).is_rule_violation());
    }

    #[test]
    fn test_unknown_opponent_message() {
        let err = GameError::UnknownOpponent(OpponentId(4));
        assert_eq!(err.to_string(), "unknown opponent: Opponent(4)");
    }
}
