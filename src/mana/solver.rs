//! Greedy mana payment solver.
//!
//! Given the untapped producers in battlefield order and a cost, decide
//! whether the cost can be paid and, if so, which producers to tap.
//!
//! ## Algorithm
//!
//! 1. Reject if there are fewer producers than total cost units.
//! 2. Reject if, for white or black, fewer producers can make that colour
//!    than the cost requires.
//! 3. Walk the producers once per colour (white, then black), claiming the
//!    first unclaimed producer that can make the colour until the
//!    requirement is met. Then claim any unclaimed producers for the
//!    generic part.
//!
//! Step 3 does not prefer single-colour producers over duals, so an
//! ordering like `[W/B dual, W]` against a `{W}{B}` cost fails even though
//! tapping them the other way round would work. This is a known
//! approximation of the real assignment problem and is kept as is.
//!
//! The solver is pure: it never taps anything. `GameState::commit_payment`
//! re-runs it and taps the claimed producers in claim order.

use smallvec::SmallVec;

use crate::core::EntityId;

use super::pool::{ManaColor, ManaCost};

/// An untapped mana producer as seen by the solver.
#[derive(Clone, Copy, Debug)]
pub struct Producer<'a> {
    pub id: EntityId,
    pub colors: &'a [ManaColor],
}

impl<'a> Producer<'a> {
    /// Create a producer view.
    #[must_use]
    pub fn new(id: EntityId, colors: &'a [ManaColor]) -> Self {
        Self { id, colors }
    }

    fn makes(&self, color: ManaColor) -> bool {
        self.colors.contains(&color)
    }
}

/// Which part of a cost a claimed producer pays for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pays {
    Color(ManaColor),
    Generic,
}

/// One producer claimed by a payment plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    pub producer: EntityId,
    pub pays: Pays,
}

/// A feasible tapping assignment, in claim order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentPlan {
    claims: SmallVec<[Claim; 8]>,
}

impl PaymentPlan {
    /// Claims in the order they were made (and will be tapped).
    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Producers to tap, in tap order.
    pub fn taps(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.claims.iter().map(|c| c.producer)
    }

    /// Number of producers the plan taps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// `true` for the plan that pays a zero cost.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Why a cost cannot be paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentRejection {
    /// Step 1: fewer producers than cost units.
    NotEnoughProducers { available: usize, needed: u32 },
    /// Step 2: fewer producers of a colour than the colour requires.
    MissingColor { color: ManaColor, available: usize, needed: u32 },
    /// Step 3: the greedy walk left part of the cost unpaid.
    GreedyShortfall { pays: Pays, missing: u32 },
}

impl PaymentRejection {
    /// Units left unpaid.
    #[must_use]
    pub fn missing(&self) -> u32 {
        match *self {
            PaymentRejection::NotEnoughProducers { available, needed } => {
                needed.saturating_sub(available as u32)
            }
            PaymentRejection::MissingColor { available, needed, .. } => {
                needed.saturating_sub(available as u32)
            }
            PaymentRejection::GreedyShortfall { missing, .. } => missing,
        }
    }
}

impl std::fmt::Display for PaymentRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentRejection::NotEnoughProducers { available, needed } => {
                write!(f, "{available} untapped producers for a cost of {needed}")
            }
            PaymentRejection::MissingColor { color, available, needed } => {
                write!(f, "{available} producers of {color} for {needed} required")
            }
            PaymentRejection::GreedyShortfall { pays: Pays::Color(color), missing } => {
                write!(f, "greedy assignment left {missing} {color} unpaid")
            }
            PaymentRejection::GreedyShortfall { pays: Pays::Generic, missing } => {
                write!(f, "greedy assignment left {missing} generic unpaid")
            }
        }
    }
}

/// Plan a payment for `cost` from `producers` (untapped, battlefield order).
pub fn plan_payment(producers: &[Producer<'_>], cost: ManaCost) -> Result<PaymentPlan, PaymentRejection> {
    let needed = cost.total();
    if (producers.len() as u64) < u64::from(needed) {
        return Err(PaymentRejection::NotEnoughProducers { available: producers.len(), needed });
    }

    for color in ManaColor::COLORED {
        let required = cost.colored(color);
        let available = producers.iter().filter(|p| p.makes(color)).count();
        if (available as u64) < u64::from(required) {
            return Err(PaymentRejection::MissingColor { color, available, needed: required });
        }
    }

    let mut claimed: SmallVec<[bool; 16]> = SmallVec::from_elem(false, producers.len());
    let mut plan = PaymentPlan::default();

    for color in ManaColor::COLORED {
        let mut remaining = cost.colored(color);
        for (i, producer) in producers.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            if !claimed[i] && producer.makes(color) {
                claimed[i] = true;
                remaining -= 1;
                plan.claims.push(Claim { producer: producer.id, pays: Pays::Color(color) });
            }
        }
        if remaining > 0 {
            return Err(PaymentRejection::GreedyShortfall { pays: Pays::Color(color), missing: remaining });
        }
    }

    let mut remaining = cost.generic;
    for (i, producer) in producers.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if !claimed[i] {
            claimed[i] = true;
            remaining -= 1;
            plan.claims.push(Claim { producer: producer.id, pays: Pays::Generic });
        }
    }
    if remaining > 0 {
        return Err(PaymentRejection::GreedyShortfall { pays: Pays::Generic, missing: remaining });
    }

    Ok(plan)
}

/// Feasibility check only.
#[must_use]
pub fn can_pay(producers: &[Producer<'_>], cost: ManaCost) -> bool {
    plan_payment(producers, cost).is_ok()
}
