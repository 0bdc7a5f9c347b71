//! Mana: colours, costs, and the payment solver.

mod pool;
mod solver;

pub use pool::{ManaColor, ManaCost, ManaPool};
pub use solver::{can_pay, plan_payment, Claim, Pays, PaymentPlan, PaymentRejection, Producer};
