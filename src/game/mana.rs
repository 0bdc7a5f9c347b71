//! Paying costs from the battlefield.
//!
//! Producers are untapped battlefield permanents with a non-empty colour
//! list, enumerated in battlefield order. `can_pay` and `commit_payment`
//! run the same greedy plan, so a passing `can_pay` guarantees the commit.

use tracing::trace;

use crate::core::{EntityId, GameError, GameResult};
use crate::mana::{plan_payment, ManaColor, ManaCost, ManaPool, PaymentPlan, PaymentRejection, Producer};
use crate::zones::Zone;

use super::GameState;

impl GameState {
    fn producers(&self) -> Vec<Producer<'_>> {
        self.cards_in(Zone::Battlefield)
            .filter(|(_, c)| c.is_mana_producer() && !c.tapped)
            .map(|(id, c)| Producer::new(id, &c.produces))
            .collect()
    }

    /// Plan a payment without tapping anything.
    pub fn plan(&self, cost: ManaCost) -> Result<PaymentPlan, PaymentRejection> {
        plan_payment(&self.producers(), cost)
    }

    /// Feasibility check.
    #[must_use]
    pub fn can_pay(&self, cost: ManaCost) -> bool {
        self.plan(cost).is_ok()
    }

    /// Feasibility check with extra generic mana (commander tax).
    #[must_use]
    pub fn can_pay_with_extra(&self, cost: ManaCost, extra_generic: u32) -> bool {
        self.can_pay(cost.with_extra_generic(extra_generic))
    }

    /// Tap the producers the greedy plan claims, in claim order, paying
    /// each producer's tap life cost as it is tapped.
    ///
    /// Returns `InsufficientResources` if the cost is not payable; callers
    /// check `can_pay` first, so that error means a solver defect.
    pub fn commit_payment(&mut self, cost: ManaCost, card: &str) -> GameResult<()> {
        let plan = self.plan(cost).map_err(|rejection| GameError::InsufficientResources {
            card: card.to_string(),
            missing: rejection.missing(),
        })?;

        for id in plan.taps() {
            self.tap_producer(id);
        }
        trace!(card, %cost, taps = plan.len(), "paid cost");
        Ok(())
    }

    fn tap_producer(&mut self, id: EntityId) {
        let life_cost = match self.cards.get_mut(&id) {
            Some(card) => {
                card.tapped = true;
                card.tap_life_cost
            }
            None => 0,
        };
        if life_cost > 0 {
            self.lose_life(life_cost);
        }
    }

    /// Tap one untapped producer, preferring white, then black, then
    /// colorless. Returns `false` if nothing was untapped.
    pub fn spend_one_mana(&mut self) -> bool {
        let found = ManaColor::ALL.iter().find_map(|color| {
            self.producers()
                .into_iter()
                .find(|p| p.colors.contains(color))
                .map(|p| p.id)
        });
        match found {
            Some(id) => {
                self.tap_producer(id);
                true
            }
            None => false,
        }
    }

    /// What the untapped producers could make, counted per colour.
    #[must_use]
    pub fn available_mana(&self) -> ManaPool {
        let mut pool = ManaPool::default();
        for producer in self.producers() {
            pool.add_producer(producer.colors);
        }
        pool
    }

    /// Untap every permanent.
    pub(crate) fn untap_all(&mut self) {
        let battlefield = self.zones.snapshot(Zone::Battlefield);
        for id in battlefield {
            if let Some(card) = self.cards.get_mut(&id) {
                card.tapped = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cards::Card;
    use crate::core::SimConfig;
    use crate::game::GameState;
    use crate::mana::{ManaColor, ManaCost};

    const W: ManaColor = ManaColor::White;
    const B: ManaColor = ManaColor::Black;

    fn state() -> GameState {
        GameState::with_seed(SimConfig::default(), 3).unwrap()
    }

    #[test]
    fn test_commit_taps_claimed_producers() {
        let mut state = state();
        let plains = state.add_to_battlefield(Card::land("Plains", &[W]));
        let swamp = state.add_to_battlefield(Card::land("Swamp", &[B]));
        let spare = state.add_to_battlefield(Card::land("Plains", &[W]));

        let cost = ManaCost::new(1, 1, 0);
        assert!(state.can_pay(cost));
        state.commit_payment(cost, "Test").unwrap();

        assert!(state.card(plains).unwrap().tapped);
        assert!(state.card(swamp).unwrap().tapped);
        assert!(!state.card(spare).unwrap().tapped);
        assert!(!state.can_pay(ManaCost::new(0, 1, 0)));
    }

    #[test]
    fn test_can_pay_with_extra_generic() {
        let mut state = state();
        state.add_to_battlefield(Card::land("Plains", &[W]));

        assert!(state.can_pay_with_extra(ManaCost::new(1, 0, 0), 0));
        assert!(!state.can_pay_with_extra(ManaCost::new(1, 0, 0), 1));
        assert!(!state.can_pay_with_extra(ManaCost::FREE, 2));
    }

    #[test]
    fn test_tap_life_cost_paid_per_tap() {
        let mut state = state();
        state.add_to_battlefield(Card::land("Caves", &[W, B]).with_tap_life_cost(1));
        state.add_to_battlefield(Card::land("Caves", &[W, B]).with_tap_life_cost(1));

        state.commit_payment(ManaCost::new(1, 0, 1), "Test").unwrap();
        assert_eq!(state.life(), 38);
    }

    #[test]
    fn test_commit_infeasible_is_insufficient_resources() {
        let mut state = state();
        state.add_to_battlefield(Card::land("Plains", &[W]));

        let err = state.commit_payment(ManaCost::new(0, 0, 3), "Big Thing").unwrap_err();
        assert!(matches!(
            err,
            crate::core::GameError::InsufficientResources { missing: 2, .. }
        ));
    }

    #[test]
    fn test_mana_rocks_are_producers() {
        let mut state = state();
        let signet = Card::new("Signet", crate::cards::CardType::Artifact, ManaCost::new(0, 0, 2))
            .with_produces(&[W, B]);
        state.add_to_battlefield(signet);

        assert!(state.can_pay(ManaCost::new(0, 1, 0)));
        assert_eq!(state.available_mana().get(B), 1);
    }

    #[test]
    fn test_spend_one_mana_prefers_white() {
        let mut state = state();
        let swamp = state.add_to_battlefield(Card::land("Swamp", &[B]));
        let plains = state.add_to_battlefield(Card::land("Plains", &[W]));

        assert!(state.spend_one_mana());
        assert!(state.card(plains).unwrap().tapped);
        assert!(!state.card(swamp).unwrap().tapped);

        assert!(state.spend_one_mana());
        assert!(!state.spend_one_mana());
    }

    #[test]
    fn test_untap_all() {
        let mut state = state();
        state.add_to_battlefield(Card::land("Plains", &[W]));
        state.commit_payment(ManaCost::new(1, 0, 0), "Test").unwrap();
        assert!(!state.can_pay(ManaCost::new(1, 0, 0)));

        state.untap_all();
        assert!(state.can_pay(ManaCost::new(1, 0, 0)));
    }
}
