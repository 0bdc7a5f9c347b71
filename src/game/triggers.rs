//! Pushing triggers and draining the stack.
//!
//! ## Doubling
//!
//! While any battlefield permanent has `doubles_small_triggers`, an entry
//! whose source is a card with printed power 2 or less is pushed twice.
//! Sources without printed power (lands, artifacts) and opponent spells
//! are never doubled.
//!
//! ## Draining
//!
//! `drain` pops LIFO until the stack is empty. Resolving an entry may call
//! a mutator that drains again (nested drain); the nested drain empties the
//! shared stack before the outer loop continues.
//!
//! The depth ceiling bounds both the pending entry count and the nesting
//! depth. Crossing either clears the stack, logs the dump at `warn` level,
//! bumps `cascade_aborts` and returns `DrainOutcome::Aborted`.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::cards::{Ability, TriggerEvent};
use crate::core::EntityId;
use crate::effects::AbilityResolver;
use crate::stack::{DrainOutcome, StackEntry, StackSource, TriggerParams};
use crate::zones::Zone;

use super::GameState;

impl GameState {
    /// `true` if a trigger doubler is on the battlefield.
    #[must_use]
    pub fn doubler_present(&self) -> bool {
        self.cards_in(Zone::Battlefield).any(|(_, c)| c.doubles_small_triggers)
    }

    fn is_doubled(&self, source: StackSource) -> bool {
        let Some(id) = source.entity() else {
            return false;
        };
        let small = self
            .cards
            .get(&id)
            .and_then(|c| c.base_power())
            .is_some_and(|p| p <= 2);
        small && self.doubler_present()
    }

    /// Push one entry, or two if the doubling rule applies.
    pub fn enqueue(&mut self, entry: StackEntry) {
        let doubled = self.is_doubled(entry.source);
        trace!(
            source = %entry.source,
            event = %entry.event,
            ability = %entry.ability,
            depth = self.stack.len() + 1,
            "push trigger"
        );
        if doubled {
            trace!(source = %entry.source, event = %entry.event, ability = %entry.ability, "push doubled trigger");
            self.stack.push(entry.clone());
        }
        self.stack.push(entry);
    }

    /// Push every `event` ability of each card in `on`, in order.
    pub(crate) fn fire_on<I>(&mut self, event: TriggerEvent, on: I, params: TriggerParams)
    where
        I: IntoIterator<Item = EntityId>,
    {
        for id in on {
            let abilities: SmallVec<[Ability; 2]> = match self.cards.get(&id) {
                Some(card) => card.abilities_for(event).cloned().collect(),
                None => continue,
            };
            for ability in abilities {
                self.enqueue(StackEntry::new(ability, StackSource::Permanent(id), event, params));
            }
        }
    }

    /// Push `event` on every battlefield permanent.
    pub(crate) fn fire_on_battlefield(&mut self, event: TriggerEvent, params: TriggerParams) {
        let battlefield = self.zones.snapshot(Zone::Battlefield);
        self.fire_on(event, battlefield, params);
    }

    /// Resolve pending entries until the stack is empty or the depth
    /// ceiling is crossed.
    pub fn drain(&mut self) -> DrainOutcome {
        let limit = self.config.stack_depth_limit;
        self.stack.enter_drain();

        let mut resolved = 0;
        let outcome = loop {
            if self.stack.len() > limit || self.stack.drain_depth() > limit {
                break self.abort_cascade(resolved);
            }
            let Some(entry) = self.stack.pop() else {
                break DrainOutcome::Resolved { count: resolved };
            };
            let result = AbilityResolver::resolve(self, &entry);
            trace!(
                source = %entry.source,
                event = %entry.event,
                ability = %entry.ability,
                ?result,
                "resolved trigger"
            );
            resolved += 1;
        };

        self.stack.exit_drain();
        outcome
    }

    fn abort_cascade(&mut self, resolved: usize) -> DrainOutcome {
        let discarded = self.stack.clear();
        self.cascade_aborts += 1;
        warn!(
            pending = discarded.len(),
            nesting = self.stack.drain_depth(),
            resolved,
            stack = ?discarded,
            "trigger cascade exceeded depth ceiling, clearing stack"
        );
        DrainOutcome::Aborted { resolved, discarded }
    }
}
