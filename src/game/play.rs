//! Player actions and the turn lifecycle.
//!
//! ## Entry burst
//!
//! Everything that puts a permanent onto the battlefield goes through
//! `enter_battlefield`:
//!
//! 1. Snapshot the battlefield.
//! 2. Move the card in (entering tapped if it says so).
//! 3. If it was cast and is not a land: `MyPlaysCard`, then `AnyPlaysCard`,
//!    on every permanent including the new one.
//! 4. `SelfEnters` on the new card.
//! 5. If it is a creature: `MyCreatureEnters` on every permanent including
//!    the new one, then `AnyCreatureEnters` on the snapshot only.
//! 6. Drain.
//!
//! Because the drain is LIFO, the last permanent in the snapshot reacts
//! first.

use tracing::debug;

use crate::cards::{Card, TriggerEvent};
use crate::core::{EntityId, GameResult, RuleViolation};
use crate::mana::ManaCost;
use crate::stack::TriggerParams;
use crate::zones::Zone;

use super::state::TurnCounters;
use super::GameState;

/// Mana value ceiling for graveyard casting.
pub const GRAVEYARD_CAST_MAX_MANA_VALUE: u32 = 2;

/// Extra generic mana per previous commander cast.
pub const COMMANDER_TAX: u32 = 2;

impl GameState {
    // === Drawing ===

    /// Draw the top card. `None` if the library is empty.
    pub fn draw_one(&mut self) -> Option<EntityId> {
        let top = self.zones.top(Zone::Library)?;
        self.zones.move_to(top, Zone::Hand);
        self.counters.cards_drawn += 1;
        Some(top)
    }

    /// Draw up to `count` cards; returns how many were drawn.
    pub fn draw_cards(&mut self, count: u32) -> u32 {
        let mut drawn = 0;
        for _ in 0..count {
            if self.draw_one().is_none() {
                break;
            }
            drawn += 1;
        }
        drawn
    }

    // === Lands ===

    /// Play a land from hand.
    ///
    /// Pays the land's entry life cost, fires its `SelfEnters` abilities
    /// and drains.
    pub fn play_land(&mut self, id: EntityId) -> GameResult<()> {
        let card = self.hand_card(id)?;
        if !card.is_land() {
            return Err(RuleViolation::NotALand {
                card: card.name.clone(),
                card_type: card.card_type.to_string(),
            }
            .into());
        }
        if self.counters.lands_played >= 1 {
            return Err(RuleViolation::LandAlreadyPlayed { card: card.name.clone() }.into());
        }
        let life_cost = card.etb_life_cost;

        self.lose_life(life_cost);
        self.counters.lands_played += 1;
        self.enter_battlefield(id, false);
        Ok(())
    }

    // === Casting ===

    /// Play a card from hand. Lands are delegated to `play_land`;
    /// instants and sorceries go to the graveyard after their cast
    /// triggers.
    pub fn play_card(&mut self, id: EntityId) -> GameResult<()> {
        let card = self.hand_card(id)?;
        if card.is_land() {
            return self.play_land(id);
        }
        let (name, cost, permanent) = (card.name.clone(), card.cost, card.is_permanent());

        self.pay_for(&name, cost)?;
        if permanent {
            self.enter_battlefield(id, true);
        } else {
            self.zones.move_to(id, Zone::Graveyard);
            self.cast_triggers(id);
            self.drain();
        }
        Ok(())
    }

    /// `true` if the card is in hand and its cost is payable.
    #[must_use]
    pub fn can_play(&self, id: EntityId) -> bool {
        self.zones.is_in(id, Zone::Hand)
            && self.cards.get(&id).is_some_and(|c| c.is_land() || self.can_pay(c.cost))
    }

    /// Commander cost including tax for previous casts.
    #[must_use]
    pub fn commander_cost(&self) -> Option<ManaCost> {
        let card = self.cards.get(&self.commander?)?;
        Some(card.cost.with_extra_generic(COMMANDER_TAX * self.commander_casts))
    }

    /// `true` if the commander is in the command zone and affordable.
    #[must_use]
    pub fn can_cast_commander(&self) -> bool {
        let Some(card) = self.commander.and_then(|id| self.cards.get(&id)) else {
            return false;
        };
        self.commander_in_command_zone() && self.can_pay_with_extra(card.cost, COMMANDER_TAX * self.commander_casts)
    }

    /// Cast the commander from the command zone.
    pub fn cast_commander(&mut self) -> GameResult<()> {
        let id = self.commander.ok_or(RuleViolation::NoCommander)?;
        let name = self.card_name(id);
        if !self.zones.is_in(id, Zone::Command) {
            return Err(RuleViolation::CommanderNotInCommandZone { card: name }.into());
        }
        let cost = self.commander_cost().ok_or(RuleViolation::NoCommander)?;

        self.pay_for(&name, cost)?;
        self.commander_casts += 1;
        self.enter_battlefield(id, true);
        Ok(())
    }

    // === Graveyard casting ===

    fn graveyard_cast_blocker(&self, id: EntityId) -> Option<&'static str> {
        if !self.cards_in(Zone::Battlefield).any(|(_, c)| c.grants_graveyard_cast) {
            return Some("no permanent grants graveyard casting");
        }
        if self.counters.graveyard_cast_used {
            return Some("already used this turn");
        }
        if !self.zones.is_in(id, Zone::Graveyard) {
            return Some("not in the graveyard");
        }
        match self.cards.get(&id) {
            Some(c) if !c.is_creature() => Some("not a creature"),
            Some(c) if c.mana_value() > GRAVEYARD_CAST_MAX_MANA_VALUE => Some("mana value too high"),
            Some(_) => None,
            None => Some("unknown card"),
        }
    }

    /// `true` if the card may be cast from the graveyard right now
    /// (permission, once-per-turn, creature, mana value) and is affordable.
    #[must_use]
    pub fn can_cast_from_graveyard(&self, id: EntityId) -> bool {
        self.graveyard_cast_blocker(id).is_none() && self.cards.get(&id).is_some_and(|c| self.can_pay(c.cost))
    }

    /// Graveyard cards currently castable, in graveyard order.
    #[must_use]
    pub fn graveyard_castable(&self) -> Vec<EntityId> {
        self.zones
            .iter(Zone::Graveyard)
            .filter(|id| self.can_cast_from_graveyard(*id))
            .collect()
    }

    /// Cast a creature from the graveyard using the once-per-turn grant.
    pub fn cast_from_graveyard(&mut self, id: EntityId) -> GameResult<()> {
        let name = self.card_name(id);
        if let Some(reason) = self.graveyard_cast_blocker(id) {
            return Err(RuleViolation::GraveyardCastUnavailable { card: name, reason: reason.to_string() }.into());
        }
        let cost = self.cards.get(&id).map_or(ManaCost::FREE, |c| c.cost);

        self.pay_for(&name, cost)?;
        self.counters.graveyard_cast_used = true;
        self.enter_battlefield(id, true);
        Ok(())
    }

    // === Turn lifecycle ===

    /// Begin a turn: advance the turn number, reset per-turn counters,
    /// untap, fire `StartOfTurn`, drain.
    pub fn start_turn(&mut self) {
        self.turn += 1;
        self.counters = TurnCounters::default();
        self.untap_all();
        self.fire_on_battlefield(TriggerEvent::StartOfTurn, TriggerParams::NONE);
        self.drain();
    }

    /// End a turn: fire `EndOfTurn`, drain, discard at random down to the
    /// maximum hand size.
    pub fn end_turn(&mut self) {
        self.fire_on_battlefield(TriggerEvent::EndOfTurn, TriggerParams::NONE);
        self.drain();

        let max = self.config.max_hand_size;
        while self.zones.len(Zone::Hand) > max {
            let index = self.rng.gen_range_usize(0..self.zones.len(Zone::Hand));
            if let Some(id) = self.zones.get(Zone::Hand, index) {
                debug!(card = %self.card_name(id), "discard to hand size");
                self.zones.move_to(id, Zone::Graveyard);
            }
        }
    }

    // === Internals ===

    fn hand_card(&self, id: EntityId) -> GameResult<&Card> {
        let card = self.cards.get(&id);
        match card {
            Some(c) if self.zones.is_in(id, Zone::Hand) => Ok(c),
            Some(c) => Err(RuleViolation::NotInHand { card: c.name.clone() }.into()),
            None => Err(RuleViolation::NotInHand { card: id.to_string() }.into()),
        }
    }

    fn pay_for(&mut self, name: &str, cost: ManaCost) -> GameResult<()> {
        if let Err(rejection) = self.plan(cost) {
            return Err(RuleViolation::CannotPayCost { card: name.to_string(), reason: rejection.to_string() }.into());
        }
        self.commit_payment(cost, name)
    }

    fn cast_triggers(&mut self, id: EntityId) {
        self.counters.nonland_cards_played += 1;
        let params = TriggerParams::subject(id);
        self.fire_on_battlefield(TriggerEvent::MyPlaysCard, params);
        self.fire_on_battlefield(TriggerEvent::AnyPlaysCard, params);
    }

    /// Run the entry burst for `id` (which may be in another zone or in no
    /// zone yet).
    pub(crate) fn enter_battlefield(&mut self, id: EntityId, cast: bool) {
        let snapshot = self.zones.snapshot(Zone::Battlefield);

        let Some(card) = self.cards.get_mut(&id) else {
            return;
        };
        card.tapped = card.enters_tapped;
        let (is_land, is_creature) = (card.is_land(), card.is_creature());

        if self.zones.contains(id) {
            self.zones.move_to(id, Zone::Battlefield);
        } else {
            self.zones.add(id, Zone::Battlefield);
        }

        let params = TriggerParams::subject(id);
        if cast && !is_land {
            self.cast_triggers(id);
        }
        self.fire_on(TriggerEvent::SelfEnters, [id], params);
        if is_creature {
            self.fire_on_battlefield(TriggerEvent::MyCreatureEnters, params);
            self.fire_on(TriggerEvent::AnyCreatureEnters, snapshot, params);
        }
        self.drain();
    }
}
