//! Event mutators: life, deaths, tokens, and the opponent-side events.
//!
//! Each public mutator pushes its triggers and drains before returning.

use tracing::debug;

use crate::cards::{Ability, Card, TokenSpec, TriggerEvent};
use crate::core::{EntityId, OpponentId};
use crate::stack::{StackEntry, StackSource, TriggerParams};
use crate::zones::Zone;

use super::GameState;

impl GameState {
    // === Life ===

    /// Gain life and fire `LifeGained` on every permanent (carrying the
    /// amount). Amounts of 0 or less do nothing.
    pub fn gain_life(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        self.life += amount;
        self.counters.life_gained += amount;
        self.fire_on_battlefield(TriggerEvent::LifeGained, TriggerParams::amount(amount));
        self.drain();
    }

    /// Gain life without firing triggers or counting toward life gained
    /// this turn.
    pub fn gain_life_silently(&mut self, amount: i64) {
        if amount > 0 {
            self.life += amount;
        }
    }

    /// Lose life. Life may go negative.
    pub fn lose_life(&mut self, amount: i64) {
        if amount > 0 {
            self.life -= amount;
        }
    }

    // === Deaths ===

    /// A player creature dies.
    ///
    /// The card leaves the battlefield first, then `SelfDies` is pushed on
    /// it, `MyCreatureDies` and `CreatureDies` on the remaining permanents
    /// plus the dying card. After the drain, tokens cease to exist, the
    /// commander returns to the command zone and anything else goes to
    /// the graveyard.
    ///
    /// Returns `false` (and does nothing) if the card is not on the
    /// battlefield.
    pub fn creature_dies(&mut self, id: EntityId) -> bool {
        if !self.zones.is_in(id, Zone::Battlefield) {
            return false;
        }
        self.zones.remove(id);

        let witnesses: Vec<EntityId> = self
            .zones
            .iter(Zone::Battlefield)
            .chain(std::iter::once(id))
            .collect();
        let params = TriggerParams::subject(id);

        self.fire_on(TriggerEvent::SelfDies, [id], params);
        self.fire_on(TriggerEvent::MyCreatureDies, witnesses.iter().copied(), params);
        self.fire_on(TriggerEvent::CreatureDies, witnesses, params);
        self.drain();

        self.bury(id);
        true
    }

    fn bury(&mut self, id: EntityId) {
        let Some(card) = self.cards.get_mut(&id) else {
            return;
        };
        if card.is_token {
            self.cards.remove(&id);
            return;
        }
        card.reset();
        let destination = if self.commander == Some(id) { Zone::Command } else { Zone::Graveyard };
        self.zones.add(id, destination);
    }

    // === Tokens ===

    /// Create a creature token. It enters through the normal entry burst:
    /// its own `SelfEnters`, `MyCreatureEnters` on everything including
    /// itself, `AnyCreatureEnters` on the permanents already there.
    pub fn create_token(&mut self, token: TokenSpec) -> EntityId {
        let id = self.insert_card(Card::token(token.name, token.power, token.toughness));
        self.enter_battlefield(id, false);
        id
    }

    // === Opponent events ===

    /// An opponent creature entered.
    pub fn opponent_creature_enters(&mut self, opponent: OpponentId) {
        debug!(%opponent, "opponent creature enters");
        self.fire_on_battlefield(TriggerEvent::OpponentPlaysCard, TriggerParams::NONE);
        self.fire_on_battlefield(TriggerEvent::AnyPlaysCard, TriggerParams::NONE);
        self.fire_on_battlefield(TriggerEvent::AnyCreatureEnters, TriggerParams::NONE);
        self.fire_on_battlefield(TriggerEvent::OpponentCreatureEnters, TriggerParams::NONE);
        self.drain();
    }

    /// An opponent creature died.
    pub fn opponent_creature_dies(&mut self, opponent: OpponentId) {
        debug!(%opponent, "opponent creature dies");
        self.fire_on_battlefield(TriggerEvent::CreatureDies, TriggerParams::NONE);
        self.drain();
    }

    /// An opponent played a land. A fetched non-basic also counts as a
    /// library search.
    pub fn opponent_plays_land(&mut self, opponent: OpponentId, searched_library: bool) {
        debug!(%opponent, searched_library, "opponent plays land");
        self.fire_on_battlefield(TriggerEvent::OpponentPlaysLand, TriggerParams::NONE);
        if searched_library {
            self.fire_on_battlefield(TriggerEvent::OpponentSearchedLibrary, TriggerParams::NONE);
        }
        self.drain();
    }

    /// An opponent casts targeted removal at a player creature.
    ///
    /// The spell goes on the stack beneath the player's reactions, so a
    /// protection ability can excise it before it resolves.
    pub fn opponent_casts_removal(&mut self, opponent: OpponentId, target: EntityId) {
        debug!(%opponent, target = %target, "opponent casts removal");
        self.enqueue(StackEntry::new(
            Ability::DestroyTarget,
            StackSource::Opponent(opponent),
            TriggerEvent::OpponentPlaysRemoval,
            TriggerParams::target(target),
        ));
        self.opponent_spell_reactions(TriggerEvent::OpponentPlaysRemoval);
        self.drain();
    }

    /// An opponent casts a board wipe.
    pub fn opponent_casts_board_wipe(&mut self, opponent: OpponentId) {
        debug!(%opponent, "opponent casts board wipe");
        self.enqueue(StackEntry::new(
            Ability::DestroyAllCreatures,
            StackSource::Opponent(opponent),
            TriggerEvent::OpponentPlaysBoardWipe,
            TriggerParams::NONE,
        ));
        self.opponent_spell_reactions(TriggerEvent::OpponentPlaysBoardWipe);
        self.drain();
    }

    fn opponent_spell_reactions(&mut self, event: TriggerEvent) {
        self.fire_on_battlefield(TriggerEvent::OpponentPlaysCard, TriggerParams::NONE);
        self.fire_on_battlefield(TriggerEvent::AnyPlaysCard, TriggerParams::NONE);
        self.fire_on_battlefield(event, TriggerParams::NONE);
    }
}
