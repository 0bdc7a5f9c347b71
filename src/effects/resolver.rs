//! Ability resolution - executing stack entries on game state.
//!
//! `AbilityResolver::resolve` is the single exhaustive dispatch over
//! `Ability`. Each arm performs one bounded mutation through the
//! `GameState` API and may push further triggers (which the mutator it
//! calls drains before returning).
//!
//! The source card is looked up when the entry resolves, not when it was
//! pushed: "tokens equal to power" sees counters added in between.

use tracing::debug;

use crate::cards::{Ability, Card, TokenSpec};
use crate::core::EntityId;
use crate::game::{GameState, OPPONENT_LIFE_LOST};
use crate::stack::StackEntry;
use crate::zones::Zone;

/// Result of resolving one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// The ability did its thing.
    Success,
    /// The ability could not apply (e.g., source or target is gone).
    Failed(String),
    /// A probability gate or condition said no.
    Skipped,
}

/// Resolves stack entries on game state.
pub struct AbilityResolver;

impl AbilityResolver {
    /// Resolve a single entry.
    pub fn resolve(state: &mut GameState, entry: &StackEntry) -> ResolveResult {
        let source = entry.source.entity();
        let params = entry.params;

        match &entry.ability {
            // === Life ===
            Ability::GainLife { amount } => {
                state.gain_life(*amount);
                ResolveResult::Success
            }

            Ability::GainLifeSilently { amount } => {
                state.gain_life_silently(*amount);
                ResolveResult::Success
            }

            Ability::ChanceToGainLife { chance, amount } => {
                if state.rng.chance(*chance) {
                    state.gain_life(*amount);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Ability::GainLifeOnNonbasicLand { amount } => {
                let chance = state.config.nonbasic_land_chance;
                if state.rng.chance(chance) {
                    state.gain_life(*amount);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Ability::GainLifePerSpellCast => {
                let spells = i64::from(state.counters.nonland_cards_played);
                if spells > 0 {
                    state.gain_life(spells);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Ability::SpendManaToGainLife { amount } => {
                if state.spend_one_mana() {
                    state.gain_life(*amount);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Ability::DrainOpponents { amount, all_opponents } => {
                let mut lost = amount.resolve(params.amount);
                if *all_opponents {
                    lost *= state.config.opponents.count as i64;
                }
                state.add_property(OPPONENT_LIFE_LOST, lost);
                ResolveResult::Success
            }

            // === Cards ===
            Ability::DrawCards { count } => {
                state.draw_cards(*count);
                ResolveResult::Success
            }

            Ability::Scry { .. } => {
                state.draw_cards(1);
                ResolveResult::Success
            }

            Ability::Explore => Self::explore(state, source),

            Ability::RevealAndLoseLife => match state.draw_one() {
                Some(drawn) => {
                    let loss = state
                        .card(drawn)
                        .filter(|c| !c.is_land())
                        .map_or(0, |c| i64::from(c.mana_value()));
                    state.lose_life(loss);
                    ResolveResult::Success
                }
                None => ResolveResult::Failed("library is empty".to_string()),
            },

            Ability::PayOrDraw { pay_rate } => {
                let rate = pay_rate.unwrap_or(state.config.pay_rate);
                if state.rng.chance(rate) {
                    state.draw_cards(1);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            // === Counters ===
            Ability::AddCounters { amount } => match Self::source_on_battlefield(state, source) {
                Some(id) => {
                    if let Some(card) = state.card_mut(id) {
                        card.add_counters(*amount);
                    }
                    ResolveResult::Success
                }
                None => ResolveResult::Failed("source left the battlefield".to_string()),
            },

            Ability::AddCountersToAllCreatures { amount } => {
                let creatures: Vec<EntityId> = state.creatures().map(|(id, _)| id).collect();
                for id in creatures {
                    if let Some(card) = state.card_mut(id) {
                        card.add_counters(*amount);
                    }
                }
                ResolveResult::Success
            }

            Ability::MoveCountersOnDeath => Self::move_counters(state, source),

            // === Tokens ===
            Ability::CreateToken { token } => {
                state.create_token(*token);
                ResolveResult::Success
            }

            Ability::ChanceToCreateToken { chance, token } => {
                if state.rng.chance(*chance) {
                    state.create_token(*token);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Ability::TokensEqualToPower { token } => {
                let power = source
                    .and_then(|id| state.card(id))
                    .and_then(|c| c.power)
                    .unwrap_or(0)
                    .max(0);
                Self::create_tokens(state, *token, power as u32)
            }

            Ability::TokenIfLifeGainedThisTurn { token } => {
                if state.counters.life_gained > 0 {
                    state.create_token(*token);
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            // === Protection ===
            Ability::CounterNextRemoval => {
                let countered = state
                    .stack
                    .excise_topmost(|e| e.is_opponent_removal() && e.ability == Ability::DestroyTarget);
                match countered {
                    Some(spell) => {
                        debug!(source = ?source, spell = %spell.ability, "countered removal");
                        ResolveResult::Success
                    }
                    None => ResolveResult::Skipped,
                }
            }

            Ability::SacrificeToCounterRemoval => {
                let Some(id) = Self::source_on_battlefield(state, source) else {
                    return ResolveResult::Failed("source left the battlefield".to_string());
                };
                match state.stack.excise_topmost(StackEntry::is_opponent_removal) {
                    Some(spell) => {
                        debug!(source = %id, spell = %spell.ability, "sacrificed to counter removal");
                        state.creature_dies(id);
                        ResolveResult::Success
                    }
                    None => ResolveResult::Skipped,
                }
            }

            // === Opponent spells ===
            Ability::DestroyTarget => match params.target {
                Some(target) if state.creature_dies(target) => ResolveResult::Success,
                Some(_) => ResolveResult::Failed("target left the battlefield".to_string()),
                None => ResolveResult::Failed("no target".to_string()),
            },

            Ability::DestroyAllCreatures => {
                let creatures: Vec<EntityId> = state.creatures().map(|(id, _)| id).collect();
                for id in creatures {
                    state.creature_dies(id);
                }
                ResolveResult::Success
            }
        }
    }

    fn source_on_battlefield(state: &GameState, source: Option<EntityId>) -> Option<EntityId> {
        source.filter(|id| state.zones().is_in(*id, Zone::Battlefield))
    }

    fn explore(state: &mut GameState, source: Option<EntityId>) -> ResolveResult {
        let Some(top) = state.zones().top(Zone::Library) else {
            return ResolveResult::Failed("library is empty".to_string());
        };
        let is_land = state.card(top).is_some_and(Card::is_land);
        if is_land {
            state.zones.move_to(top, Zone::Hand);
        } else {
            state.zones.move_to(top, Zone::Graveyard);
            if let Some(id) = Self::source_on_battlefield(state, source) {
                if let Some(card) = state.card_mut(id) {
                    card.add_counters(1);
                }
            }
        }
        ResolveResult::Success
    }

    fn move_counters(state: &mut GameState, source: Option<EntityId>) -> ResolveResult {
        let Some(id) = source else {
            return ResolveResult::Failed("no source card".to_string());
        };
        let counters = state.card(id).map_or(0, Card::counters);
        if counters == 0 {
            return ResolveResult::Skipped;
        }

        let commander = state
            .commander()
            .filter(|c| *c != id && state.zones().is_in(*c, Zone::Battlefield));
        let target = match commander {
            Some(c) => Some(c),
            None => {
                let others: Vec<EntityId> =
                    state.creatures().map(|(c, _)| c).filter(|c| *c != id).collect();
                state.rng.choose(&others).copied()
            }
        };

        match target.and_then(|t| state.card_mut(t)) {
            Some(card) => {
                card.add_counters(counters);
                ResolveResult::Success
            }
            None => ResolveResult::Skipped,
        }
    }

    fn create_tokens(state: &mut GameState, token: TokenSpec, count: u32) -> ResolveResult {
        if count == 0 {
            return ResolveResult::Skipped;
        }
        for _ in 0..count {
            state.create_token(token);
        }
        ResolveResult::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Amount, CardType, TriggerEvent};
    use crate::core::SimConfig;
    use crate::mana::{ManaColor, ManaCost};
    use crate::stack::{StackSource, TriggerParams};

    const CAT: TokenSpec = TokenSpec::new("Cat", 1, 1);

    fn state() -> GameState {
        GameState::with_seed(SimConfig::default(), 13).unwrap()
    }

    fn entry(ability: Ability, source: EntityId) -> StackEntry {
        StackEntry::new(ability, StackSource::Permanent(source), TriggerEvent::LifeGained, TriggerParams::NONE)
    }

    /// Everything a zero-amount ability could touch.
    fn observable(state: &GameState) -> (i64, usize, i64, i64, usize, usize, usize, i64) {
        (
            state.life(),
            state.creature_count(),
            state.total_power(),
            state.total_toughness(),
            state.hand_size(),
            state.library_size(),
            state.graveyard_size(),
            state.opponent_life_lost(),
        )
    }

    #[test]
    fn test_zero_amounts_change_nothing() {
        let mut state = state();
        let source = state.add_to_battlefield(Card::creature("Cleric", ManaCost::FREE, 2, 2));
        state.add_to_battlefield(Card::creature("Bears", ManaCost::FREE, 2, 2));
        for _ in 0..3 {
            state.add_to_library_top(Card::land("Plains", &[ManaColor::White]));
        }

        let abilities = [
            Ability::AddCounters { amount: 0 },
            Ability::AddCountersToAllCreatures { amount: 0 },
            Ability::DrawCards { count: 0 },
            Ability::DrainOpponents { amount: Amount::Fixed(0), all_opponents: true },
            Ability::DrainOpponents { amount: Amount::Fixed(0), all_opponents: false },
            Ability::GainLife { amount: 0 },
        ];
        for ability in abilities {
            let before = observable(&state);
            AbilityResolver::resolve(&mut state, &entry(ability.clone(), source));
            assert_eq!(observable(&state), before, "{ability}");
            assert!(state.stack().is_empty());
        }
    }

    #[test]
    fn test_tokens_from_zero_power_source() {
        let mut state = state();
        let husk = state.add_to_battlefield(Card::creature("Husk", ManaCost::FREE, 0, 1));

        let before = observable(&state);
        let result = AbilityResolver::resolve(&mut state, &entry(Ability::TokensEqualToPower { token: CAT }, husk));

        assert_eq!(result, ResolveResult::Skipped);
        assert_eq!(observable(&state), before);
    }

    #[test]
    fn test_tokens_equal_to_power() {
        let mut state = state();
        let giant = state.add_to_battlefield(Card::creature("Giant", ManaCost::FREE, 3, 3));

        AbilityResolver::resolve(&mut state, &entry(Ability::TokensEqualToPower { token: CAT }, giant));
        assert_eq!(state.creature_count(), 4);
    }

    #[test]
    fn test_counters_on_powerless_source() {
        let mut state = state();
        let shrine = state.add_to_battlefield(Card::new("Shrine", CardType::Enchantment, ManaCost::new(1, 0, 0)));

        let result = AbilityResolver::resolve(&mut state, &entry(Ability::AddCounters { amount: 2 }, shrine));

        assert_eq!(result, ResolveResult::Success);
        let card = state.card(shrine).unwrap();
        assert_eq!(card.power, None);
        assert_eq!(card.toughness, None);
    }

    #[test]
    fn test_explore_with_powerless_source() {
        let mut state = state();
        let land = state.add_to_battlefield(Card::land("Plains", &[ManaColor::White]));
        state.add_to_library_top(Card::new("Rite", CardType::Sorcery, ManaCost::new(0, 0, 2)));

        let result = AbilityResolver::resolve(&mut state, &entry(Ability::Explore, land));

        assert_eq!(result, ResolveResult::Success);
        assert_eq!(state.graveyard_size(), 1);
        let card = state.card(land).unwrap();
        assert_eq!(card.power, None);
        assert_eq!(card.toughness, None);
    }

    #[test]
    fn test_explore_land_goes_to_hand() {
        let mut state = state();
        let scout = state.add_to_battlefield(Card::creature("Scout", ManaCost::FREE, 1, 1));
        state.add_to_library_top(Card::land("Swamp", &[ManaColor::Black]));

        AbilityResolver::resolve(&mut state, &entry(Ability::Explore, scout));

        assert_eq!(state.hand_size(), 1);
        assert_eq!(state.card(scout).unwrap().power, Some(1));
    }

    #[test]
    fn test_drain_triggering_amount_for_each_opponent() {
        let mut state = state();
        let cleric = state.add_to_battlefield(Card::creature("Cleric", ManaCost::FREE, 2, 2));
        let drain = StackEntry::new(
            Ability::DrainOpponents { amount: Amount::Triggering, all_opponents: true },
            StackSource::Permanent(cleric),
            TriggerEvent::LifeGained,
            TriggerParams::amount(2),
        );

        AbilityResolver::resolve(&mut state, &drain);
        assert_eq!(state.opponent_life_lost(), 6);
    }

    #[test]
    fn test_missing_source_fails() {
        let mut state = state();
        let gone = state.add_to_graveyard(Card::creature("Ghost", ManaCost::FREE, 1, 1));

        let result = AbilityResolver::resolve(&mut state, &entry(Ability::AddCounters { amount: 1 }, gone));
        assert!(matches!(result, ResolveResult::Failed(_)));
    }
}
