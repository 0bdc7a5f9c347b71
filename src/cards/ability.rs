//! Trigger events and the closed catalogue of abilities.
//!
//! A card's abilities are an ordered list of `AbilityBinding`s: an event
//! to react to and the `Ability` to put on the trigger stack when it
//! happens. Order among bindings for the same event is preserved.
//!
//! Every ability kind carries its own typed parameters. The stack engine
//! dispatches them through one exhaustive match in
//! `effects::AbilityResolver`.

use serde::{Deserialize, Serialize};

/// Everything a permanent can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// This permanent entered the battlefield.
    SelfEnters,
    /// A creature under the player's control entered (including this one).
    MyCreatureEnters,
    /// Another creature entered, on either side of the table.
    AnyCreatureEnters,
    /// An opponent's creature entered.
    OpponentCreatureEnters,
    /// The player gained life. The stack entry carries the amount.
    LifeGained,
    /// Any creature died.
    CreatureDies,
    /// A creature the player controlled died.
    MyCreatureDies,
    /// This creature died.
    SelfDies,
    /// Start of the player's turn.
    StartOfTurn,
    /// End of the player's turn.
    EndOfTurn,
    /// The player cast a nonland card.
    MyPlaysCard,
    /// Anyone cast a nonland card.
    AnyPlaysCard,
    /// An opponent cast a card.
    OpponentPlaysCard,
    /// An opponent played a land.
    OpponentPlaysLand,
    /// An opponent cast targeted removal.
    OpponentPlaysRemoval,
    /// An opponent cast a board wipe.
    OpponentPlaysBoardWipe,
    /// An opponent searched their library.
    OpponentSearchedLibrary,
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerEvent::SelfEnters => "self_enters",
            TriggerEvent::MyCreatureEnters => "my_creature_enters",
            TriggerEvent::AnyCreatureEnters => "any_creature_enters",
            TriggerEvent::OpponentCreatureEnters => "opponent_creature_enters",
            TriggerEvent::LifeGained => "life_gained",
            TriggerEvent::CreatureDies => "creature_dies",
            TriggerEvent::MyCreatureDies => "my_creature_dies",
            TriggerEvent::SelfDies => "self_dies",
            TriggerEvent::StartOfTurn => "start_of_turn",
            TriggerEvent::EndOfTurn => "end_of_turn",
            TriggerEvent::MyPlaysCard => "my_plays_card",
            TriggerEvent::AnyPlaysCard => "any_plays_card",
            TriggerEvent::OpponentPlaysCard => "opponent_plays_card",
            TriggerEvent::OpponentPlaysLand => "opponent_plays_land",
            TriggerEvent::OpponentPlaysRemoval => "opponent_plays_removal",
            TriggerEvent::OpponentPlaysBoardWipe => "opponent_plays_board_wipe",
            TriggerEvent::OpponentSearchedLibrary => "opponent_searched_library",
        };
        f.write_str(name)
    }
}

/// How much an amount-based ability applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amount {
    /// A printed number.
    Fixed(i64),
    /// The amount carried by the triggering event (life gained). Resolves
    /// to 0 when the event carries none.
    Triggering,
}

impl Amount {
    /// Resolve against the triggering event's amount.
    #[must_use]
    pub fn resolve(self, event_amount: Option<i64>) -> i64 {
        match self {
            Amount::Fixed(n) => n,
            Amount::Triggering => event_amount.unwrap_or(0),
        }
    }
}

/// A token to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpec {
    pub name: &'static str,
    pub power: i32,
    pub toughness: i32,
}

impl TokenSpec {
    /// Create a token description.
    #[must_use]
    pub const fn new(name: &'static str, power: i32, toughness: i32) -> Self {
        Self { name, power, toughness }
    }
}

/// The fixed catalogue of effects a trigger can run.
#[derive(Clone, Debug, PartialEq)]
pub enum Ability {
    // === Life ===
    /// Gain life and fire life-gain triggers.
    GainLife { amount: i64 },
    /// Gain life without firing life-gain triggers.
    GainLifeSilently { amount: i64 },
    /// Gain life if an independent roll lands under `chance`.
    ChanceToGainLife { chance: f64, amount: i64 },
    /// Gain life if an opponent's land roll comes up non-basic
    /// (configured chance).
    GainLifeOnNonbasicLand { amount: i64 },
    /// Gain life equal to nonland cards cast this turn.
    GainLifePerSpellCast,
    /// Tap one untapped producer (white, then black, then colorless) to
    /// gain life.
    SpendManaToGainLife { amount: i64 },
    /// Opponents lose life, tracked in the opponent-life-lost property.
    DrainOpponents { amount: Amount, all_opponents: bool },

    // === Cards ===
    /// Draw cards.
    DrawCards { count: u32 },
    /// Simplified scry: draw one card regardless of amount.
    Scry { amount: u32 },
    /// Reveal the top card: a land goes to hand, anything else goes to the
    /// graveyard and the source gets +1/+1.
    Explore,
    /// Draw a card and lose life equal to its mana value.
    RevealAndLoseLife,
    /// An opponent may pay a tax; the player draws when the roll lands
    /// under the pay rate (configured rate when `None`).
    PayOrDraw { pay_rate: Option<f64> },

    // === Counters ===
    /// +N/+N on the source.
    AddCounters { amount: i32 },
    /// +N/+N on every creature the player controls.
    AddCountersToAllCreatures { amount: i32 },
    /// Move the source's +1/+1 counters to the commander if it is on the
    /// battlefield, else to another random creature.
    MoveCountersOnDeath,

    // === Tokens ===
    CreateToken { token: TokenSpec },
    ChanceToCreateToken { chance: f64, token: TokenSpec },
    /// One token per point of the source's current power.
    TokensEqualToPower { token: TokenSpec },
    TokenIfLifeGainedThisTurn { token: TokenSpec },

    // === Protection ===
    /// Excise the topmost pending opponent removal spell.
    CounterNextRemoval,
    /// Excise the topmost pending opponent removal or board wipe, then
    /// sacrifice the source.
    SacrificeToCounterRemoval,

    // === Opponent spells ===
    /// Destroy the entry's target creature.
    DestroyTarget,
    /// Destroy every creature the player controls.
    DestroyAllCreatures,
}

impl Ability {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Ability::GainLife { .. } => "gain_life",
            Ability::GainLifeSilently { .. } => "gain_life_silently",
            Ability::ChanceToGainLife { .. } => "chance_to_gain_life",
            Ability::GainLifeOnNonbasicLand { .. } => "gain_life_on_nonbasic_land",
            Ability::GainLifePerSpellCast => "gain_life_per_spell_cast",
            Ability::SpendManaToGainLife { .. } => "spend_mana_to_gain_life",
            Ability::DrainOpponents { .. } => "drain_opponents",
            Ability::DrawCards { .. } => "draw_cards",
            Ability::Scry { .. } => "scry",
            Ability::Explore => "explore",
            Ability::RevealAndLoseLife => "reveal_and_lose_life",
            Ability::PayOrDraw { .. } => "pay_or_draw",
            Ability::AddCounters { .. } => "add_counters",
            Ability::AddCountersToAllCreatures { .. } => "add_counters_to_all_creatures",
            Ability::MoveCountersOnDeath => "move_counters_on_death",
            Ability::CreateToken { .. } => "create_token",
            Ability::ChanceToCreateToken { .. } => "chance_to_create_token",
            Ability::TokensEqualToPower { .. } => "tokens_equal_to_power",
            Ability::TokenIfLifeGainedThisTurn { .. } => "token_if_life_gained_this_turn",
            Ability::CounterNextRemoval => "counter_next_removal",
            Ability::SacrificeToCounterRemoval => "sacrifice_to_counter_removal",
            Ability::DestroyTarget => "destroy_target",
            Ability::DestroyAllCreatures => "destroy_all_creatures",
        }
    }

    // === Constructors for the common cases ===

    /// `GainLife` with a fixed amount.
    #[must_use]
    pub const fn gain_life(amount: i64) -> Self {
        Ability::GainLife { amount }
    }

    /// `AddCounters` with a fixed amount.
    #[must_use]
    pub const fn add_counters(amount: i32) -> Self {
        Ability::AddCounters { amount }
    }

    /// `DrawCards` with a fixed count.
    #[must_use]
    pub const fn draw(count: u32) -> Self {
        Ability::DrawCards { count }
    }

    /// Each opponent loses a fixed amount.
    #[must_use]
    pub const fn drain_each_opponent(amount: i64) -> Self {
        Ability::DrainOpponents { amount: Amount::Fixed(amount), all_opponents: true }
    }

    /// One opponent loses a fixed amount.
    #[must_use]
    pub const fn drain_one_opponent(amount: i64) -> Self {
        Ability::DrainOpponents { amount: Amount::Fixed(amount), all_opponents: false }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One (event, ability) pair on a card.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityBinding {
    pub event: TriggerEvent,
    pub ability: Ability,
}

impl AbilityBinding {
    /// Bind an ability to an event.
    #[must_use]
    pub const fn new(event: TriggerEvent, ability: Ability) -> Self {
        Self { event, ability }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_resolution() {
        assert_eq!(Amount::Fixed(2).resolve(Some(5)), 2);
        assert_eq!(Amount::Triggering.resolve(Some(5)), 5);
        assert_eq!(Amount::Triggering.resolve(None), 0);
    }

    #[test]
    fn test_names() {
        assert_eq!(Ability::gain_life(1).to_string(), "gain_life");
        assert_eq!(Ability::Explore.name(), "explore");
        assert_eq!(TriggerEvent::AnyCreatureEnters.to_string(), "any_creature_enters");
    }

    #[test]
    fn test_drain_constructors() {
        assert_eq!(
            Ability::drain_each_opponent(1),
            Ability::DrainOpponents { amount: Amount::Fixed(1), all_opponents: true }
        );
        assert_eq!(
            Ability::drain_one_opponent(2),
            Ability::DrainOpponents { amount: Amount::Fixed(2), all_opponents: false }
        );
    }
}
