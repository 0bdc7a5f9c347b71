//! The stock 99-card deck and its commander.

use crate::core::GameResult;

use super::card::Card;
use super::registry::CardRegistry;

/// Commander of the stock deck.
pub const COMMANDER: &str = "Amalia Benavides Aguirre";

/// Basic land counts: (name, copies).
pub const BASICS: [(&str, usize); 2] = [("Plains", 7), ("Swamp", 5)];

/// Singleton nonbasic lands.
pub const NONBASIC_LANDS: [&str; 20] = [
    "Barren Moor",
    "Brightclimb Pathway",
    "Caves of Koilos",
    "Command Tower",
    "Exotic Orchard",
    "Fetid Heath",
    "Godless Shrine",
    "Isolated Chapel",
    "Marsh Flats",
    "Radiant Fountain",
    "Rogue's Passage",
    "Secluded Steppe",
    "Shattered Sanctum",
    "Shineshadow Snarl",
    "Shizo, Death's Storehouse",
    "Silent Clearing",
    "Tainted Field",
    "Urborg, Tomb of Yawgmoth",
    "Vault of Champions",
    "Vault of the Archangel",
];

/// Singleton nonland cards (commander excluded).
pub const SPELLS: [&str; 67] = [
    // Creatures
    "Aerith Gainsborough",
    "Archangel of Thune",
    "Archivist of Oghma",
    "Auriok Champion",
    "Blood Artist",
    "Charismatic Conqueror",
    "Cruel Celebrant",
    "Dark Confidant",
    "Daxos, Blessed by the Sun",
    "Deathgreeter",
    "Delney, Streetwise Lookout",
    "Elas il-Kor, Sadistic Pilgrim",
    "Elenda's Hierophant",
    "Esper Sentinel",
    "Essence Channeler",
    "Guide of Souls",
    "Heliod, Sun-Crowned",
    "Hinterland Sanctifier",
    "Kambal, Consul of Allocation",
    "Karlov of the Ghost Council",
    "Leonin Elder",
    "Lotho, Corrupt Shirriff",
    "Lunarch Veteran",
    "Lurrus of the Dream-Den",
    "Marauding Blight-Priest",
    "Mother of Runes",
    "Ocelot Pride",
    "Selfless Spirit",
    "Serra Ascendant",
    "Soul Warden",
    "Soul's Attendant",
    "Spectrum Sentinel",
    "Starscape Cleric",
    "Suture Priest",
    "Voice of the Blessed",
    "Vito, Thorn of the Dusk Rose",
    "Zulaport Cutthroat",
    // Artifacts
    "Aetherflux Reservoir",
    "Bolas's Citadel",
    "Lightning Greaves",
    "Mox Amber",
    "Orzhov Signet",
    "Sensei's Divining Top",
    "Shadowspear",
    "Skullclamp",
    "Smothering Tithe",
    "Sol Ring",
    // Enchantments and planeswalkers
    "Ajani's Welcome",
    "Authority of the Consuls",
    "Blind Obedience",
    "Case of the Uneaten Feast",
    "Cleric Class",
    "Sanguine Bond",
    "Sorin of House Markov",
    // Instants and sorceries
    "Anguished Unmaking",
    "Ascend from Avernus",
    "Damn",
    "Deadly Rollick",
    "Flare of Fortitude",
    "Flawless Maneuver",
    "Path to Exile",
    "Raise the Past",
    "Rally the Ancestors",
    "Swords to Plowshares",
    "Teferi's Protection",
    "The Meathook Massacre",
    "Toxic Deluge",
];

/// Fresh instance of the stock commander.
pub fn standard_commander(registry: &CardRegistry) -> GameResult<Card> {
    registry.get_card(COMMANDER)
}

/// Fresh instances of the 99 stock cards, unshuffled.
pub fn standard_deck(registry: &CardRegistry) -> GameResult<Vec<Card>> {
    let mut deck = Vec::with_capacity(99);
    for (name, copies) in BASICS {
        for _ in 0..copies {
            deck.push(registry.get_card(name)?);
        }
    }
    for name in NONBASIC_LANDS.iter().chain(SPELLS.iter()) {
        deck.push(registry.get_card(name)?);
    }
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_has_99_cards() {
        let registry = CardRegistry::standard();
        let deck = standard_deck(&registry).unwrap();
        assert_eq!(deck.len(), 99);

        let lands = deck.iter().filter(|c| c.is_land()).count();
        assert_eq!(lands, 32);
    }

    #[test]
    fn test_commander_not_in_deck() {
        let registry = CardRegistry::standard();
        let deck = standard_deck(&registry).unwrap();
        assert!(deck.iter().all(|c| c.name != COMMANDER));

        let commander = standard_commander(&registry).unwrap();
        assert!(commander.is_creature());
    }

    #[test]
    fn test_every_registered_card_is_used() {
        let registry = CardRegistry::standard();
        let listed = BASICS.len() + NONBASIC_LANDS.len() + SPELLS.len() + 1;
        assert_eq!(listed, registry.len());
    }
}
