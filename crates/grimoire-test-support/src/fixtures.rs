//! Character fixtures.

use grimoire_core::character::{Character, CharacterCatalog, Team};

/// The "no character" sentinel used across tests.
#[must_use]
pub fn empty_character() -> Character {
    Character::empty("No character")
}

/// A demon.
#[must_use]
pub fn imp() -> Character {
    Character::new("imp", "Imp", Team::Demon)
}

/// A minion.
#[must_use]
pub fn baron() -> Character {
    Character::new("baron", "Baron", Team::Minion)
}

/// A townsfolk.
#[must_use]
pub fn washerwoman() -> Character {
    Character::new("washerwoman", "Washerwoman", Team::Townsfolk)
}

/// A catalog holding the sentinel, the imp, the baron and the washerwoman.
#[must_use]
pub fn sample_catalog() -> CharacterCatalog {
    CharacterCatalog::new(empty_character(), vec![imp(), baron(), washerwoman()])
}
