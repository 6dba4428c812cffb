//! Characters and the catalog they are drawn from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The team a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Good, townsfolk.
    Townsfolk,
    /// Good, outsider.
    Outsider,
    /// Evil, minion.
    Minion,
    /// Evil, demon.
    Demon,
    /// Traveller, either alignment.
    Traveller,
}

/// A character that can sit in a bluff slot.
///
/// Two values describe the same role when their `id`s match. They are the
/// same *instance* only when their `instance` ids match too; every call to
/// [`Character::fresh_instance`] mints a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Role identifier. The sentinel's id is whatever its catalog declares.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Team, absent for the sentinel.
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(skip, default = "Uuid::new_v4")]
    instance: Uuid,
}

impl Character {
    /// Creates a character on a team.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, team: Team) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team: Some(team),
            instance: Uuid::new_v4(),
        }
    }

    /// Creates a "no character" sentinel with the empty string as its id.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::empty_with_id(String::new(), name)
    }

    /// Creates a "no character" sentinel identified by `id`.
    #[must_use]
    pub fn empty_with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team: None,
            instance: Uuid::new_v4(),
        }
    }

    /// Whether `other` plays the same role, whatever its instance.
    #[must_use]
    pub fn same_role(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Returns a copy of this character with its own instance identity.
    #[must_use]
    pub fn fresh_instance(&self) -> Self {
        Self {
            instance: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// The instance identifier.
    #[must_use]
    pub fn instance(&self) -> Uuid {
        self.instance
    }

    /// Whether `other` is this very instance, not merely the same role.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        self.instance == other.instance
    }
}

/// Every character available to the grimoire, plus the empty sentinel.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterCatalog {
    empty: Character,
    #[serde(default)]
    characters: Vec<Character>,
}

impl CharacterCatalog {
    /// Creates a catalog.
    #[must_use]
    pub fn new(empty: Character, characters: Vec<Character>) -> Self {
        Self { empty, characters }
    }

    /// The "no character" sentinel.
    #[must_use]
    pub fn empty_character(&self) -> &Character {
        &self.empty
    }

    /// All non-empty characters, in catalog order.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Whether `id` names the sentinel.
    #[must_use]
    pub fn is_empty_id(&self, id: &str) -> bool {
        id == self.empty.id
    }

    /// Looks a character up by id. The sentinel's id resolves to the sentinel.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Character> {
        if self.is_empty_id(id) {
            return Some(&self.empty);
        }
        self.characters.iter().find(|character| character.id == id)
    }
}
