//! The fixed set of three bluff slots inside one group.

use grimoire_core::character::Character;
use grimoire_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Number of slots in every set.
pub const SLOT_COUNT: usize = 3;

/// What a slot set does with a slot index outside `0..SLOT_COUNT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidIndexPolicy {
    /// Reject with `DomainError::OutOfRange`.
    #[default]
    Fail,
    /// Drop the request: reads yield nothing, writes and cursor moves
    /// leave the set untouched.
    Clamp,
}

/// Construction options for a [`SlotSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSetConfig {
    /// Handling of out-of-range slot indices.
    pub on_invalid_index: InvalidIndexPolicy,
}

/// Three character slots and a cursor pointing at the selected one.
#[derive(Debug, Clone)]
pub struct SlotSet {
    slots: [Character; SLOT_COUNT],
    cursor: usize,
    empty: Character,
    policy: InvalidIndexPolicy,
}

impl SlotSet {
    /// Creates a set whose slots each hold their own copy of `empty`.
    #[must_use]
    pub fn new(empty: &Character, config: SlotSetConfig) -> Self {
        Self {
            slots: std::array::from_fn(|_| empty.fresh_instance()),
            cursor: 0,
            empty: empty.clone(),
            policy: config.on_invalid_index,
        }
    }

    /// Checks `index` against the slot range.
    ///
    /// Returns `Ok(None)` for an out-of-range index under
    /// [`InvalidIndexPolicy::Clamp`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` for an out-of-range index under
    /// [`InvalidIndexPolicy::Fail`].
    pub fn validate_index(&self, index: usize) -> Result<Option<usize>, DomainError> {
        if index < self.slots.len() {
            return Ok(Some(index));
        }
        match self.policy {
            InvalidIndexPolicy::Fail => Err(DomainError::OutOfRange {
                what: "slot",
                index,
                len: self.slots.len(),
            }),
            InvalidIndexPolicy::Clamp => {
                trace!(index, "ignoring out-of-range slot index");
                Ok(None)
            }
        }
    }

    /// The active policy for invalid indices.
    #[must_use]
    pub fn policy(&self) -> InvalidIndexPolicy {
        self.policy
    }

    /// All slots, in order.
    #[must_use]
    pub fn characters(&self) -> &[Character; SLOT_COUNT] {
        &self.slots
    }

    /// The character under the cursor.
    #[must_use]
    pub fn character(&self) -> &Character {
        &self.slots[self.cursor]
    }

    /// The character in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `index` is out of range and the
    /// policy is [`InvalidIndexPolicy::Fail`].
    pub fn character_at(&self, index: usize) -> Result<Option<&Character>, DomainError> {
        Ok(self.validate_index(index)?.map(|index| &self.slots[index]))
    }

    /// Puts `character` in the slot under the cursor.
    pub fn set_character(&mut self, character: Character) {
        self.slots[self.cursor] = character;
    }

    /// Puts `character` in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `index` is out of range and the
    /// policy is [`InvalidIndexPolicy::Fail`].
    pub fn set_character_at(
        &mut self,
        character: Character,
        index: usize,
    ) -> Result<(), DomainError> {
        if let Some(index) = self.validate_index(index)? {
            self.slots[index] = character;
        }
        Ok(())
    }

    /// Empties slot `index` with a fresh copy of the sentinel.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `index` is out of range and the
    /// policy is [`InvalidIndexPolicy::Fail`].
    pub fn unset_character_by_index(&mut self, index: usize) -> Result<(), DomainError> {
        if let Some(index) = self.validate_index(index)? {
            self.slots[index] = self.empty.fresh_instance();
        }
        Ok(())
    }

    /// Empties whichever slot holds this exact instance of `character`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no slot holds the instance and the
    /// policy is [`InvalidIndexPolicy::Fail`].
    pub fn unset_character(&mut self, character: &Character) -> Result<(), DomainError> {
        let position = self.slots.iter().position(|slot| slot.same_instance(character));
        match position {
            Some(index) => self.unset_character_by_index(index),
            None if self.policy == InvalidIndexPolicy::Fail => Err(DomainError::NotFound(
                format!("character '{}' is not in this set", character.id),
            )),
            None => Ok(()),
        }
    }

    /// The selected slot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to slot `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` when `index` is out of range and the
    /// policy is [`InvalidIndexPolicy::Fail`]; under `Clamp` the cursor stays put.
    pub fn set_cursor(&mut self, index: usize) -> Result<(), DomainError> {
        if let Some(index) = self.validate_index(index)? {
            self.cursor = index;
        }
        Ok(())
    }

    /// The character ids in slot order; empty slots give the sentinel's id.
    #[must_use]
    pub fn serialize(&self) -> [String; SLOT_COUNT] {
        std::array::from_fn(|index| self.slots[index].id.clone())
    }
}

#[cfg(test)]
mod tests {
    use grimoire_core::character::Team;

    use super::*;

    fn empty() -> Character {
        Character::empty("No character")
    }

    fn strict() -> SlotSet {
        SlotSet::new(&empty(), SlotSetConfig::default())
    }

    fn permissive() -> SlotSet {
        SlotSet::new(
            &empty(),
            SlotSetConfig {
                on_invalid_index: InvalidIndexPolicy::Clamp,
            },
        )
    }

    #[test]
    fn test_fresh_set_serializes_three_empty_ids() {
        let set = strict();

        assert_eq!(set.serialize(), [String::new(), String::new(), String::new()]);
        assert_eq!(set.cursor(), 0);
    }

    #[test]
    fn test_fresh_slots_are_distinct_instances() {
        let set = strict();
        let [a, b, c] = set.characters();

        assert!(!a.same_instance(b));
        assert!(!b.same_instance(c));
        assert!(!a.same_instance(c));
    }

    #[test]
    fn test_set_character_at_index_serializes_in_position() {
        // Arrange
        let mut set = strict();
        let imp = Character::new("imp", "Imp", Team::Demon);

        // Act
        set.set_character_at(imp, 1).unwrap();

        // Assert
        assert_eq!(set.serialize(), [String::new(), "imp".to_owned(), String::new()]);
    }

    #[test]
    fn test_set_character_defaults_to_cursor() {
        // Arrange
        let mut set = strict();
        set.set_cursor(2).unwrap();

        // Act
        set.set_character(Character::new("baron", "Baron", Team::Minion));

        // Assert
        assert_eq!(set.character().id, "baron");
        assert_eq!(set.character_at(2).unwrap().map(|c| c.id.as_str()), Some("baron"));
    }

    #[test]
    fn test_strict_cursor_out_of_range_fails_and_keeps_cursor() {
        let mut set = strict();
        set.set_cursor(1).unwrap();

        let result = set.set_cursor(3);

        assert_eq!(
            result,
            Err(DomainError::OutOfRange {
                what: "slot",
                index: 3,
                len: SLOT_COUNT,
            })
        );
        assert_eq!(set.cursor(), 1);
    }

    #[test]
    fn test_permissive_cursor_out_of_range_is_ignored() {
        let mut set = permissive();
        set.set_cursor(2).unwrap();

        let result = set.set_cursor(usize::MAX);

        assert!(result.is_ok());
        assert_eq!(set.cursor(), 2);
    }

    #[test]
    fn test_permissive_reads_and_writes_out_of_range_are_no_ops() {
        let mut set = permissive();

        assert_eq!(set.character_at(5).unwrap(), None);
        set.set_character_at(Character::new("imp", "Imp", Team::Demon), 5).unwrap();
        set.unset_character_by_index(5).unwrap();

        assert_eq!(set.serialize(), [String::new(), String::new(), String::new()]);
    }

    #[test]
    fn test_unset_by_index_uses_independent_sentinel_copies() {
        // Arrange
        let mut set = strict();
        set.set_character_at(Character::new("imp", "Imp", Team::Demon), 0).unwrap();
        set.set_character_at(Character::new("baron", "Baron", Team::Minion), 1).unwrap();

        // Act
        set.unset_character_by_index(0).unwrap();
        set.unset_character_by_index(1).unwrap();

        // Assert
        let [first, second, _] = set.characters();
        assert!(first.same_role(&empty()));
        assert!(second.same_role(&empty()));
        assert!(!first.same_instance(second));
    }

    #[test]
    fn test_unset_character_matches_by_instance() {
        // Arrange
        let mut set = strict();
        let imp = Character::new("imp", "Imp", Team::Demon);
        let other_imp = imp.fresh_instance();
        set.set_character_at(imp.clone(), 2).unwrap();

        // Act
        let missing = set.unset_character(&other_imp);
        set.unset_character(&imp).unwrap();

        // Assert
        assert!(matches!(missing, Err(DomainError::NotFound(_))));
        assert!(set.characters()[2].same_role(&empty()));
    }

    #[test]
    fn test_permissive_unset_of_unknown_character_is_ignored() {
        let mut set = permissive();

        let result = set.unset_character(&Character::new("imp", "Imp", Team::Demon));

        assert!(result.is_ok());
    }

    #[test]
    fn test_config_deserializes_policy_names() {
        let config: SlotSetConfig =
            serde_json::from_str(r#"{ "on_invalid_index": "clamp" }"#).unwrap();
        let defaulted: SlotSetConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.on_invalid_index, InvalidIndexPolicy::Clamp);
        assert_eq!(defaulted.on_invalid_index, InvalidIndexPolicy::Fail);
    }
}
