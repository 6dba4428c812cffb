//! Notifications published by the bluff groups context.

use grimoire_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type name for [`GroupReady`].
pub const GROUP_READY_EVENT_TYPE: &str = "bluffs.group_ready";
/// Event type name for [`GroupRemoved`].
pub const GROUP_REMOVED_EVENT_TYPE: &str = "bluffs.group_removed";
/// Event type name for [`ActiveGroupChanged`].
pub const ACTIVE_GROUP_CHANGED_EVENT_TYPE: &str = "bluffs.active_group_changed";
/// Event type name for [`SlotSelected`].
pub const SLOT_SELECTED_EVENT_TYPE: &str = "bluffs.slot_selected";
/// Event type name for [`CharacterAssigned`].
pub const CHARACTER_ASSIGNED_EVENT_TYPE: &str = "bluffs.character_assigned";
/// Event type name for [`CharacterUnset`].
pub const CHARACTER_UNSET_EVENT_TYPE: &str = "bluffs.character_unset";
/// Event type name for [`GroupRenamed`].
pub const GROUP_RENAMED_EVENT_TYPE: &str = "bluffs.group_renamed";

/// Emitted once a group has been mounted and its slots drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReady {
    /// The group's identity key.
    pub group_key: Uuid,
    /// The group's position at the time it became ready.
    pub index: usize,
}

/// Emitted after a group has been taken out of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRemoved {
    /// The removed group's identity key.
    pub group_key: Uuid,
    /// The position the group held before removal.
    pub index: usize,
}

/// Emitted when the active group pointer moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveGroupChanged {
    /// The new active index.
    pub index: usize,
}

/// Emitted when the cursor of the active group moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelected {
    /// The active group's index.
    pub index: usize,
    /// The selected slot.
    pub slot: usize,
    /// Id of the character now under the cursor.
    pub character_id: String,
}

/// Emitted when a character is put in the active group's selected slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAssigned {
    /// The active group's index.
    pub index: usize,
    /// The slot written.
    pub slot: usize,
    /// Id of the assigned character.
    pub character_id: String,
}

/// Emitted when the active group's selected slot is emptied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterUnset {
    /// The active group's index.
    pub index: usize,
    /// The slot emptied.
    pub slot: usize,
}

/// Emitted when a group's title changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRenamed {
    /// The group's index.
    pub index: usize,
    /// The new title.
    pub title: String,
}

/// Event payload variants for the bluff groups context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BluffEventKind {
    /// A group is mounted and ready.
    GroupReady(GroupReady),
    /// A group has been removed.
    GroupRemoved(GroupRemoved),
    /// The active group changed.
    ActiveGroupChanged(ActiveGroupChanged),
    /// The active group's cursor moved.
    SlotSelected(SlotSelected),
    /// A character was assigned to the active group.
    CharacterAssigned(CharacterAssigned),
    /// A slot in the active group was emptied.
    CharacterUnset(CharacterUnset),
    /// A group was renamed.
    GroupRenamed(GroupRenamed),
}

impl BluffEventKind {
    /// The event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GroupReady(_) => GROUP_READY_EVENT_TYPE,
            Self::GroupRemoved(_) => GROUP_REMOVED_EVENT_TYPE,
            Self::ActiveGroupChanged(_) => ACTIVE_GROUP_CHANGED_EVENT_TYPE,
            Self::SlotSelected(_) => SLOT_SELECTED_EVENT_TYPE,
            Self::CharacterAssigned(_) => CHARACTER_ASSIGNED_EVENT_TYPE,
            Self::CharacterUnset(_) => CHARACTER_UNSET_EVENT_TYPE,
            Self::GroupRenamed(_) => GROUP_RENAMED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the bluff groups context.
#[derive(Debug, Clone, PartialEq)]
pub struct BluffEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: BluffEventKind,
}

impl DomainEvent for BluffEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("BluffEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
