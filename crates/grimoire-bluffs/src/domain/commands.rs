//! Commands for the bluff groups context.

use grimoire_core::command::Command;
use grimoire_core::ports::VisibilitySignal;
use uuid::Uuid;

/// Command to append a new, empty group.
#[derive(Debug, Clone)]
pub struct AddGroup {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Initial title, if any.
    pub title: Option<String>,
}

/// Command to remove the group at a position.
#[derive(Debug, Clone)]
pub struct RemoveGroup {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The group's position.
    pub index: usize,
}

/// Command to select a slot in the active group.
#[derive(Debug, Clone)]
pub struct SelectSlot {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The slot to select.
    pub slot: usize,
}

/// Command to put a catalog character in the active group's selected slot.
#[derive(Debug, Clone)]
pub struct AssignCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Catalog id of the character; the empty id clears the slot.
    pub character_id: String,
}

/// Command to empty the active group's selected slot.
#[derive(Debug, Clone)]
pub struct UnsetSlot {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command to retitle a group.
#[derive(Debug, Clone)]
pub struct RenameGroup {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The group's position.
    pub index: usize,
    /// The new title.
    pub title: String,
}

/// A visibility report delivered by the viewport observer.
#[derive(Debug, Clone)]
pub struct ReportVisibility {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The report.
    pub signal: VisibilitySignal,
}

/// Every command the bluff groups context accepts.
#[derive(Debug, Clone)]
pub enum BluffCommand {
    /// See [`AddGroup`].
    AddGroup(AddGroup),
    /// See [`RemoveGroup`].
    RemoveGroup(RemoveGroup),
    /// See [`SelectSlot`].
    SelectSlot(SelectSlot),
    /// See [`AssignCharacter`].
    AssignCharacter(AssignCharacter),
    /// See [`UnsetSlot`].
    UnsetSlot(UnsetSlot),
    /// See [`RenameGroup`].
    RenameGroup(RenameGroup),
    /// See [`ReportVisibility`].
    ReportVisibility(ReportVisibility),
}

impl Command for BluffCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::AddGroup(_) => "bluffs.add_group",
            Self::RemoveGroup(_) => "bluffs.remove_group",
            Self::SelectSlot(_) => "bluffs.select_slot",
            Self::AssignCharacter(_) => "bluffs.assign_character",
            Self::UnsetSlot(_) => "bluffs.unset_slot",
            Self::RenameGroup(_) => "bluffs.rename_group",
            Self::ReportVisibility(_) => "bluffs.report_visibility",
        }
    }

    fn correlation_id(&self) -> Uuid {
        match self {
            Self::AddGroup(c) => c.correlation_id,
            Self::RemoveGroup(c) => c.correlation_id,
            Self::SelectSlot(c) => c.correlation_id,
            Self::AssignCharacter(c) => c.correlation_id,
            Self::UnsetSlot(c) => c.correlation_id,
            Self::RenameGroup(c) => c.correlation_id,
            Self::ReportVisibility(c) => c.correlation_id,
        }
    }
}
