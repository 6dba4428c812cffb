//! Command handlers for the bluff groups context.
//!
//! Each handler stamps the command's correlation id on the collection, then
//! performs the user action end to end, including any redraw it needs.

use grimoire_core::character::CharacterCatalog;
use grimoire_core::command::Command;
use grimoire_core::error::DomainError;
use tracing::instrument;

use crate::domain::collection::GroupCollection;
use crate::domain::commands::{
    AddGroup, AssignCharacter, BluffCommand, RemoveGroup, RenameGroup, ReportVisibility,
    SelectSlot, UnsetSlot,
};

/// Dispatches any [`BluffCommand`] to its handler.
///
/// # Errors
///
/// Returns whatever the specific handler returns.
#[instrument(
    skip_all,
    fields(command_type = command.command_type(), correlation_id = %command.correlation_id())
)]
pub fn handle_command(
    command: &BluffCommand,
    collection: &mut GroupCollection,
    catalog: &CharacterCatalog,
) -> Result<(), DomainError> {
    match command {
        BluffCommand::AddGroup(c) => handle_add_group(c, collection).map(|_| ()),
        BluffCommand::RemoveGroup(c) => {
            handle_remove_group(c, collection);
            Ok(())
        }
        BluffCommand::SelectSlot(c) => handle_select_slot(c, collection),
        BluffCommand::AssignCharacter(c) => handle_assign_character(c, collection, catalog),
        BluffCommand::UnsetSlot(c) => handle_unset_slot(c, collection),
        BluffCommand::RenameGroup(c) => handle_rename_group(c, collection),
        BluffCommand::ReportVisibility(c) => handle_report_visibility(c, collection),
    }
}

/// Handles the `AddGroup` command: appends an empty group, titling it when a
/// title is given. Returns the new group's index.
///
/// # Errors
///
/// Propagates [`GroupCollection::rename_group`].
pub fn handle_add_group(
    command: &AddGroup,
    collection: &mut GroupCollection,
) -> Result<usize, DomainError> {
    collection.correlate(command.correlation_id);
    let index = collection.add_group();
    if let Some(title) = command.title.as_deref() {
        collection.rename_group(index, title)?;
    }
    Ok(index)
}

/// Handles the `RemoveGroup` command. A missing index is ignored; returns
/// whether a group was removed.
pub fn handle_remove_group(command: &RemoveGroup, collection: &mut GroupCollection) -> bool {
    collection.correlate(command.correlation_id);
    collection.remove_by_index(command.index)
}

/// Handles the `SelectSlot` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no group is active, or
/// `DomainError::OutOfRange` for a bad slot under the strict policy.
pub fn handle_select_slot(
    command: &SelectSlot,
    collection: &mut GroupCollection,
) -> Result<(), DomainError> {
    collection.correlate(command.correlation_id);
    collection.set_slot_cursor(command.slot)
}

/// Handles the `AssignCharacter` command: looks the character up, writes it
/// to the active group's selected slot and redraws that slot. The sentinel's
/// id empties the slot instead.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an id missing from the catalog, or
/// `DomainError::NotFound` when no group is active.
pub fn handle_assign_character(
    command: &AssignCharacter,
    collection: &mut GroupCollection,
    catalog: &CharacterCatalog,
) -> Result<(), DomainError> {
    collection.correlate(command.correlation_id);
    let character = catalog.get(&command.character_id).ok_or_else(|| {
        DomainError::Validation(format!("unknown character '{}'", command.character_id))
    })?;
    if catalog.is_empty_id(&character.id) {
        return collection.unset_active_slot();
    }
    collection.assign_character(character.clone())?;
    collection.redraw_active()
}

/// Handles the `UnsetSlot` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no group is active.
pub fn handle_unset_slot(
    command: &UnsetSlot,
    collection: &mut GroupCollection,
) -> Result<(), DomainError> {
    collection.correlate(command.correlation_id);
    collection.unset_active_slot()
}

/// Handles the `RenameGroup` command.
///
/// # Errors
///
/// Returns `DomainError::OutOfRange` if there is no group at the index.
pub fn handle_rename_group(
    command: &RenameGroup,
    collection: &mut GroupCollection,
) -> Result<(), DomainError> {
    collection.correlate(command.correlation_id);
    collection.rename_group(command.index, &command.title)
}

/// Handles a visibility report from the viewport.
///
/// # Errors
///
/// Propagates [`GroupCollection::on_visibility`].
pub fn handle_report_visibility(
    command: &ReportVisibility,
    collection: &mut GroupCollection,
) -> Result<(), DomainError> {
    collection.correlate(command.correlation_id);
    collection.on_visibility(command.signal)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use grimoire_core::character::{Character, CharacterCatalog};
    use grimoire_core::error::DomainError;
    use grimoire_core::ports::VisibilitySignal;
    use grimoire_test_support::{
        FixedClock, RecordingDisplay, RecordingRenderer, RecordingVisibility, StubTokenProvider,
        SurfaceCall, baron, empty_character, imp, sample_catalog,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_add_group, handle_assign_character, handle_command, handle_remove_group,
    };
    use crate::domain::collection::{GroupCollection, Presentation};
    use crate::domain::commands::{
        AddGroup, AssignCharacter, BluffCommand, RemoveGroup, ReportVisibility, SelectSlot,
    };
    use crate::domain::events::BluffEvent;
    use crate::domain::group::GroupFactory;
    use crate::domain::tally::RolesInPlay;

    fn collection(renderer: &RecordingRenderer, display: &RecordingDisplay) -> GroupCollection {
        collection_with(empty_character(), renderer, display)
    }

    fn collection_with(
        empty: Character,
        renderer: &RecordingRenderer,
        display: &RecordingDisplay,
    ) -> GroupCollection {
        GroupCollection::new(
            GroupFactory::builder()
                .empty_character(empty)
                .build()
                .unwrap(),
            Presentation {
                renderer: Box::new(renderer.clone()),
                tokens: Box::new(StubTokenProvider),
                visibility: Box::new(RecordingVisibility::new()),
                display: Some(Box::new(display.clone())),
            },
            Box::new(FixedClock::default()),
        )
    }

    fn activate_first(collection: &mut GroupCollection) {
        let surface = collection.group(0).unwrap().surface_id().unwrap();
        handle_command(
            &BluffCommand::ReportVisibility(ReportVisibility {
                correlation_id: Uuid::new_v4(),
                signal: VisibilitySignal {
                    surface,
                    intersection_ratio: 1.0,
                },
            }),
            collection,
            &sample_catalog(),
        )
        .unwrap();
    }

    #[test]
    fn test_handle_add_group_with_title() {
        // Arrange
        let renderer = RecordingRenderer::new();
        let mut collection = collection(&renderer, &RecordingDisplay::new());
        let command = AddGroup {
            correlation_id: Uuid::new_v4(),
            title: Some("Night 1".to_owned()),
        };

        // Act
        let index = handle_add_group(&command, &mut collection).unwrap();

        // Assert
        assert_eq!(index, 0);
        assert_eq!(collection.serialize()[0].title, "Night 1");
    }

    #[test]
    fn test_handle_remove_group_ignores_missing_index() {
        let mut collection = collection(&RecordingRenderer::new(), &RecordingDisplay::new());
        collection.add_group();

        let removed = handle_remove_group(
            &RemoveGroup {
                correlation_id: Uuid::new_v4(),
                index: 3,
            },
            &mut collection,
        );

        assert!(!removed);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_handle_assign_character_writes_and_redraws() {
        // Arrange
        let renderer = RecordingRenderer::new();
        let display = RecordingDisplay::new();
        let mut collection = collection(&renderer, &display);
        collection.add_group();
        activate_first(&mut collection);
        let catalog = sample_catalog();
        handle_command(
            &BluffCommand::SelectSlot(SelectSlot {
                correlation_id: Uuid::new_v4(),
                slot: 1,
            }),
            &mut collection,
            &catalog,
        )
        .unwrap();

        // Act
        handle_assign_character(
            &AssignCharacter {
                correlation_id: Uuid::new_v4(),
                character_id: "imp".to_owned(),
            },
            &mut collection,
            &catalog,
        )
        .unwrap();

        // Assert
        assert_eq!(collection.serialize()[0].set[1], "imp");
        let surface = collection.group(0).unwrap().surface_id().unwrap();
        assert_eq!(
            renderer.calls(surface).last(),
            Some(&SurfaceCall::FillSlot(1, "token:imp".to_owned()))
        );
        assert_eq!(display.shown(), vec!["", "imp"]);
    }

    #[test]
    fn test_handle_assign_character_rejects_unknown_id() {
        let mut collection = collection(&RecordingRenderer::new(), &RecordingDisplay::new());
        collection.add_group();
        activate_first(&mut collection);

        let result = handle_assign_character(
            &AssignCharacter {
                correlation_id: Uuid::new_v4(),
                character_id: "legion".to_owned(),
            },
            &mut collection,
            &sample_catalog(),
        );

        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("legion")));
    }

    #[test]
    fn test_handle_assign_empty_id_empties_slot() {
        // Arrange
        let mut collection = collection(&RecordingRenderer::new(), &RecordingDisplay::new());
        collection.add_group();
        activate_first(&mut collection);
        let catalog = sample_catalog();
        let assign = |id: &str| AssignCharacter {
            correlation_id: Uuid::new_v4(),
            character_id: id.to_owned(),
        };
        handle_assign_character(&assign("baron"), &mut collection, &catalog).unwrap();

        // Act
        handle_assign_character(&assign(""), &mut collection, &catalog).unwrap();

        // Assert
        assert_eq!(collection.serialize()[0].set[0], "");
    }

    #[test]
    fn test_handle_assign_sentinel_id_gives_each_slot_its_own_empty() {
        // Arrange
        let empty = Character::empty_with_id("none", "No character");
        let catalog = CharacterCatalog::new(empty.clone(), vec![imp(), baron()]);
        let mut collection = collection_with(
            empty.clone(),
            &RecordingRenderer::new(),
            &RecordingDisplay::new(),
        );
        collection.add_group();
        activate_first(&mut collection);
        let assign = |id: &str| AssignCharacter {
            correlation_id: Uuid::new_v4(),
            character_id: id.to_owned(),
        };
        for slot in [1, 2] {
            collection.set_slot_cursor(slot).unwrap();
            handle_assign_character(&assign("imp"), &mut collection, &catalog).unwrap();
        }

        // Act
        for slot in [1, 2] {
            collection.set_slot_cursor(slot).unwrap();
            handle_assign_character(&assign("none"), &mut collection, &catalog).unwrap();
        }

        // Assert
        let [_, second, third] = collection.active_group().unwrap().slot_set().characters();
        assert!(second.same_role(&empty));
        assert!(third.same_role(&empty));
        assert!(!second.same_instance(third));
        assert!(!second.same_instance(catalog.empty_character()));
        assert!(RolesInPlay::new().in_play_ids(&collection).is_empty());
    }

    #[test]
    fn test_handle_command_without_active_group_fails() {
        let mut collection = collection(&RecordingRenderer::new(), &RecordingDisplay::new());
        collection.add_group();

        let result = handle_command(
            &BluffCommand::SelectSlot(SelectSlot {
                correlation_id: Uuid::new_v4(),
                slot: 0,
            }),
            &mut collection,
            &sample_catalog(),
        );

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_handle_command_stamps_correlation_on_events() {
        // Arrange
        let mut collection = collection(&RecordingRenderer::new(), &RecordingDisplay::new());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        collection.subscribe(Box::new(move |event: &BluffEvent| {
            sink.borrow_mut().push(event.metadata.correlation_id);
        }));
        let correlation_id = Uuid::new_v4();

        // Act
        handle_command(
            &BluffCommand::AddGroup(AddGroup {
                correlation_id,
                title: Some("Bluffs".to_owned()),
            }),
            &mut collection,
            &sample_catalog(),
        )
        .unwrap();

        // Assert
        assert_eq!(*events.borrow(), vec![correlation_id, correlation_id]);
    }
}
