//! Query handlers for the bluff groups context.
//!
//! Read-only views over a live collection, shaped for persistence and for
//! the host's dialogs.

use grimoire_core::error::DomainError;
use serde::Serialize;

use crate::domain::collection::GroupCollection;
use crate::domain::group::{Group, GroupSnapshot};
use crate::domain::tally::RolesInPlay;

/// Read-only view of the whole collection.
#[derive(Debug, Serialize)]
pub struct CollectionView {
    /// Every group's persisted shape, in order.
    pub groups: Vec<GroupSnapshot>,
    /// The active group's index, if any.
    pub active_index: Option<usize>,
}

/// Returns the persisted groups together with the active index.
#[must_use]
pub fn collection_view(collection: &GroupCollection) -> CollectionView {
    CollectionView {
        groups: collection.serialize(),
        active_index: collection.active_index(),
    }
}

/// Returns the character ids of the active group's slots, empty slots
/// included, for showing all of its bluffs at once.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no group is active.
pub fn active_set_ids(collection: &GroupCollection) -> Result<Vec<String>, DomainError> {
    Ok(collection.active_group()?.serialize().set.to_vec())
}

/// Returns the titles to offer while renaming the group at `index`.
///
/// # Errors
///
/// Returns `DomainError::OutOfRange` if there is no group at `index`.
pub fn title_suggestions(
    collection: &GroupCollection,
    index: usize,
) -> Result<Vec<String>, DomainError> {
    collection
        .group(index)
        .map(Group::title_suggestions)
        .ok_or(DomainError::OutOfRange {
            what: "group",
            index,
            len: collection.len(),
        })
}

/// Returns the ids to mark as in play in the bluff chooser, sorted.
#[must_use]
pub fn in_play_ids(tally: &RolesInPlay, collection: &GroupCollection) -> Vec<String> {
    tally.in_play_ids(collection).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use grimoire_core::error::DomainError;
    use grimoire_test_support::{
        FixedClock, RecordingRenderer, RecordingVisibility, StubTokenProvider, empty_character,
        imp,
    };

    use crate::application::query_handlers::{
        active_set_ids, collection_view, in_play_ids, title_suggestions,
    };
    use crate::domain::collection::{GroupCollection, Presentation};
    use crate::domain::group::GroupFactory;
    use crate::domain::tally::RolesInPlay;

    fn collection() -> GroupCollection {
        GroupCollection::new(
            GroupFactory::builder()
                .empty_character(empty_character())
                .build()
                .unwrap(),
            Presentation {
                renderer: Box::new(RecordingRenderer::new()),
                tokens: Box::new(StubTokenProvider),
                visibility: Box::new(RecordingVisibility::new()),
                display: None,
            },
            Box::new(FixedClock::default()),
        )
    }

    #[test]
    fn test_collection_view_serializes_groups_and_active_index() {
        // Arrange
        let mut collection = collection();
        collection.add_group();
        collection.add_group();
        collection.set_active_index(1).unwrap();
        collection.assign_character(imp()).unwrap();
        collection.rename_group(1, "Evil").unwrap();

        // Act
        let json = serde_json::to_value(collection_view(&collection)).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "groups": [
                    { "title": "", "set": ["", "", ""] },
                    { "title": "Evil", "set": ["imp", "", ""] }
                ],
                "active_index": 1
            })
        );
    }

    #[test]
    fn test_active_set_ids_requires_active_group() {
        let mut collection = collection();
        collection.add_group();

        assert!(matches!(
            active_set_ids(&collection),
            Err(DomainError::NotFound(_))
        ));

        collection.set_active_index(0).unwrap();
        assert_eq!(active_set_ids(&collection).unwrap(), vec!["", "", ""]);
    }

    #[test]
    fn test_in_play_ids_is_sorted() {
        let mut collection = collection();
        collection.add_group();
        collection.set_active_index(0).unwrap();
        collection.assign_character(imp()).unwrap();
        let mut tally = RolesInPlay::new();
        tally.character_added("washerwoman");
        tally.character_added("baron");

        assert_eq!(
            in_play_ids(&tally, &collection),
            vec!["baron", "imp", "washerwoman"]
        );
    }

    #[test]
    fn test_title_suggestions_follow_renames() {
        // Arrange
        let mut collection = collection();
        collection.add_group();

        // Act
        let before = title_suggestions(&collection, 0).unwrap();
        collection.rename_group(0, "Night 1").unwrap();
        collection.rename_group(0, "Night 2").unwrap();
        let after = title_suggestions(&collection, 0).unwrap();

        // Assert
        assert!(before.is_empty());
        assert_eq!(after, vec!["Night 1", "Night 2"]);
        assert!(matches!(
            title_suggestions(&collection, 4),
            Err(DomainError::OutOfRange { what: "group", index: 4, len: 1 })
        ));
    }
}
