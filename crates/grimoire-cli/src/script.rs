//! JSON-lines scripts of user actions and their replay.
//!
//! One JSON object per line, tagged by `op`. Blank lines and lines starting
//! with `#` are skipped:
//!
//! ```text
//! {"op": "add", "title": "Night 1"}
//! {"op": "visible", "group": 0}
//! {"op": "select", "slot": 1}
//! {"op": "assign", "character": "imp"}
//! ```

use grimoire_bluffs::application::command_handlers::handle_command;
use grimoire_bluffs::application::query_handlers::{
    CollectionView, collection_view, in_play_ids, title_suggestions,
};
use grimoire_bluffs::domain::collection::{GroupCollection, Presentation};
use grimoire_bluffs::domain::commands::{
    AddGroup, AssignCharacter, BluffCommand, RemoveGroup, RenameGroup, ReportVisibility,
    SelectSlot, UnsetSlot,
};
use grimoire_bluffs::domain::events::BluffEvent;
use grimoire_bluffs::domain::group::{Group, GroupFactory};
use grimoire_bluffs::domain::tally::RolesInPlay;
use grimoire_core::character::CharacterCatalog;
use grimoire_core::clock::SystemClock;
use grimoire_core::event::DomainEvent;
use grimoire_core::ports::{FULLY_VISIBLE, VisibilitySignal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::headless::{HeadlessRenderer, HeadlessVisibility, LogDisplay, NameTokens};

fn full_ratio() -> f64 {
    FULLY_VISIBLE
}

/// One user action or viewport report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Append a group.
    Add {
        /// Optional initial title.
        #[serde(default)]
        title: Option<String>,
    },
    /// Remove the group at `index`.
    Remove {
        /// Group position.
        index: usize,
    },
    /// Report the group at `group` as visible.
    Visible {
        /// Group position.
        group: usize,
        /// Intersection ratio; defaults to fully visible.
        #[serde(default = "full_ratio")]
        ratio: f64,
    },
    /// Select a slot in the active group.
    Select {
        /// Slot index.
        slot: usize,
    },
    /// Assign a catalog character to the active group's selected slot.
    Assign {
        /// Catalog id.
        character: String,
    },
    /// Empty the active group's selected slot.
    Unset,
    /// Retitle a group.
    Rename {
        /// Group position.
        index: usize,
        /// New title.
        title: String,
    },
    /// A token for `character` entered the grimoire.
    TokenAdded {
        /// Catalog id.
        character: String,
    },
    /// A token for `character` left the grimoire.
    TokenRemoved {
        /// Catalog id.
        character: String,
    },
}

/// Parses a script into numbered steps.
///
/// # Errors
///
/// Returns `AppError::Script` naming the first line that is not a valid step.
pub fn parse_script(input: &str) -> Result<Vec<(usize, ScriptStep)>, AppError> {
    input
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .map(|(line, text)| {
            serde_json::from_str(text)
                .map(|step| (line, step))
                .map_err(|e| AppError::Script {
                    line,
                    message: e.to_string(),
                })
        })
        .collect()
}

/// What a replay leaves behind.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The persisted groups and the active index.
    #[serde(flatten)]
    pub view: CollectionView,
    /// Ids to mark as in play in the bluff chooser.
    pub in_play: Vec<String>,
}

/// A collection on headless presentation, fed one step at a time.
#[derive(Debug)]
pub struct Replay {
    collection: GroupCollection,
    catalog: CharacterCatalog,
    tally: RolesInPlay,
}

impl Replay {
    /// Wires a fresh collection around `catalog`'s empty sentinel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if the group factory cannot be built.
    pub fn new(config: &Config, catalog: CharacterCatalog) -> Result<Self, AppError> {
        let factory = GroupFactory::builder()
            .empty_character(catalog.empty_character().clone())
            .config(config.slot_set)
            .build()?;
        let mut collection = GroupCollection::new(
            factory,
            Presentation {
                renderer: Box::new(HeadlessRenderer::default()),
                tokens: Box::new(NameTokens),
                visibility: Box::new(HeadlessVisibility::default()),
                display: Some(Box::new(LogDisplay)),
            },
            Box::new(SystemClock),
        );
        collection.subscribe(Box::new(|event: &BluffEvent| {
            debug!(
                event_type = event.event_type(),
                sequence_number = event.metadata.sequence_number,
                payload = %event.to_payload(),
                "bluff event"
            );
        }));
        Ok(Self {
            collection,
            catalog,
            tally: RolesInPlay::new(),
        })
    }

    /// The collection being driven.
    #[must_use]
    pub fn collection(&self) -> &GroupCollection {
        &self.collection
    }

    /// Applies one step.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` for a visibility report about a missing
    /// group, or `AppError::Step` when the domain rejects the step.
    pub fn step(&mut self, line: usize, step: &ScriptStep) -> Result<(), AppError> {
        let correlation_id = Uuid::new_v4();
        let command = match step {
            ScriptStep::Add { title } => BluffCommand::AddGroup(AddGroup {
                correlation_id,
                title: title.clone(),
            }),
            ScriptStep::Remove { index } => BluffCommand::RemoveGroup(RemoveGroup {
                correlation_id,
                index: *index,
            }),
            ScriptStep::Visible { group, ratio } => {
                let surface = self
                    .collection
                    .group(*group)
                    .and_then(Group::surface_id)
                    .ok_or_else(|| AppError::Script {
                        line,
                        message: format!("no group at index {group}"),
                    })?;
                BluffCommand::ReportVisibility(ReportVisibility {
                    correlation_id,
                    signal: VisibilitySignal {
                        surface,
                        intersection_ratio: *ratio,
                    },
                })
            }
            ScriptStep::Select { slot } => BluffCommand::SelectSlot(SelectSlot {
                correlation_id,
                slot: *slot,
            }),
            ScriptStep::Assign { character } => BluffCommand::AssignCharacter(AssignCharacter {
                correlation_id,
                character_id: character.clone(),
            }),
            ScriptStep::Unset => BluffCommand::UnsetSlot(UnsetSlot { correlation_id }),
            ScriptStep::Rename { index, title } => BluffCommand::RenameGroup(RenameGroup {
                correlation_id,
                index: *index,
                title: title.clone(),
            }),
            ScriptStep::TokenAdded { character } => {
                self.tally.character_added(character);
                return Ok(());
            }
            ScriptStep::TokenRemoved { character } => {
                self.tally.character_removed(character);
                return Ok(());
            }
        };
        handle_command(&command, &mut self.collection, &self.catalog)
            .map_err(|source| AppError::Step { line, source })?;
        if let ScriptStep::Rename { index, .. } = step {
            let suggestions = title_suggestions(&self.collection, *index)
                .map_err(|source| AppError::Step { line, source })?;
            debug!(index, ?suggestions, "title suggestions");
        }
        Ok(())
    }

    /// The current persisted shape and in-play ids.
    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            view: collection_view(&self.collection),
            in_play: in_play_ids(&self.tally, &self.collection),
        }
    }
}

/// Parses and replays `script`, stopping at the first failing step.
///
/// # Errors
///
/// Returns the first parse or step error.
pub fn replay(
    config: &Config,
    catalog: CharacterCatalog,
    script: &str,
) -> Result<Report, AppError> {
    let steps = parse_script(script)?;
    let mut replay = Replay::new(config, catalog)?;
    for (line, step) in &steps {
        replay.step(*line, step)?;
    }
    info!(steps = steps.len(), groups = replay.collection().len(), "replay finished");
    Ok(replay.report())
}
