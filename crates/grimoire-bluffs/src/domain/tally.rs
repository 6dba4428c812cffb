//! Tally of characters currently in play in the grimoire.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use super::collection::GroupCollection;

/// How many tokens of each character are in the grimoire.
///
/// Counts never go negative and an id disappears once its count reaches
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolesInPlay {
    counts: BTreeMap<String, u32>,
}

impl RolesInPlay {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a token for `id` entering the grimoire.
    pub fn character_added(&mut self, id: &str) {
        *self.counts.entry(id.to_owned()).or_insert(0) += 1;
    }

    /// Records a token for `id` leaving the grimoire.
    pub fn character_removed(&mut self, id: &str) {
        match self.counts.get_mut(id) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(id);
            }
            None => trace!(id, "removing character that was never tallied"),
        }
    }

    /// How many tokens of `id` are in play.
    #[must_use]
    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Every id with at least one token in play.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Ids to mark as already in play when choosing a bluff: everything in
    /// the grimoire plus whatever the active group already holds. Empty
    /// slots are skipped; with no active group only the tally counts.
    #[must_use]
    pub fn in_play_ids(&self, collection: &GroupCollection) -> BTreeSet<String> {
        let mut ids: BTreeSet<String> = self.counts.keys().cloned().collect();
        if let Ok(group) = collection.active_group() {
            let factory = collection.factory();
            ids.extend(
                group
                    .slot_set()
                    .characters()
                    .iter()
                    .filter(|character| !factory.is_empty_character(character))
                    .map(|character| character.id.clone()),
            );
        }
        ids
    }
}
