//! A single bluff group: one slot set bound to one presentation surface.

use grimoire_core::character::Character;
use grimoire_core::error::DomainError;
use grimoire_core::ports::{Surface, SurfaceId, TitleWidget, TokenProvider};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slot_set::{SLOT_COUNT, SlotSet, SlotSetConfig};
use super::title::SettableTitle;

/// Persisted shape of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// The group's title, empty when it has no title widget.
    pub title: String,
    /// The character ids in slot order.
    pub set: [String; SLOT_COUNT],
}

/// One group of three bluffs.
///
/// `index` is bookkeeping owned by the collection and always equals the
/// group's position there; `key` is the group's identity and never changes.
#[derive(Debug)]
pub struct Group {
    key: Uuid,
    index: usize,
    slot_set: SlotSet,
    surface: Option<Box<dyn Surface>>,
    title: Option<Box<dyn TitleWidget>>,
}

impl Group {
    /// Creates an unmounted group around `slot_set`.
    #[must_use]
    pub fn new(slot_set: SlotSet) -> Self {
        Self::with_key(Uuid::new_v4(), slot_set)
    }

    /// Creates an unmounted group with a caller-chosen identity key.
    #[must_use]
    pub fn with_key(key: Uuid, slot_set: SlotSet) -> Self {
        Self {
            key,
            index: 0,
            slot_set,
            surface: None,
            title: None,
        }
    }

    /// The group's identity key.
    #[must_use]
    pub fn key(&self) -> Uuid {
        self.key
    }

    /// The group's position in its collection.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Stores `index` and, when mounted, re-stamps the surface so lookups by
    /// [`Group::selector`] keep matching.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
        if let Some(surface) = self.surface.as_mut() {
            surface.stamp_group_id(index);
        }
    }

    /// Selector that finds this group's surface by its stamped id.
    #[must_use]
    pub fn selector(&self) -> String {
        format!(".bluff-group[data-group-id=\"{}\"]", self.index)
    }

    pub(crate) fn mount(&mut self, mut surface: Box<dyn Surface>) {
        surface.stamp_group_id(self.index);
        self.surface = Some(surface);
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// The attached surface's identity.
    #[must_use]
    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.surface.as_ref().map(|surface| surface.id())
    }

    /// The group's slot set.
    #[must_use]
    pub fn slot_set(&self) -> &SlotSet {
        &self.slot_set
    }

    /// The selected slot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.slot_set.cursor()
    }

    /// Moves the slot cursor.
    ///
    /// # Errors
    ///
    /// Propagates the slot set's range policy.
    pub fn set_cursor(&mut self, slot: usize) -> Result<(), DomainError> {
        self.slot_set.set_cursor(slot)
    }

    /// The character under the cursor.
    #[must_use]
    pub fn character(&self) -> &Character {
        self.slot_set.character()
    }

    /// Puts `character` under the cursor.
    pub fn set_character(&mut self, character: Character) {
        self.slot_set.set_character(character);
    }

    /// Empties the slot under the cursor.
    ///
    /// # Errors
    ///
    /// Propagates the slot set's range policy.
    pub fn unset_character(&mut self) -> Result<(), DomainError> {
        self.slot_set.unset_character_by_index(self.slot_set.cursor())
    }

    /// Runs the mount-completion sequence: scroll into view and draw every
    /// slot's token. Returns `false` without doing anything when unmounted.
    pub fn ready(&mut self, tokens: &dyn TokenProvider) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.scroll_into_view();
        for (slot, character) in self.slot_set.characters().iter().enumerate() {
            surface.fill_slot(slot, tokens.draw_token(character));
        }
        true
    }

    /// Redraws only the slot under the cursor.
    pub fn redraw_slot(&mut self, tokens: &dyn TokenProvider) {
        let slot = self.slot_set.cursor();
        if let Some(surface) = self.surface.as_mut() {
            surface.fill_slot(slot, tokens.draw_token(self.slot_set.character()));
        }
    }

    /// Detaches the surface. The slot set is left as is.
    pub fn remove(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.detach();
        }
    }

    /// Attaches a title widget, replacing any previous one.
    pub fn set_title_widget(&mut self, title: Box<dyn TitleWidget>) {
        self.title = Some(title);
    }

    /// Whether a title widget is attached.
    #[must_use]
    pub fn has_title_widget(&self) -> bool {
        self.title.is_some()
    }

    /// The current title, empty without a title widget.
    #[must_use]
    pub fn title(&self) -> String {
        self.title
            .as_ref()
            .map(|title| title.title())
            .unwrap_or_default()
    }

    /// Earlier titles the widget offers, empty without a title widget.
    #[must_use]
    pub fn title_suggestions(&self) -> Vec<String> {
        self.title
            .as_ref()
            .map(|title| title.suggestions())
            .unwrap_or_default()
    }

    /// Sets the title through the widget, attaching a [`SettableTitle`] first
    /// when the group has none.
    pub fn rename(&mut self, title: &str) {
        match self.title.as_mut() {
            Some(widget) => widget.set_title(title),
            None => self.title = Some(Box::new(SettableTitle::new(title))),
        }
    }

    /// The group's persisted shape.
    #[must_use]
    pub fn serialize(&self) -> GroupSnapshot {
        GroupSnapshot {
            title: self.title(),
            set: self.slot_set.serialize(),
        }
    }
}

/// Builds groups around a shared "no character" sentinel.
#[derive(Debug, Clone)]
pub struct GroupFactory {
    empty: Character,
    config: SlotSetConfig,
}

impl GroupFactory {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> GroupFactoryBuilder {
        GroupFactoryBuilder::default()
    }

    /// The sentinel every new slot is copied from.
    #[must_use]
    pub fn empty_character(&self) -> &Character {
        &self.empty
    }

    /// Whether `character` is a copy of the sentinel.
    #[must_use]
    pub fn is_empty_character(&self, character: &Character) -> bool {
        character.same_role(&self.empty)
    }

    /// Slot set options applied to every new group.
    #[must_use]
    pub fn config(&self) -> SlotSetConfig {
        self.config
    }

    /// Creates a slot set with every slot empty.
    #[must_use]
    pub fn create_slot_set(&self) -> SlotSet {
        SlotSet::new(&self.empty, self.config)
    }

    /// Creates an unmounted group with every slot empty.
    #[must_use]
    pub fn create(&self) -> Group {
        Group::new(self.create_slot_set())
    }
}

/// Builder for [`GroupFactory`].
#[derive(Debug, Default)]
pub struct GroupFactoryBuilder {
    empty: Option<Character>,
    config: SlotSetConfig,
}

impl GroupFactoryBuilder {
    /// Sets the "no character" sentinel. Required.
    #[must_use]
    pub fn empty_character(mut self, empty: Character) -> Self {
        self.empty = Some(empty);
        self
    }

    /// Sets the slot set options.
    #[must_use]
    pub fn config(mut self, config: SlotSetConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the factory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if no sentinel was supplied.
    pub fn build(self) -> Result<GroupFactory, DomainError> {
        let empty = self.empty.ok_or_else(|| {
            DomainError::Configuration("the \"no character\" character must be set".into())
        })?;
        Ok(GroupFactory {
            empty,
            config: self.config,
        })
    }
}
