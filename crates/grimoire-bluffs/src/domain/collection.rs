//! The ordered collection of bluff groups and active-group arbitration.
//!
//! Two invariants hold after every public call: each group's `index()`
//! equals its position, and `active_index()` is only moved by
//! [`GroupCollection::set_active_index`] or a full-visibility report.

use std::fmt;

use grimoire_core::bus::{NotificationBus, SubscriptionId};
use grimoire_core::character::Character;
use grimoire_core::clock::Clock;
use grimoire_core::error::DomainError;
use grimoire_core::event::EventMetadata;
use grimoire_core::ports::{
    CharacterDisplay, Renderer, SurfaceId, TokenProvider, VisibilitySignal, VisibilitySource,
};
use tracing::{debug, trace};
use uuid::Uuid;

use super::events::{
    ActiveGroupChanged, BluffEvent, BluffEventKind, CharacterAssigned, CharacterUnset,
    GroupReady, GroupRemoved, GroupRenamed, SlotSelected,
};
use super::group::{Group, GroupFactory, GroupSnapshot};

type ReadyHook = Box<dyn FnMut(&mut Group)>;

/// The host-side collaborators a collection draws through.
#[derive(Debug)]
pub struct Presentation {
    /// Mounts a surface per group.
    pub renderer: Box<dyn Renderer>,
    /// Draws slot tokens.
    pub tokens: Box<dyn TokenProvider>,
    /// Reports which surfaces are in view.
    pub visibility: Box<dyn VisibilitySource>,
    /// Shows the active group's selected character, if present.
    pub display: Option<Box<dyn CharacterDisplay>>,
}

/// All bluff groups, in display order.
pub struct GroupCollection {
    id: Uuid,
    groups: Vec<Group>,
    active_index: Option<usize>,
    factory: GroupFactory,
    presentation: Presentation,
    clock: Box<dyn Clock>,
    ready_hooks: Vec<ReadyHook>,
    bus: NotificationBus<BluffEvent>,
    sequence_number: i64,
    correlation_id: Uuid,
}

impl GroupCollection {
    /// Creates an empty collection with no active group.
    #[must_use]
    pub fn new(factory: GroupFactory, presentation: Presentation, clock: Box<dyn Clock>) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            groups: Vec::new(),
            active_index: None,
            factory,
            presentation,
            clock,
            ready_hooks: Vec::new(),
            bus: NotificationBus::new(),
            sequence_number: 0,
            correlation_id: id,
        }
    }

    /// The collection's identity, used as the source of its events.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The factory new groups are built with.
    #[must_use]
    pub fn factory(&self) -> &GroupFactory {
        &self.factory
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the collection holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups, in order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The group at `index`.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Whether the group with `key` is a member.
    #[must_use]
    pub fn has(&self, key: Uuid) -> bool {
        self.index_of(key).is_some()
    }

    /// Position of the group with `key`.
    #[must_use]
    pub fn index_of(&self, key: Uuid) -> Option<usize> {
        self.groups.iter().position(|group| group.key() == key)
    }

    /// Registers a subscriber for every event this collection publishes.
    pub fn subscribe(&mut self, subscriber: Box<dyn FnMut(&BluffEvent)>) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    /// Removes a subscriber.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Registers a hook run with each group right after it is drawn and
    /// before `GroupReady` is published, e.g. to attach a title widget.
    pub fn on_group_ready(&mut self, hook: ReadyHook) {
        self.ready_hooks.push(hook);
    }

    /// Sets the correlation id stamped on events published from now on.
    pub fn correlate(&mut self, correlation_id: Uuid) {
        self.correlation_id = correlation_id;
    }

    /// Builds an empty group through the factory and adds it. Returns its index.
    pub fn add_group(&mut self) -> usize {
        let group = self.factory.create();
        self.add(group);
        self.groups.len() - 1
    }

    /// Appends `group`, mounts it and runs its ready sequence.
    ///
    /// Returns `false` and drops `group` if a group with the same key is
    /// already a member.
    pub fn add(&mut self, mut group: Group) -> bool {
        if self.has(group.key()) {
            trace!(group_key = %group.key(), "group already in collection");
            return false;
        }

        let index = self.groups.len();
        group.set_index(index);
        group.mount(self.presentation.renderer.render(index));
        if let Some(surface) = group.surface_id() {
            self.presentation.visibility.observe(surface);
        }
        self.groups.push(group);

        let group = &mut self.groups[index];
        if group.ready(self.presentation.tokens.as_ref()) {
            for hook in &mut self.ready_hooks {
                hook(&mut *group);
            }
            let group_key = group.key();
            debug!(index, %group_key, "group ready");
            self.emit(BluffEventKind::GroupReady(GroupReady { group_key, index }));
        }
        true
    }

    /// Removes the group with `key`. Returns `false` if it is not a member.
    pub fn remove(&mut self, key: Uuid) -> bool {
        match self.index_of(key) {
            Some(index) => self.remove_by_index(index),
            None => false,
        }
    }

    /// Removes the group at `index` and re-indexes the rest.
    ///
    /// An out-of-range index is silently ignored and `false` returned. The
    /// active index is left where it was.
    pub fn remove_by_index(&mut self, index: usize) -> bool {
        if index >= self.groups.len() {
            trace!(index, len = self.groups.len(), "ignoring removal of missing group");
            return false;
        }

        let mut group = self.groups.remove(index);
        if let Some(surface) = group.surface_id() {
            self.presentation.visibility.unobserve(surface);
        }
        group.remove();
        self.update_indices();

        let group_key = group.key();
        debug!(index, %group_key, remaining = self.groups.len(), "group removed");
        self.emit(BluffEventKind::GroupRemoved(GroupRemoved { group_key, index }));
        true
    }

    fn update_indices(&mut self) {
        for (index, group) in self.groups.iter_mut().enumerate() {
            group.set_index(index);
        }
    }

    /// The index of the group in view, if any has been reported.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Moves the active pointer.
    ///
    /// Accepts `0..=len`. The upper bound is one past the last group, so
    /// `set_active_index(len)` succeeds and a later [`Self::active_group`]
    /// fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` if `index > len`.
    pub fn set_active_index(&mut self, index: usize) -> Result<(), DomainError> {
        if index > self.groups.len() {
            return Err(DomainError::OutOfRange {
                what: "active group",
                index,
                len: self.groups.len(),
            });
        }
        if self.active_index != Some(index) {
            self.active_index = Some(index);
            debug!(index, "active group changed");
            self.emit(BluffEventKind::ActiveGroupChanged(ActiveGroupChanged { index }));
        }
        Ok(())
    }

    fn active_position(&self) -> Result<usize, DomainError> {
        match self.active_index {
            Some(index) if index < self.groups.len() => Ok(index),
            Some(index) => Err(DomainError::NotFound(format!(
                "cannot find group at index {index}"
            ))),
            None => Err(DomainError::NotFound("no group is active".into())),
        }
    }

    /// The group in view.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no group is active or the active
    /// index no longer points at a group.
    pub fn active_group(&self) -> Result<&Group, DomainError> {
        Ok(&self.groups[self.active_position()?])
    }

    /// Handles one report from the visibility source. Only full visibility
    /// moves the active pointer.
    ///
    /// # Errors
    ///
    /// See [`Self::on_fully_visible`].
    pub fn on_visibility(&mut self, signal: VisibilitySignal) -> Result<(), DomainError> {
        if !signal.is_fully_visible() {
            trace!(
                surface = signal.surface.0,
                ratio = signal.intersection_ratio,
                "ignoring partial visibility"
            );
            return Ok(());
        }
        self.on_fully_visible(signal.surface)
    }

    /// Makes the group drawn on `surface` active. The last report wins; a
    /// surface that no longer belongs to a group is ignored.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::set_active_index`], which cannot fail for a
    /// surface owned by a member group.
    pub fn on_fully_visible(&mut self, surface: SurfaceId) -> Result<(), DomainError> {
        let position = self
            .groups
            .iter()
            .position(|group| group.surface_id() == Some(surface));
        match position {
            Some(index) => self.set_active_index(index),
            None => {
                trace!(surface = surface.0, "ignoring visibility of unknown surface");
                Ok(())
            }
        }
    }

    /// The active group's selected slot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no group is active.
    pub fn slot_cursor(&self) -> Result<usize, DomainError> {
        Ok(self.active_group()?.cursor())
    }

    /// Selects a slot in the active group and shows its character.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no group is active, or the slot
    /// set's range error for a bad slot under the strict policy.
    pub fn set_slot_cursor(&mut self, slot: usize) -> Result<(), DomainError> {
        let index = self.active_position()?;
        let group = &mut self.groups[index];
        group.set_cursor(slot)?;
        if let Some(display) = self.presentation.display.as_mut() {
            display.display(group.character());
        }

        let slot = group.cursor();
        let character_id = group.character().id.clone();
        debug!(index, slot, %character_id, "slot selected");
        self.emit(BluffEventKind::SlotSelected(SlotSelected {
            index,
            slot,
            character_id,
        }));
        Ok(())
    }

    /// Puts `character` in the active group's selected slot and shows it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no group is active.
    pub fn assign_character(&mut self, character: Character) -> Result<(), DomainError> {
        let index = self.active_position()?;
        let group = &mut self.groups[index];
        let slot = group.cursor();
        let character_id = character.id.clone();
        if let Some(display) = self.presentation.display.as_mut() {
            display.display(&character);
        }
        group.set_character(character);

        debug!(index, slot, %character_id, "character assigned");
        self.emit(BluffEventKind::CharacterAssigned(CharacterAssigned {
            index,
            slot,
            character_id,
        }));
        Ok(())
    }

    /// Empties the active group's selected slot, redraws it and shows the
    /// sentinel.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no group is active.
    pub fn unset_active_slot(&mut self) -> Result<(), DomainError> {
        let index = self.active_position()?;
        let group = &mut self.groups[index];
        group.unset_character()?;
        group.redraw_slot(self.presentation.tokens.as_ref());
        if let Some(display) = self.presentation.display.as_mut() {
            display.display(group.character());
        }

        let slot = group.cursor();
        debug!(index, slot, "slot emptied");
        self.emit(BluffEventKind::CharacterUnset(CharacterUnset { index, slot }));
        Ok(())
    }

    /// Redraws the active group's selected slot, and nothing else.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no group is active.
    pub fn redraw_active(&mut self) -> Result<(), DomainError> {
        let index = self.active_position()?;
        self.groups[index].redraw_slot(self.presentation.tokens.as_ref());
        Ok(())
    }

    /// Retitles the group at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` if there is no group at `index`.
    pub fn rename_group(&mut self, index: usize, title: &str) -> Result<(), DomainError> {
        let len = self.groups.len();
        let group = self.groups.get_mut(index).ok_or(DomainError::OutOfRange {
            what: "group",
            index,
            len,
        })?;
        group.rename(title);

        debug!(index, title, "group renamed");
        self.emit(BluffEventKind::GroupRenamed(GroupRenamed {
            index,
            title: title.to_owned(),
        }));
        Ok(())
    }

    /// Every group's persisted shape, in order.
    #[must_use]
    pub fn serialize(&self) -> Vec<GroupSnapshot> {
        self.groups.iter().map(Group::serialize).collect()
    }

    fn emit(&mut self, kind: BluffEventKind) {
        self.sequence_number += 1;
        let event = BluffEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                source_id: self.id,
                sequence_number: self.sequence_number,
                correlation_id: self.correlation_id,
                occurred_at: self.clock.now(),
            },
            kind,
        };
        self.bus.publish(&event);
    }
}

impl fmt::Debug for GroupCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupCollection")
            .field("id", &self.id)
            .field("groups", &self.groups)
            .field("active_index", &self.active_index)
            .field("ready_hooks", &self.ready_hooks.len())
            .field("bus", &self.bus)
            .field("sequence_number", &self.sequence_number)
            .finish_non_exhaustive()
    }
}
