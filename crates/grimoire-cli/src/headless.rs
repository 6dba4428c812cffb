//! In-memory presentation used when no viewport exists.

use std::collections::BTreeSet;

use grimoire_bluffs::domain::slot_set::SLOT_COUNT;
use grimoire_core::character::Character;
use grimoire_core::ports::{
    CharacterDisplay, Renderer, Surface, SurfaceId, TokenFragment, TokenProvider,
    VisibilitySource,
};
use tracing::{debug, info};

/// Mounts [`HeadlessSurface`]s with sequential ids.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_id: u64,
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, group_id: usize) -> Box<dyn Surface> {
        self.next_id += 1;
        debug!(surface = self.next_id, group_id, "surface rendered");
        Box::new(HeadlessSurface {
            id: SurfaceId(self.next_id),
            group_id,
            slots: Default::default(),
        })
    }
}

/// A surface that only remembers what was drawn on it.
#[derive(Debug)]
pub struct HeadlessSurface {
    id: SurfaceId,
    group_id: usize,
    slots: [String; SLOT_COUNT],
}

impl Surface for HeadlessSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn stamp_group_id(&mut self, group_id: usize) {
        self.group_id = group_id;
    }

    fn fill_slot(&mut self, slot: usize, token: TokenFragment) {
        if let Some(existing) = self.slots.get_mut(slot) {
            *existing = token.0;
        }
    }

    fn scroll_into_view(&mut self) {}

    fn detach(&mut self) {
        debug!(
            surface = self.id.0,
            group_id = self.group_id,
            slots = ?self.slots,
            "surface detached"
        );
    }
}

/// Draws a character's name as its token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameTokens;

impl TokenProvider for NameTokens {
    fn draw_token(&self, character: &Character) -> TokenFragment {
        TokenFragment(character.name.clone())
    }
}

/// Keeps the set of watched surfaces. Reports come from the script instead.
#[derive(Debug, Default)]
pub struct HeadlessVisibility {
    watched: BTreeSet<SurfaceId>,
}

impl HeadlessVisibility {
    /// Whether `surface` is being watched.
    #[must_use]
    pub fn is_watching(&self, surface: SurfaceId) -> bool {
        self.watched.contains(&surface)
    }
}

impl VisibilitySource for HeadlessVisibility {
    fn observe(&mut self, surface: SurfaceId) {
        self.watched.insert(surface);
    }

    fn unobserve(&mut self, surface: SurfaceId) {
        self.watched.remove(&surface);
    }
}

/// Logs each character the collection asks to show.
#[derive(Debug, Default)]
pub struct LogDisplay;

impl CharacterDisplay for LogDisplay {
    fn display(&mut self, character: &Character) {
        info!(character_id = %character.id, name = %character.name, "showing character");
    }
}
