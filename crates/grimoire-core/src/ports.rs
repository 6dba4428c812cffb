//! Collaborators the bluff groups consume but do not implement.
//!
//! Each trait is the narrowest contract the collection needs from its host:
//! drawing surfaces, drawing tokens, titles, showing a character and
//! reporting viewport visibility.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::character::Character;

/// Intersection ratio at which a surface counts as fully in view.
pub const FULLY_VISIBLE: f64 = 1.0;

/// Stable identity of a mounted surface. Unlike a group's index it never
/// changes while the surface is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// A drawn token, ready to be placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFragment(pub String);

/// A mounted presentation surface for one group.
pub trait Surface: Debug {
    /// The surface's stable identity.
    fn id(&self) -> SurfaceId;

    /// Writes the owning group's current index onto the surface.
    fn stamp_group_id(&mut self, group_id: usize);

    /// Replaces the contents of slot button `slot` with `token`.
    fn fill_slot(&mut self, slot: usize, token: TokenFragment);

    /// Scrolls the surface to the nearest edge of the viewport.
    fn scroll_into_view(&mut self);

    /// Removes the surface from the viewport.
    fn detach(&mut self);
}

/// Produces a mounted surface from the group template.
pub trait Renderer: Debug {
    /// Draws the template for the group at `group_id` and mounts it.
    fn render(&mut self, group_id: usize) -> Box<dyn Surface>;
}

/// Draws the visual token for a character.
pub trait TokenProvider: Debug {
    /// Returns the token for `character`.
    fn draw_token(&self, character: &Character) -> TokenFragment;
}

/// An editable title attached to a group.
pub trait TitleWidget: Debug {
    /// The current title text.
    fn title(&self) -> String;

    /// Replaces the title text.
    fn set_title(&mut self, title: &str);

    /// Earlier titles to offer while editing.
    fn suggestions(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Sink notified whenever the active group's selected character changes.
pub trait CharacterDisplay: Debug {
    /// Shows `character`.
    fn display(&mut self, character: &Character);
}

/// Viewport observer that reports how much of each watched surface is visible.
pub trait VisibilitySource: Debug {
    /// Starts watching `surface`.
    fn observe(&mut self, surface: SurfaceId);

    /// Stops watching `surface`.
    fn unobserve(&mut self, surface: SurfaceId);
}

/// One report from a [`VisibilitySource`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilitySignal {
    /// The surface the report is about.
    pub surface: SurfaceId,
    /// Fraction of the surface inside the viewport, in `[0, 1]`.
    pub intersection_ratio: f64,
}

impl VisibilitySignal {
    /// Whether the whole surface is inside the viewport. Only an exact ratio
    /// of one counts.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_fully_visible(&self) -> bool {
        self.intersection_ratio == FULLY_VISIBLE
    }
}
