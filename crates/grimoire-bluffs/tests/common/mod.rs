//! Shared helpers for bluff group integration tests.
#![allow(dead_code)]

use grimoire_bluffs::domain::collection::{GroupCollection, Presentation};
use grimoire_bluffs::domain::group::GroupFactory;
use grimoire_bluffs::domain::slot_set::SlotSetConfig;
use grimoire_core::ports::{SurfaceId, VisibilitySignal};
use grimoire_test_support::{
    FixedClock, RecordingDisplay, RecordingRenderer, RecordingVisibility, StubTokenProvider,
    empty_character,
};

/// A collection wired to recording fakes, plus handles on those fakes.
pub struct TestGrimoire {
    pub collection: GroupCollection,
    pub renderer: RecordingRenderer,
    pub visibility: RecordingVisibility,
    pub display: RecordingDisplay,
}

/// Build a collection with the given slot set options.
pub fn build_grimoire(config: SlotSetConfig) -> TestGrimoire {
    let renderer = RecordingRenderer::new();
    let visibility = RecordingVisibility::new();
    let display = RecordingDisplay::new();
    let factory = GroupFactory::builder()
        .empty_character(empty_character())
        .config(config)
        .build()
        .unwrap();
    let collection = GroupCollection::new(
        factory,
        Presentation {
            renderer: Box::new(renderer.clone()),
            tokens: Box::new(StubTokenProvider),
            visibility: Box::new(visibility.clone()),
            display: Some(Box::new(display.clone())),
        },
        Box::new(FixedClock::default()),
    );
    TestGrimoire {
        collection,
        renderer,
        visibility,
        display,
    }
}

/// A full-visibility report for `surface`.
pub fn fully_visible(surface: SurfaceId) -> VisibilitySignal {
    VisibilitySignal {
        surface,
        intersection_ratio: 1.0,
    }
}

/// The surface mounted for the group at `index`.
pub fn surface_at(collection: &GroupCollection, index: usize) -> SurfaceId {
    collection
        .group(index)
        .and_then(|group| group.surface_id())
        .unwrap()
}
