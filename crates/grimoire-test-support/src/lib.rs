//! Shared test fakes and fixtures for the Grimoire companion engine.

mod clock;
mod fixtures;
mod presentation;

pub use clock::FixedClock;
pub use fixtures::{baron, empty_character, imp, sample_catalog, washerwoman};
pub use presentation::{
    RecordingDisplay, RecordingRenderer, RecordingVisibility, StubTokenProvider, SurfaceCall,
    VisibilityCall,
};
