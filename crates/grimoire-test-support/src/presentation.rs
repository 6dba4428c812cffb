//! Recording fakes for the presentation ports.
//!
//! Every fake is cheap to clone and clones share their log, so a test can
//! hand one copy to the code under test and inspect another.

use std::sync::{Arc, Mutex};

use grimoire_core::character::Character;
use grimoire_core::ports::{
    CharacterDisplay, Renderer, Surface, SurfaceId, TokenFragment, TokenProvider,
    VisibilitySource,
};

/// A call made on a [`RecordingRenderer`] surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `stamp_group_id`.
    StampGroupId(usize),
    /// `fill_slot` with the token text.
    FillSlot(usize, String),
    /// `scroll_into_view`.
    ScrollIntoView,
    /// `detach`.
    Detach,
}

type SurfaceLog = Arc<Mutex<Vec<(SurfaceId, SurfaceCall)>>>;

/// A renderer whose surfaces record every call made on them.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    next_id: Arc<Mutex<u64>>,
    rendered: Arc<Mutex<Vec<(SurfaceId, usize)>>>,
    log: SurfaceLog,
}

impl RecordingRenderer {
    /// Creates a renderer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces rendered so far, with the group id each was rendered for.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn rendered(&self) -> Vec<(SurfaceId, usize)> {
        self.rendered.lock().unwrap().clone()
    }

    /// Calls made on `surface`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self, surface: SurfaceId) -> Vec<SurfaceCall> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == surface)
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// The group id most recently stamped on `surface`.
    #[must_use]
    pub fn stamped_group_id(&self, surface: SurfaceId) -> Option<usize> {
        self.calls(surface).iter().rev().find_map(|call| match call {
            SurfaceCall::StampGroupId(id) => Some(*id),
            _ => None,
        })
    }

    /// Whether `surface` has been detached.
    #[must_use]
    pub fn is_detached(&self, surface: SurfaceId) -> bool {
        self.calls(surface).contains(&SurfaceCall::Detach)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, group_id: usize) -> Box<dyn Surface> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            SurfaceId(*next)
        };
        self.rendered.lock().unwrap().push((id, group_id));
        Box::new(RecordingSurface {
            id,
            log: Arc::clone(&self.log),
        })
    }
}

#[derive(Debug)]
struct RecordingSurface {
    id: SurfaceId,
    log: SurfaceLog,
}

impl RecordingSurface {
    fn record(&self, call: SurfaceCall) {
        self.log.lock().unwrap().push((self.id, call));
    }
}

impl Surface for RecordingSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn stamp_group_id(&mut self, group_id: usize) {
        self.record(SurfaceCall::StampGroupId(group_id));
    }

    fn fill_slot(&mut self, slot: usize, token: TokenFragment) {
        self.record(SurfaceCall::FillSlot(slot, token.0));
    }

    fn scroll_into_view(&mut self) {
        self.record(SurfaceCall::ScrollIntoView);
    }

    fn detach(&mut self) {
        self.record(SurfaceCall::Detach);
    }
}

/// Draws `token:<id>` for every character.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTokenProvider;

impl TokenProvider for StubTokenProvider {
    fn draw_token(&self, character: &Character) -> TokenFragment {
        TokenFragment(format!("token:{}", character.id))
    }
}

/// A call made on a [`RecordingVisibility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityCall {
    /// `observe`.
    Observe(SurfaceId),
    /// `unobserve`.
    Unobserve(SurfaceId),
}

/// A visibility source that records which surfaces are being watched.
#[derive(Debug, Clone, Default)]
pub struct RecordingVisibility {
    calls: Arc<Mutex<Vec<VisibilityCall>>>,
}

impl RecordingVisibility {
    /// Creates a source with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<VisibilityCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Surfaces currently watched, in the order they started being watched.
    #[must_use]
    pub fn observed(&self) -> Vec<SurfaceId> {
        let mut observed = Vec::new();
        for call in self.calls() {
            match call {
                VisibilityCall::Observe(id) => observed.push(id),
                VisibilityCall::Unobserve(id) => observed.retain(|existing| *existing != id),
            }
        }
        observed
    }
}

impl VisibilitySource for RecordingVisibility {
    fn observe(&mut self, surface: SurfaceId) {
        self.calls.lock().unwrap().push(VisibilityCall::Observe(surface));
    }

    fn unobserve(&mut self, surface: SurfaceId) {
        self.calls
            .lock()
            .unwrap()
            .push(VisibilityCall::Unobserve(surface));
    }
}

/// A display that records the id of every character it is shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    shown: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    /// Creates a display with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every character displayed, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }
}

impl CharacterDisplay for RecordingDisplay {
    fn display(&mut self, character: &Character) {
        self.shown.lock().unwrap().push(character.id.clone());
    }
}
