//! Recording doubles for the gesture seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use cadence_gesture::{
    GestureHandle, PointerEventSink, ScrollDeltaProvider, SyntheticPointerEvent,
};

/// [`PointerEventSink`] capturing injected events for assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<SyntheticPointerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SyntheticPointerEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn last(&self) -> Option<SyntheticPointerEvent> {
        self.events.borrow().last().copied()
    }
}

impl PointerEventSink for RecordingSink {
    fn inject(&self, event: SyntheticPointerEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// [`ScrollDeltaProvider`] replaying a scripted delta sequence.
///
/// Deltas pop one per `scroll_delta` query, `0.0` once the script runs
/// dry. Completion is either driven manually with `set_finished` or, for
/// [`ScriptedDeltaProvider::finishing_after_deltas`], reported as soon
/// as the script is exhausted.
pub struct ScriptedDeltaProvider {
    deltas: RefCell<VecDeque<f32>>,
    finished: Cell<bool>,
    finish_after_deltas: bool,
    release_count: Cell<usize>,
    last_handle: Cell<Option<GestureHandle>>,
    last_scale: Cell<Option<f32>>,
}

impl ScriptedDeltaProvider {
    /// Provider that never finishes on its own.
    pub fn new(deltas: &[f32]) -> Self {
        Self::with_auto_finish(deltas, false)
    }

    /// Provider that reports completion once every delta is consumed.
    pub fn finishing_after_deltas(deltas: &[f32]) -> Self {
        Self::with_auto_finish(deltas, true)
    }

    fn with_auto_finish(deltas: &[f32], finish_after_deltas: bool) -> Self {
        Self {
            deltas: RefCell::new(deltas.iter().copied().collect()),
            finished: Cell::new(false),
            finish_after_deltas,
            release_count: Cell::new(0),
            last_handle: Cell::new(None),
            last_scale: Cell::new(None),
        }
    }

    pub fn set_finished(&self, finished: bool) {
        self.finished.set(finished);
    }

    /// How many times `release_sent` was called.
    pub fn release_count(&self) -> usize {
        self.release_count.get()
    }

    /// Handle seen on the most recent query, if any.
    pub fn last_handle(&self) -> Option<GestureHandle> {
        self.last_handle.get()
    }

    /// Scale seen on the most recent delta query, if any.
    pub fn last_scale(&self) -> Option<f32> {
        self.last_scale.get()
    }
}

impl ScrollDeltaProvider for ScriptedDeltaProvider {
    fn scroll_delta(&self, handle: GestureHandle, scale: f32) -> f32 {
        self.last_handle.set(Some(handle));
        self.last_scale.set(Some(scale));
        self.deltas.borrow_mut().pop_front().unwrap_or(0.0)
    }

    fn is_finished(&self, handle: GestureHandle) -> bool {
        self.last_handle.set(Some(handle));
        self.finished.get() || (self.finish_after_deltas && self.deltas.borrow().is_empty())
    }

    fn release_sent(&self, handle: GestureHandle) {
        self.last_handle.set(Some(handle));
        self.release_count.set(self.release_count.get() + 1);
    }
}
