//! Synthetic pointer event model.

/// Action carried by a synthesized pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
}

/// A pointer event synthesized for injection into the host view.
///
/// `down_time_millis` is the timestamp of the Down event that opened the
/// gesture; every event of one gesture carries the same value while
/// `event_time_millis` advances per event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticPointerEvent {
    pub down_time_millis: u64,
    pub event_time_millis: u64,
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
}

impl SyntheticPointerEvent {
    pub fn new(
        down_time_millis: u64,
        event_time_millis: u64,
        action: PointerAction,
        x: f32,
        y: f32,
    ) -> Self {
        Self {
            down_time_millis,
            event_time_millis,
            action,
            x,
            y,
        }
    }
}

/// Accepts synthesized pointer events on behalf of a target view.
pub trait PointerEventSink {
    fn inject(&self, event: SyntheticPointerEvent);
}
