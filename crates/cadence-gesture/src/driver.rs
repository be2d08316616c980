//! Synthetic scroll gesture driver.
//!
//! Paced externally, one [`ScrollGestureDriver::advance`] per display
//! pulse, the driver turns native scroll deltas into a Down / Move… / Up
//! pointer sequence that approximates a physical drag on the target
//! view. One driver per gesture; a finished driver is discarded, never
//! reused.

use std::rc::Rc;

use crate::events::{PointerAction, PointerEventSink, SyntheticPointerEvent};
use crate::provider::{GestureHandle, ScrollDeltaProvider};

/// Scroll direction of the synthesized gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Content scrolls down: the synthetic pointer drags upward.
    Down,
    /// Content scrolls up: the synthetic pointer drags downward.
    Up,
}

/// Phase of one synthetic gesture; strictly forward-progressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No event injected yet.
    Ready,
    /// Down injected; Move events track provider deltas.
    Dragging,
    /// Provider finished; the next advance injects the Up.
    ReleasePending,
    /// Up injected; the driver is inert.
    Finished,
}

pub struct ScrollGestureDriver {
    sink: Rc<dyn PointerEventSink>,
    provider: Rc<dyn ScrollDeltaProvider>,
    handle: GestureHandle,
    direction: ScrollDirection,
    device_scale: f32,
    anchor_x: f32,
    current_y: f32,
    down_time_millis: u64,
    phase: GesturePhase,
}

impl ScrollGestureDriver {
    /// Binds a new gesture to `sink`, pulling deltas for `handle` from
    /// `provider`. `start_x`/`start_y` are density-independent and are
    /// scaled by `device_scale` once, here.
    pub fn new(
        sink: Rc<dyn PointerEventSink>,
        provider: Rc<dyn ScrollDeltaProvider>,
        handle: GestureHandle,
        direction: ScrollDirection,
        start_x: f32,
        start_y: f32,
        device_scale: f32,
    ) -> Self {
        Self {
            sink,
            provider,
            handle,
            direction,
            device_scale,
            anchor_x: start_x * device_scale,
            current_y: start_y * device_scale,
            down_time_millis: 0,
            phase: GesturePhase::Ready,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != GesturePhase::Finished
    }

    /// Performs one gesture step at `time_millis`.
    ///
    /// Returns whether the gesture still wants to be driven; the pacer
    /// must stop calling once this yields `false`.
    pub fn advance(&mut self, time_millis: u64) -> bool {
        match self.phase {
            GesturePhase::Ready => {
                self.down_time_millis = time_millis;
                self.inject(PointerAction::Down, time_millis);
                self.phase = GesturePhase::Dragging;
            }
            GesturePhase::Dragging => {
                let delta = self.provider.scroll_delta(self.handle, self.device_scale);
                if delta != 0.0 {
                    self.current_y += match self.direction {
                        ScrollDirection::Down => -delta,
                        ScrollDirection::Up => delta,
                    };
                    self.inject(PointerAction::Move, time_millis);
                }
                // A still tick can also be the last one.
                if self.provider.is_finished(self.handle) {
                    self.phase = GesturePhase::ReleasePending;
                }
            }
            GesturePhase::ReleasePending => {
                self.inject(PointerAction::Up, time_millis);
                self.provider.release_sent(self.handle);
                self.phase = GesturePhase::Finished;
                log::trace!("synthetic scroll gesture {} released", self.handle);
            }
            GesturePhase::Finished => {}
        }
        self.is_active()
    }

    fn inject(&self, action: PointerAction, time_millis: u64) {
        self.sink.inject(SyntheticPointerEvent::new(
            self.down_time_millis,
            time_millis,
            action,
            self.anchor_x,
            self.current_y,
        ));
    }
}
