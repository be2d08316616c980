//! Burst-bounded vsync monitor.
//!
//! One monitor per display-bound client. A call to
//! [`VsyncMonitor::request_update`] arms a burst of [`MAX_AUTO_UPDATES`]
//! pulses that approximate the display's vertical sync; the listener is
//! expected to call `request_update` again from its callback for as long
//! as it wants the stream to continue (the burst bound keeps an
//! abandoned listener from ticking forever).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cadence_core::{nanos_to_micros, FrameSource, MonotonicClock, TaskRunner, NANOS_PER_SECOND};

use crate::schedule::{DeferredTaskScheduler, FrameSourceScheduler, PulseScheduler};

/// Pulses delivered per [`VsyncMonitor::request_update`] before the
/// monitor goes quiet again.
pub const MAX_AUTO_UPDATES: u32 = 5;

/// Refresh rate assumed when the display reports none, in frames per
/// second.
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 60.0;

/// Receives pulse notifications; timestamps are in microseconds.
pub trait VsyncListener {
    fn on_vsync(&self, timestamp_micros: u64);
}

impl<F: Fn(u64) + 'static> VsyncListener for F {
    fn on_vsync(&self, timestamp_micros: u64) {
        self(timestamp_micros)
    }
}

/// Clonable handle to one monitor instance.
///
/// Scheduled callbacks hold only a weak reference, so dropping every
/// handle silences the monitor even with a pulse still queued.
#[derive(Clone)]
pub struct VsyncMonitor {
    inner: Rc<MonitorInner>,
}

struct MonitorInner {
    refresh_period_nanos: u64,
    scheduler: Box<dyn PulseScheduler>,
    pending_pulses: Cell<u32>,
    request_in_flight: Cell<bool>,
    listener: RefCell<Option<Rc<dyn VsyncListener>>>,
}

impl VsyncMonitor {
    /// Monitor driven by the platform's hardware frame callbacks.
    pub fn with_frame_source(
        source: Rc<dyn FrameSource>,
        refresh_rate_hz: f64,
        listener: impl VsyncListener + 'static,
    ) -> Self {
        let period = refresh_period_nanos_for(refresh_rate_hz);
        Self::new(Box::new(FrameSourceScheduler::new(source)), period, listener)
    }

    /// Monitor driven by delayed tasks aligned to an estimated phase,
    /// for platforms without a frame-callback primitive.
    pub fn with_task_runner(
        runner: Rc<dyn TaskRunner>,
        clock: Rc<dyn MonotonicClock>,
        refresh_rate_hz: f64,
        listener: impl VsyncListener + 'static,
    ) -> Self {
        let period = refresh_period_nanos_for(refresh_rate_hz);
        Self::new(
            Box::new(DeferredTaskScheduler::new(runner, clock, period)),
            period,
            listener,
        )
    }

    fn new(
        scheduler: Box<dyn PulseScheduler>,
        refresh_period_nanos: u64,
        listener: impl VsyncListener + 'static,
    ) -> Self {
        log::trace!(
            "vsync monitor created: {} timing, period {refresh_period_nanos}ns",
            if scheduler.uses_hardware_timing() {
                "hardware"
            } else {
                "estimated"
            },
        );
        Self {
            inner: Rc::new(MonitorInner {
                refresh_period_nanos,
                scheduler,
                pending_pulses: Cell::new(0),
                request_in_flight: Cell::new(false),
                listener: RefCell::new(Some(Rc::new(listener))),
            }),
        }
    }

    /// Starts (or refreshes) a pulse burst.
    ///
    /// Resets the remaining-pulse counter to [`MAX_AUTO_UPDATES`] and
    /// schedules a pulse unless one is already pending. Safe to call
    /// repeatedly, including from within the listener callback.
    pub fn request_update(&self) {
        self.inner.pending_pulses.set(MAX_AUTO_UPDATES);
        self.inner.schedule_pulse();
    }

    /// Halts rescheduling. An already-queued pulse may still fire once.
    pub fn stop(&self) {
        self.inner.pending_pulses.set(0);
    }

    /// Stops the monitor and drops the listener permanently.
    pub fn detach(&self) {
        self.stop();
        self.inner.listener.borrow_mut().take();
        log::trace!("vsync monitor detached");
    }

    /// Feeds a known-good past sync timestamp to the fallback phase
    /// estimator. No-op under hardware timing.
    pub fn set_phase_anchor(&self, timestamp_nanos: u64) {
        self.inner.scheduler.set_phase_anchor(timestamp_nanos);
    }

    /// Whether pulses come from the platform's true sync signal rather
    /// than the timed estimate.
    pub fn uses_hardware_timing(&self) -> bool {
        self.inner.scheduler.uses_hardware_timing()
    }

    /// Time between pulses, in nanoseconds.
    pub fn refresh_period_nanos(&self) -> u64 {
        self.inner.refresh_period_nanos
    }
}

impl MonitorInner {
    fn schedule_pulse(self: &Rc<Self>) {
        if self.request_in_flight.get() {
            return;
        }
        self.request_in_flight.set(true);
        let weak = Rc::downgrade(self);
        self.scheduler.schedule(Box::new(move |timestamp_nanos| {
            // The monitor may be gone by the time a queued pulse fires.
            if let Some(inner) = weak.upgrade() {
                inner.on_pulse(timestamp_nanos);
            }
        }));
    }

    fn on_pulse(self: &Rc<Self>, timestamp_nanos: u64) {
        debug_assert!(
            self.request_in_flight.get(),
            "pulse delivered without a request in flight",
        );
        self.request_in_flight.set(false);
        let remaining = self.pending_pulses.get();
        if remaining > 0 {
            self.pending_pulses.set(remaining - 1);
            // Reschedule before notifying: a listener that calls
            // request_update from its callback must observe the
            // in-flight request rather than start a second one.
            if remaining > 1 {
                self.schedule_pulse();
            }
        }
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener.on_vsync(nanos_to_micros(timestamp_nanos));
        }
    }
}

fn refresh_period_nanos_for(refresh_rate_hz: f64) -> u64 {
    let hz = if refresh_rate_hz.is_finite() && refresh_rate_hz > 0.0 {
        refresh_rate_hz
    } else {
        DEFAULT_REFRESH_RATE_HZ
    };
    (NANOS_PER_SECOND as f64 / hz) as u64
}

#[cfg(test)]
#[path = "tests/monitor_tests.rs"]
mod tests;
