//! Pulse scheduling strategies.
//!
//! The monitor picks one strategy at construction, permanently: the
//! platform's frame-callback source when it exposes one, or a deferred
//! task queue onto which the next pulse is posted with a delay estimated
//! from the refresh cadence.

use std::cell::Cell;
use std::rc::Rc;

use cadence_core::{FrameSource, MonotonicClock, TaskRunner, NANOS_PER_MILLI};

/// Receives one pulse with its timestamp in nanoseconds.
pub(crate) type PulseCallback = Box<dyn FnOnce(u64) + 'static>;

pub(crate) trait PulseScheduler {
    /// Schedules a single pulse delivery.
    fn schedule(&self, pulse: PulseCallback);

    /// Adopts an externally observed sync timestamp as the phase anchor.
    ///
    /// Only meaningful for the estimating strategy; the hardware signal
    /// needs no correction.
    fn set_phase_anchor(&self, _timestamp_nanos: u64) {}

    fn uses_hardware_timing(&self) -> bool;
}

/// Hardware strategy: every pulse is one platform frame callback, and the
/// timestamp is the display-reported frame time.
pub(crate) struct FrameSourceScheduler {
    source: Rc<dyn FrameSource>,
}

impl FrameSourceScheduler {
    pub(crate) fn new(source: Rc<dyn FrameSource>) -> Self {
        Self { source }
    }
}

impl PulseScheduler for FrameSourceScheduler {
    fn schedule(&self, pulse: PulseCallback) {
        self.source.request_frame(pulse);
    }

    fn uses_hardware_timing(&self) -> bool {
        true
    }
}

/// Fallback strategy: posts delayed tasks aligned to a best-known phase
/// anchor, self-correcting as better anchors arrive.
pub(crate) struct DeferredTaskScheduler {
    runner: Rc<dyn TaskRunner>,
    clock: Rc<dyn MonotonicClock>,
    refresh_period_nanos: u64,
    phase_anchor_nanos: Cell<u64>,
    last_posted_nanos: Cell<u64>,
}

impl DeferredTaskScheduler {
    pub(crate) fn new(
        runner: Rc<dyn TaskRunner>,
        clock: Rc<dyn MonotonicClock>,
        refresh_period_nanos: u64,
    ) -> Self {
        let now = clock.now_nanos();
        Self {
            runner,
            clock,
            refresh_period_nanos,
            phase_anchor_nanos: Cell::new(now),
            last_posted_nanos: Cell::new(now),
        }
    }

    /// Delay from `now` until the next estimated sync point.
    ///
    /// Aligns to the most recent tick of the anchored cadence. If the
    /// resulting post would land within half a period of the previous
    /// one, it is pushed out by a full period: anchor estimates drift,
    /// and two pulses spaced closer than that read as a stutter.
    fn next_delay_nanos(&self, now_nanos: u64) -> u64 {
        let period = self.refresh_period_nanos as i64;
        let now = now_nanos as i64;
        let anchor = self.phase_anchor_nanos.get() as i64;
        // div_euclid floors, so an anchor ahead of `now` still lands on
        // the tick grid.
        let last_tick = anchor + (now - anchor).div_euclid(period) * period;
        let mut delay = (last_tick + period) - now;
        debug_assert!(delay > 0 && delay <= period);
        if now + delay - (self.last_posted_nanos.get() as i64) < period / 2 {
            delay += period;
        }
        delay as u64
    }
}

impl PulseScheduler for DeferredTaskScheduler {
    fn schedule(&self, pulse: PulseCallback) {
        let now = self.clock.now_nanos();
        let delay_nanos = self.next_delay_nanos(now);
        self.last_posted_nanos.set(now + delay_nanos);
        // No display-reported frame time here; the pulse carries the
        // clock reading at execution.
        let clock = Rc::clone(&self.clock);
        self.runner.post_delayed(
            Box::new(move || pulse(clock.now_nanos())),
            delay_nanos / NANOS_PER_MILLI,
        );
    }

    fn set_phase_anchor(&self, timestamp_nanos: u64) {
        self.phase_anchor_nanos.set(timestamp_nanos);
    }

    fn uses_hardware_timing(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_testing::{ManualClock, ManualTaskRunner};

    fn scheduler(period_nanos: u64) -> (Rc<ManualClock>, Rc<ManualTaskRunner>, DeferredTaskScheduler) {
        let clock = Rc::new(ManualClock::new());
        let runner = Rc::new(ManualTaskRunner::new(Rc::clone(&clock)));
        let scheduler =
            DeferredTaskScheduler::new(runner.clone(), clock.clone(), period_nanos);
        (clock, runner, scheduler)
    }

    #[test]
    fn delay_aligns_to_anchor_grid() {
        let (_clock, _runner, scheduler) = scheduler(16);
        assert_eq!(scheduler.next_delay_nanos(10), 6);
    }

    #[test]
    fn post_too_close_to_previous_adds_full_period() {
        let (_clock, _runner, scheduler) = scheduler(16);
        scheduler.last_posted_nanos.set(9);
        assert_eq!(scheduler.next_delay_nanos(10), 22);
    }

    #[test]
    fn phase_anchor_realigns_delay() {
        let (_clock, _runner, scheduler) = scheduler(16);
        scheduler.set_phase_anchor(4);
        assert_eq!(scheduler.next_delay_nanos(10), 10);
    }

    #[test]
    fn anchor_ahead_of_now_still_floors() {
        let (_clock, _runner, scheduler) = scheduler(16);
        scheduler.set_phase_anchor(20);
        assert_eq!(scheduler.next_delay_nanos(10), 10);
    }

    #[test]
    fn schedule_posts_with_millisecond_delay_and_clock_timestamp() {
        use std::cell::Cell;

        let (clock, runner, scheduler) = scheduler(16_666_666);
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        scheduler.schedule(Box::new(move |timestamp| sink.set(Some(timestamp))));
        assert_eq!(runner.pending(), 1);
        assert_eq!(scheduler.last_posted_nanos.get(), 16_666_666);

        assert!(runner.run_next());
        // 16_666_666ns truncates to a 16ms post.
        assert_eq!(clock.now_nanos(), 16_000_000);
        assert_eq!(seen.get(), Some(16_000_000));
    }
}
