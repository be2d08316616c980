//! Platform abstraction traits for pulse scheduling.
//!
//! These traits let the timing core delegate clock and task-queue
//! responsibilities to the host, so the same monitor can run against a
//! hardware frame-callback source, a handler-style deferred task queue,
//! or the deterministic test runtime.
//!
//! Everything here is single-threaded: callbacks are `'static` but not
//! `Send`, and implementations are expected to execute them on the one
//! designated UI thread that also drives the monitor.

/// Deferred unit of work executed by a [`TaskRunner`].
pub type Task = Box<dyn FnOnce() + 'static>;

/// Callback invoked with a frame timestamp in nanoseconds.
pub type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

/// Monotonic time source.
///
/// Implementations only need to be consistent with themselves; the origin
/// is arbitrary.
pub trait MonotonicClock {
    /// Returns the current time in nanoseconds from an arbitrary origin.
    fn now_nanos(&self) -> u64;
}

/// Posts work onto the host's designated UI thread.
///
/// Mirrors a handler/looper style queue: `post` runs once the queue
/// drains to it, `post_delayed` no earlier than `delay_millis` later.
/// Posted tasks cannot be retracted; cancellation is the poster's
/// problem (a torn-down receiver treats the callback as a no-op).
pub trait TaskRunner {
    fn post(&self, task: Task);
    fn post_delayed(&self, task: Task, delay_millis: u64);
}

/// Hardware frame-callback registrar.
///
/// One callback per request; the timestamp passed to the callback is the
/// display-reported frame time in nanoseconds.
pub trait FrameSource {
    fn request_frame(&self, callback: FrameCallback);
}
