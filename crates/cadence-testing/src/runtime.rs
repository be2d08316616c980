//! Deterministic stand-ins for the host scheduling primitives.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cadence_core::{FrameCallback, FrameSource, MonotonicClock, Task, TaskRunner, NANOS_PER_MILLI};
use smallvec::SmallVec;

/// Settable clock for virtual-time tests.
pub struct ManualClock {
    now_nanos: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(now_nanos: u64) -> Self {
        Self {
            now_nanos: Cell::new(now_nanos),
        }
    }

    pub fn advance(&self, nanos: u64) {
        self.now_nanos.set(self.now_nanos.get() + nanos);
    }

    /// Jumps the clock forward. Virtual time never runs backwards, so
    /// this asserts monotonicity.
    pub fn set(&self, now_nanos: u64) {
        assert!(
            now_nanos >= self.now_nanos.get(),
            "manual clock moved backwards",
        );
        self.now_nanos.set(now_nanos);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.now_nanos.get()
    }
}

struct QueuedTask {
    due_nanos: u64,
    seq: u64,
    task: Task,
}

/// [`TaskRunner`] draining into virtual time.
///
/// Tasks run in due-time order, post order breaking ties; the shared
/// [`ManualClock`] jumps forward to each task's due time as it runs, so
/// rescheduling callbacks observe the time they asked for.
pub struct ManualTaskRunner {
    clock: Rc<ManualClock>,
    queue: RefCell<SmallVec<[QueuedTask; 4]>>,
    next_seq: Cell<u64>,
}

impl ManualTaskRunner {
    pub fn new(clock: Rc<ManualClock>) -> Self {
        Self {
            clock,
            queue: RefCell::new(SmallVec::new()),
            next_seq: Cell::new(0),
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs the next due task, advancing the clock to its due time.
    /// Returns `false` when the queue is empty.
    pub fn run_next(&self) -> bool {
        let next = {
            let mut queue = self.queue.borrow_mut();
            let Some(index) = queue
                .iter()
                .enumerate()
                .min_by_key(|(_, entry)| (entry.due_nanos, entry.seq))
                .map(|(index, _)| index)
            else {
                return false;
            };
            queue.remove(index)
        };
        if next.due_nanos > self.clock.now_nanos() {
            self.clock.set(next.due_nanos);
        }
        (next.task)();
        true
    }

    /// Drains the queue, including tasks posted while draining.
    /// Returns the number of tasks executed.
    pub fn run_until_idle(&self) -> usize {
        let mut executed = 0;
        while self.run_next() {
            executed += 1;
            assert!(executed < 10_000, "task queue failed to go idle");
        }
        executed
    }
}

impl TaskRunner for ManualTaskRunner {
    fn post(&self, task: Task) {
        self.post_delayed(task, 0);
    }

    fn post_delayed(&self, task: Task, delay_millis: u64) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(QueuedTask {
            due_nanos: self.clock.now_nanos() + delay_millis * NANOS_PER_MILLI,
            seq,
            task,
        });
    }
}

/// [`FrameSource`] stub holding at most one pending callback.
#[derive(Default)]
pub struct ManualFrameSource {
    pending: RefCell<Option<FrameCallback>>,
    requests: Cell<usize>,
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Total `request_frame` calls observed.
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    /// Fires the pending callback with the given frame time. Returns
    /// whether a callback was pending.
    pub fn fire(&self, frame_time_nanos: u64) -> bool {
        let Some(callback) = self.pending.borrow_mut().take() else {
            return false;
        };
        callback(frame_time_nanos);
        true
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&self, callback: FrameCallback) {
        let previous = self.pending.borrow_mut().replace(callback);
        assert!(
            previous.is_none(),
            "second frame requested while one was pending",
        );
        self.requests.set(self.requests.get() + 1);
    }
}
