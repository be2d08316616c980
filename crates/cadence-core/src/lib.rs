//! Core platform seams for the Cadence timing stack.
//!
//! Higher layers (`cadence-vsync`, `cadence-gesture`) talk to the host
//! exclusively through the traits defined here, which keeps them runnable
//! against real displays and against the deterministic runtime in
//! `cadence-testing` alike.

pub mod clock;
pub mod platform;

pub use clock::StdClock;
pub use platform::{FrameCallback, FrameSource, MonotonicClock, Task, TaskRunner};

/// Nanoseconds per microsecond.
pub const NANOS_PER_MICRO: u64 = 1_000;
/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
/// Nanoseconds per second.
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Truncating nanosecond → microsecond conversion.
pub fn nanos_to_micros(nanos: u64) -> u64 {
    nanos / NANOS_PER_MICRO
}

/// Truncating nanosecond → millisecond conversion.
pub fn nanos_to_millis(nanos: u64) -> u64 {
    nanos / NANOS_PER_MILLI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_truncate() {
        assert_eq!(nanos_to_micros(16_666_999), 16_666);
        assert_eq!(nanos_to_millis(16_666_999), 16);
        assert_eq!(nanos_to_millis(999_999), 0);
    }
}
