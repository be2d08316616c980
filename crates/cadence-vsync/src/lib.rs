//! Display pulse delivery for Cadence.
//!
//! [`VsyncMonitor`] turns whichever timing primitive the host exposes
//! (a hardware frame-callback source or a plain deferred-task queue)
//! into a bounded stream of vertical-sync pulses for a single listener.

pub mod monitor;
mod schedule;

pub use monitor::{
    VsyncListener, VsyncMonitor, DEFAULT_REFRESH_RATE_HZ, MAX_AUTO_UPDATES,
};
