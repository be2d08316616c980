//! Testing utilities and deterministic runtime doubles for Cadence.

pub mod recording;
pub mod runtime;

pub use recording::{RecordingSink, ScriptedDeltaProvider};
pub use runtime::{ManualClock, ManualFrameSource, ManualTaskRunner};
