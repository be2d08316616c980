//! Synthetic scroll gestures for Cadence.
//!
//! The driver consumes scroll deltas computed elsewhere (behind
//! [`ScrollDeltaProvider`]) and injects pointer events into the host
//! view (behind [`PointerEventSink`]); pacing comes from the outside,
//! typically one advance per `cadence-vsync` pulse.

pub mod driver;
pub mod events;
pub mod provider;

pub use driver::{GesturePhase, ScrollDirection, ScrollGestureDriver};
pub use events::{PointerAction, PointerEventSink, SyntheticPointerEvent};
pub use provider::{GestureHandle, ScrollDeltaProvider};
