//! Seam to the external scroll-delta computation.

/// Opaque handle correlating driver queries with one native-side gesture.
pub type GestureHandle = u64;

/// Supplies per-pulse scroll deltas for an active gesture.
///
/// The provider owns gesture progress: the driver only converts deltas
/// into pointer motion and reports back when the release went out.
pub trait ScrollDeltaProvider {
    /// Next scroll delta in device pixels at `scale`; `0.0` means the
    /// gesture holds still this tick.
    fn scroll_delta(&self, handle: GestureHandle, scale: f32) -> f32;

    /// Whether the gesture has run to completion.
    fn is_finished(&self, handle: GestureHandle) -> bool;

    /// One-way notification that the synthetic Up event was injected.
    fn release_sent(&self, handle: GestureHandle);
}
