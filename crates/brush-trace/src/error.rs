//! Errors reported by the trace entry points.

use thiserror::Error;

/// Rejected trace bounds.
///
/// Tracing itself never fails; only the box description handed to
/// [`crate::BspTree::box_trace`] or [`crate::TraceBox::new`] is validated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TraceError {
    /// `mins[axis]` is greater than `maxs[axis]`.
    #[error("trace box is inverted on axis {axis}: min {min} > max {max}")]
    InvertedBounds { axis: usize, min: f32, max: f32 },

    /// A bound is NaN or infinite.
    #[error("trace box bounds must be finite")]
    NonFiniteBounds,
}
