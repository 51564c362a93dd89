//! Swept axis-aligned box traces against a [`BspTree`].
//!
//! A trace moves a box (or a single point) along the segment `start..end` and
//! reports how far it gets before touching a brush. The walk visits only the
//! leaves the swept volume overlaps, near side first, and stops descending
//! into pieces of the segment that lie beyond the nearest hit found so far.
//!
//! ```ignore
//! use brush_trace::{BspTree, TraceBox};
//! use nalgebra::Point3;
//!
//! let tree: BspTree = /* ... */;
//! let result = tree.box_trace(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 100.0),
//!     Point3::new(-16.0, -24.0, -16.0),
//!     Point3::new(16.0, 32.0, 16.0),
//! )?;
//! if result.hit() {
//!     println!("blocked at {:?} by {:?}", result.end_pos, result.plane);
//! }
//! ```

mod brush_check;
mod hull;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bsp::BrushId;
use crate::{BspTree, Plane3D, TraceError};

use hull::HullWalker;

/// Distance kept between a traced box and the faces it stops against.
pub const DIST_EPSILON: f32 = 0.03125;

/// The box swept by a trace, relative to its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceBox {
    mins: Point3<f32>,
    maxs: Point3<f32>,
    extents: Vector3<f32>,
    is_point: bool,
}

impl TraceBox {
    /// Validates the bounds and derives the box extents.
    ///
    /// # Errors
    /// [`TraceError::NonFiniteBounds`] if any bound is NaN or infinite,
    /// [`TraceError::InvertedBounds`] if `mins` exceeds `maxs` on some axis.
    pub fn new(mins: Point3<f32>, maxs: Point3<f32>) -> Result<Self, TraceError> {
        if !mins.iter().chain(maxs.iter()).all(|v| v.is_finite()) {
            return Err(TraceError::NonFiniteBounds);
        }
        if let Some(axis) = (0..3).find(|&axis| mins[axis] > maxs[axis]) {
            return Err(TraceError::InvertedBounds {
                axis,
                min: mins[axis],
                max: maxs[axis],
            });
        }

        let is_point = mins == maxs;
        let extents = if is_point {
            Vector3::zeros()
        } else {
            (-mins.coords).sup(&maxs.coords)
        };

        Ok(Self {
            mins,
            maxs,
            extents,
            is_point,
        })
    }

    /// A zero-size box: the trace follows a line.
    pub fn point() -> Self {
        Self {
            mins: Point3::origin(),
            maxs: Point3::origin(),
            extents: Vector3::zeros(),
            is_point: true,
        }
    }

    /// A box reaching `half_extents` from its centre in every direction.
    pub fn centered(half_extents: Vector3<f32>) -> Result<Self, TraceError> {
        Self::new(Point3::from(-half_extents), Point3::from(half_extents))
    }

    #[inline]
    pub fn mins(&self) -> Point3<f32> {
        self.mins
    }

    #[inline]
    pub fn maxs(&self) -> Point3<f32> {
        self.maxs
    }

    /// Largest reach from the centre along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f32> {
        self.extents
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.is_point
    }

    /// The box corner that reaches furthest behind `plane`, relative to the centre.
    pub(crate) fn corner_offset(&self, plane: &Plane3D) -> Vector3<f32> {
        let normal = plane.normal();
        let pick = |axis: usize| {
            if normal[axis] < 0.0 {
                self.maxs[axis]
            } else {
                self.mins[axis]
            }
        };
        Vector3::new(pick(0), pick(1), pick(2))
    }
}

impl Default for TraceBox {
    fn default() -> Self {
        Self::point()
    }
}

/// Outcome of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceResult {
    /// Portion of the segment travelled, in `[0, 1]`. `1` means unobstructed.
    pub time_fraction: f32,
    /// Where the box centre stopped.
    pub end_pos: Point3<f32>,
    /// `false` if the start position was inside some brush.
    pub starts_out: bool,
    /// `true` if the whole segment lies inside a single brush.
    pub all_solid: bool,
    /// The face that stopped the trace, or [`Plane3D::none`].
    pub plane: Plane3D,
    /// The brush that stopped the trace.
    pub brush: Option<BrushId>,
}

impl TraceResult {
    pub(crate) fn unobstructed(end: Point3<f32>) -> Self {
        Self {
            time_fraction: 1.0,
            end_pos: end,
            starts_out: true,
            all_solid: false,
            plane: Plane3D::none(),
            brush: None,
        }
    }

    /// Returns `true` if the box was stopped before reaching the end.
    #[inline]
    pub fn hit(&self) -> bool {
        self.time_fraction < 1.0
    }
}

impl BspTree {
    /// Sweeps `trace_box` from `start` to `end`.
    pub fn trace(&self, start: Point3<f32>, end: Point3<f32>, trace_box: &TraceBox) -> TraceResult {
        HullWalker::new(self, trace_box, start, end).run()
    }

    /// Sweeps the box `mins..maxs` (relative to its centre) from `start` to `end`.
    ///
    /// Pass equal `mins` and `maxs` to trace a point.
    ///
    /// # Errors
    /// Returns a [`TraceError`] if the bounds are inverted or not finite.
    pub fn box_trace(
        &self,
        start: Point3<f32>,
        end: Point3<f32>,
        mins: Point3<f32>,
        maxs: Point3<f32>,
    ) -> Result<TraceResult, TraceError> {
        let trace_box = TraceBox::new(mins, maxs)?;
        Ok(self.trace(start, end, &trace_box))
    }

    /// Traces every `(start, end)` segment with the same box.
    #[cfg(not(feature = "parallel"))]
    pub fn trace_batch(&self, segments: &[(Point3<f32>, Point3<f32>)], trace_box: &TraceBox) -> Vec<TraceResult> {
        segments
            .iter()
            .map(|&(start, end)| self.trace(start, end, trace_box))
            .collect()
    }

    /// Traces every `(start, end)` segment with the same box, in parallel.
    #[cfg(feature = "parallel")]
    pub fn trace_batch(&self, segments: &[(Point3<f32>, Point3<f32>)], trace_box: &TraceBox) -> Vec<TraceResult> {
        segments
            .par_iter()
            .map(|&(start, end)| self.trace(start, end, trace_box))
            .collect()
    }
}
