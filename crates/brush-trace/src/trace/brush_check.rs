//! Swept box against a single convex brush.

use nalgebra::Point3;

use crate::bsp::BrushId;
use crate::Brush;

use super::{TraceBox, TraceResult, DIST_EPSILON};

/// Clips the segment `start..end`, swept by `trace_box`, against `brush`.
///
/// Each face plane is pushed out by the box corner that would touch it first,
/// which turns the box sweep into a point sweep against an expanded brush.
/// The segment enters the brush at the latest entering plane and leaves at
/// the earliest leaving plane; a hit is recorded only when it enters before
/// it leaves and earlier than anything found so far.
///
/// A segment that starts inside the brush never moves `time_fraction`: it
/// only clears `starts_out`, and sets `all_solid` when the end is inside too.
pub(crate) fn check_brush(
    brush: &Brush,
    id: BrushId,
    start: Point3<f32>,
    end: Point3<f32>,
    trace_box: &TraceBox,
    result: &mut TraceResult,
) {
    if brush.is_empty() {
        return;
    }

    let mut enter_fraction = -1.0_f32;
    let mut leave_fraction = 1.0_f32;
    let mut clip_plane = None;
    let mut starts_out = false;
    let mut ends_out = false;

    for plane in brush.planes() {
        let offset = trace_box.corner_offset(plane);
        let start_dist = plane.signed_distance(start + offset);
        let end_dist = plane.signed_distance(end + offset);

        if start_dist > 0.0 {
            starts_out = true;
        }
        if end_dist > 0.0 {
            ends_out = true;
        }

        // Completely in front of this face, so outside the brush.
        if start_dist > 0.0 && end_dist > 0.0 {
            return;
        }
        // Completely behind this face.
        if start_dist <= 0.0 && end_dist <= 0.0 {
            continue;
        }

        if start_dist > end_dist {
            let fraction = (start_dist - DIST_EPSILON) / (start_dist - end_dist);
            if fraction > enter_fraction {
                enter_fraction = fraction;
                clip_plane = Some(*plane);
            }
        } else {
            let fraction = (start_dist + DIST_EPSILON) / (start_dist - end_dist);
            if fraction < leave_fraction {
                leave_fraction = fraction;
            }
        }
    }

    if !starts_out {
        result.starts_out = false;
        if !ends_out {
            result.all_solid = true;
        }
        return;
    }

    if enter_fraction < leave_fraction && enter_fraction < result.time_fraction {
        if let Some(plane) = clip_plane {
            result.time_fraction = enter_fraction.max(0.0);
            result.plane = plane;
            result.brush = Some(id);
        }
    }
}
