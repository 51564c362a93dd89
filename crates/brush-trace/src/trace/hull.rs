//! Recursive descent of a swept box through the tree.

use log::trace;
use nalgebra::Point3;

use crate::bsp::{BrushId, BspNode, NodeKind};
use crate::{BspTree, Plane3D, PLANE_EPSILON};

use super::brush_check::check_brush;
use super::{TraceBox, TraceResult, DIST_EPSILON};

/// Per-trace state. Lives for one call, so the tree itself stays shared.
pub(crate) struct HullWalker<'a> {
    tree: &'a BspTree,
    trace_box: &'a TraceBox,
    trace_start: Point3<f32>,
    trace_end: Point3<f32>,
    result: TraceResult,
}

impl<'a> HullWalker<'a> {
    pub(crate) fn new(
        tree: &'a BspTree,
        trace_box: &'a TraceBox,
        trace_start: Point3<f32>,
        trace_end: Point3<f32>,
    ) -> Self {
        Self {
            tree,
            trace_box,
            trace_start,
            trace_end,
            result: TraceResult::unobstructed(trace_end),
        }
    }

    /// Walks the whole segment from the root and returns the finished result.
    pub(crate) fn run(mut self) -> TraceResult {
        let tree = self.tree;
        let (start, end) = (self.trace_start, self.trace_end);
        self.check_node(tree.root(), 0.0, 1.0, start, end);

        let fraction = self.result.time_fraction;
        self.result.end_pos = if fraction == 1.0 {
            end
        } else {
            start + (end - start) * fraction
        };
        self.result
    }

    /// Traces the piece `start..end` of the segment, covering fractions
    /// `start_fraction..end_fraction`, through `node`.
    fn check_node(
        &mut self,
        node: &BspNode,
        start_fraction: f32,
        end_fraction: f32,
        start: Point3<f32>,
        end: Point3<f32>,
    ) {
        // Already hit something closer than this piece.
        if self.result.time_fraction <= start_fraction {
            return;
        }

        trace!(
            "node {} fractions {start_fraction}..{end_fraction}",
            node.id()
        );

        let (plane, front, back) = match node.kind() {
            NodeKind::Leaf { brushes } => {
                self.check_leaf(brushes);
                return;
            }
            NodeKind::Split { plane, front, back } => (plane, front.as_ref(), back.as_ref()),
        };

        let start_dist = plane.signed_distance(start);
        let end_dist = plane.signed_distance(end);
        // Brushes within PLANE_EPSILON of the plane may sit on one side
        // only, so a box grazing the plane must visit both children.
        let offset = self.hull_offset(plane) + PLANE_EPSILON;

        if start_dist > offset && end_dist > offset {
            self.check_node(front, start_fraction, end_fraction, start, end);
            return;
        }
        if start_dist < -offset && end_dist < -offset {
            self.check_node(back, start_fraction, end_fraction, start, end);
            return;
        }

        // The swept box touches both sides: split the piece, nudged by the
        // epsilon so both halves overlap the plane.
        let (near_is_back, frac1, frac2) = if start_dist < end_dist {
            let inv = 1.0 / (start_dist - end_dist);
            (
                true,
                (start_dist - offset + DIST_EPSILON) * inv,
                (start_dist + offset + DIST_EPSILON) * inv,
            )
        } else if start_dist > end_dist {
            let inv = 1.0 / (start_dist - end_dist);
            (
                false,
                (start_dist + offset + DIST_EPSILON) * inv,
                (start_dist - offset - DIST_EPSILON) * inv,
            )
        } else {
            (false, 1.0, 0.0)
        };
        let frac1 = frac1.clamp(0.0, 1.0);
        let frac2 = frac2.clamp(0.0, 1.0);

        let (near, far) = if near_is_back { (back, front) } else { (front, back) };

        let mid_fraction = start_fraction + (end_fraction - start_fraction) * frac1;
        let mid = start + (end - start) * frac1;
        self.check_node(near, start_fraction, mid_fraction, start, mid);

        let mid_fraction = start_fraction + (end_fraction - start_fraction) * frac2;
        let mid = start + (end - start) * frac2;
        self.check_node(far, mid_fraction, end_fraction, mid, end);
    }

    /// Tests every brush of a leaf against the full segment.
    fn check_leaf(&mut self, brushes: &[BrushId]) {
        let tree = self.tree;
        for &id in brushes {
            let Some(brush) = tree.brush(id) else {
                continue;
            };
            check_brush(
                brush,
                id,
                self.trace_start,
                self.trace_end,
                self.trace_box,
                &mut self.result,
            );
            if self.result.time_fraction == 0.0 {
                return;
            }
        }
    }

    /// How far the box reaches across `plane` from its centre.
    fn hull_offset(&self, plane: &Plane3D) -> f32 {
        if self.trace_box.is_point() {
            return 0.0;
        }
        let extents = self.trace_box.extents();
        match plane.axis() {
            Some(axis) => extents[axis],
            None => plane.normal().zip_map(&extents, |n, e| (n * e).abs()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::cube_quads;
    use crate::Brush;
    use nalgebra::Vector3;

    fn tree_with_two_cubes() -> BspTree {
        BspTree::from_brushes(vec![
            Brush::from_quads(&cube_quads(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))),
            Brush::from_quads(&cube_quads(Point3::new(5.0, 0.0, 0.0), Point3::new(6.0, 1.0, 1.0))),
        ])
    }

    #[test]
    fn hull_offset_uses_extent_on_axial_planes() {
        let tree = BspTree::new();
        let trace_box = TraceBox::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0)).unwrap();
        let walker = HullWalker::new(&tree, &trace_box, Point3::origin(), Point3::origin());

        assert_eq!(walker.hull_offset(&Plane3D::new(Vector3::y(), 4.0)), 2.0);
        assert_eq!(walker.hull_offset(&Plane3D::new(-Vector3::z(), 4.0)), 3.0);
    }

    #[test]
    fn hull_offset_projects_extents_on_oblique_planes() {
        let tree = BspTree::new();
        let trace_box = TraceBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)).unwrap();
        let walker = HullWalker::new(&tree, &trace_box, Point3::origin(), Point3::origin());

        let plane = Plane3D::new(Vector3::new(1.0, 1.0, 0.0), 0.0);
        approx::assert_relative_eq!(walker.hull_offset(&plane), 2.0_f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn point_trace_has_no_offset() {
        let tree = BspTree::new();
        let trace_box = TraceBox::point();
        let walker = HullWalker::new(&tree, &trace_box, Point3::origin(), Point3::origin());
        assert_eq!(walker.hull_offset(&Plane3D::new(Vector3::x(), 0.0)), 0.0);
    }

    #[test]
    fn crossing_split_finds_far_brush() {
        let tree = tree_with_two_cubes();
        let trace_box = TraceBox::point();
        let result = HullWalker::new(
            &tree,
            &trace_box,
            Point3::new(2.0, 0.5, 0.5),
            Point3::new(10.0, 0.5, 0.5),
        )
        .run();

        approx::assert_relative_eq!(result.time_fraction, (3.0 - DIST_EPSILON) / 8.0);
        assert_eq!(result.brush, Some(1));
        assert_eq!(result.plane.normal(), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn walking_backwards_hits_near_brush_first() {
        let tree = tree_with_two_cubes();
        let trace_box = TraceBox::point();
        let result = HullWalker::new(
            &tree,
            &trace_box,
            Point3::new(4.0, 0.5, 0.5),
            Point3::new(-4.0, 0.5, 0.5),
        )
        .run();

        approx::assert_relative_eq!(result.time_fraction, (3.0 - DIST_EPSILON) / 8.0);
        assert_eq!(result.brush, Some(0));
    }
}
