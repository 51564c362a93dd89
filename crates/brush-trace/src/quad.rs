//! Quad faces as handed over by geometry producers.

use nalgebra::{Point3, Vector3};

use crate::polygon::face_normal;
use crate::Polygon;

/// A flat four-cornered face.
///
/// Corners are stored in winding order. Producers may collapse corners onto
/// each other (a ramp's sloped side collapses two corners into one edge), so
/// a quad is allowed to be a triangle or even fully degenerate. Degenerate
/// quads are filtered out when they are turned into brush polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corners: [Point3<f32>; 4],
}

impl Quad {
    /// Creates a quad from four corners, wound counter-clockwise when seen
    /// from outside the solid.
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, d: Point3<f32>) -> Self {
        Self {
            corners: [a, b, c, d],
        }
    }

    /// Returns the four corners in winding order.
    #[inline]
    pub fn corners(&self) -> &[Point3<f32>; 4] {
        &self.corners
    }

    /// Computes the outward unit normal.
    ///
    /// Returns `None` if the quad is degenerate.
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        face_normal(&self.corners)
    }

    /// Computes the centroid of the four corners.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.corners.iter().map(|p| p.coords).sum();
        Point3::from(sum / 4.0)
    }
}

impl From<Quad> for Vec<Point3<f32>> {
    fn from(quad: Quad) -> Self {
        quad.corners.to_vec()
    }
}

impl From<&Quad> for Vec<Point3<f32>> {
    fn from(quad: &Quad) -> Self {
        quad.corners.to_vec()
    }
}

impl TryFrom<&Quad> for Polygon {
    type Error = Quad;

    /// Fails with the offending quad if it is degenerate.
    fn try_from(quad: &Quad) -> Result<Self, Self::Error> {
        Polygon::from_vertices(quad.into()).ok_or(*quad)
    }
}
