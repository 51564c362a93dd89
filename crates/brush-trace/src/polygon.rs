//! Convex polygon faces and their planes.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Plane3D, PlaneSide};

/// A convex polygon in 3D space: an ordered vertex loop plus the plane it lies on.
///
/// Vertices should be coplanar and wound counter-clockwise when viewed from
/// the front (the side the normal points to, i.e. outside the brush).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f32>>,
    plane: Plane3D,
}

impl Polygon {
    /// Builds a polygon from a vertex loop, deriving its plane.
    ///
    /// Returns `None` if fewer than 3 vertices are given or if no
    /// non-degenerate edge pair exists (see [`face_normal`]).
    pub fn from_vertices(vertices: Vec<Point3<f32>>) -> Option<Self> {
        let normal = face_normal(&vertices)?;
        let plane = Plane3D::from_unit_normal(normal, vertices[0]);
        Some(Self { vertices, plane })
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the plane that this polygon lies on.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the unit normal of the polygon's plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.plane.normal()
    }

    /// Computes the centroid (average of the vertices) of the polygon.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Returns:
    /// - `Front` if all vertices are in front of the plane
    /// - `Back` if all vertices are behind the plane
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        classify_points(self.vertices.iter().copied(), plane)
    }
}

/// Derives the unit normal of a vertex loop.
///
/// Successive edge pairs `(v[i+1] - v[i]) × (v[i+2] - v[i+1])` are tried in
/// order until one normalizes to a finite vector. Zero-length or parallel
/// edges normalize to NaN and are skipped, which lets quads with a collapsed
/// corner (ramps, thin circle segments) still produce a plane.
///
/// Negative zero components are flushed to `0.0`.
pub fn face_normal(vertices: &[Point3<f32>]) -> Option<Vector3<f32>> {
    vertices.windows(3).find_map(|w| {
        let v0 = w[1] - w[0];
        let v1 = w[2] - w[1];
        let normal = v0.cross(&v1).normalize();
        normal
            .iter()
            .all(|c| c.is_finite())
            .then(|| normal.map(|c| if c == 0.0 { 0.0 } else { c }))
    })
}

/// Classifies a set of points against a plane using `PLANE_EPSILON`.
///
/// An empty set counts as coplanar.
pub(crate) fn classify_points<I>(points: I, plane: &Plane3D) -> Classification
where
    I: IntoIterator<Item = Point3<f32>>,
{
    let mut front = 0;
    let mut back = 0;

    for point in points {
        match plane.classify_point(point) {
            PlaneSide::Front => front += 1,
            PlaneSide::Back => back += 1,
            PlaneSide::OnPlane => {}
        }
    }

    match (front, back) {
        (0, 0) => Classification::Coplanar,
        (_, 0) => Classification::Front,
        (0, _) => Classification::Back,
        _ => Classification::Spanning,
    }
}
