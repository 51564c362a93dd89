//! Plane representation shared by brushes, split nodes and traces.

use nalgebra::{Point3, Vector3};

/// Default epsilon for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of geometry (polygon, brush) relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All vertices are in front of the plane
    Front,
    /// All vertices are behind the plane
    Back,
    /// All vertices are on the plane (coplanar)
    Coplanar,
    /// Vertices are on both sides (spans the plane)
    Spanning,
}

/// An oriented half-space, represented as `normal · point = distance`.
///
/// A point `p` is in front of the plane when `normal · p - distance > 0`.
/// Brush interiors lie behind every one of their planes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane3D {
    normal: Vector3<f32>,
    distance: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and distance.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            distance: distance / norm,
        }
    }

    /// Creates a plane from an already normalized normal and a point on it.
    ///
    /// No normalization takes place, so the normal keeps its exact bits.
    /// This is how polygon planes are derived.
    pub fn from_unit_normal(normal: Vector3<f32>, point: Point3<f32>) -> Self {
        Self {
            normal,
            distance: normal.dot(&point.coords),
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self::from_unit_normal(normal / norm, point)
    }

    /// The "no plane" value reported by traces that hit nothing.
    ///
    /// It has a zero normal, so every point is at distance zero from it.
    pub fn none() -> Self {
        Self {
            normal: Vector3::zeros(),
            distance: 0.0,
        }
    }

    /// Returns `true` for the [`Plane3D::none`] sentinel.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.normal == Vector3::zeros()
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.distance
    }

    /// Returns the axis index (0 = x, 1 = y, 2 = z) if the plane is
    /// perpendicular to a coordinate axis, facing either way.
    pub fn axis(&self) -> Option<usize> {
        let mut axis = None;
        for (i, component) in self.normal.iter().enumerate() {
            if *component == 0.0 {
                continue;
            }
            if component.abs() != 1.0 || axis.is_some() {
                return None;
            }
            axis = Some(i);
        }
        axis
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Returns `true` if both planes describe the same half-space within `PLANE_EPSILON`.
    pub fn approx_eq(&self, other: &Plane3D) -> bool {
        (self.normal - other.normal).norm() <= PLANE_EPSILON
            && (self.distance - other.distance).abs() <= PLANE_EPSILON
    }
}

impl Default for Plane3D {
    fn default() -> Self {
        Self::none()
    }
}
