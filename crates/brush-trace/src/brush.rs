//! Convex solids bounded by polygon half-spaces.

use log::debug;
use nalgebra::Point3;

use crate::polygon::classify_points;
use crate::{Classification, Plane3D, Polygon, Quad};

/// A convex solid: the intersection of the half-spaces behind each of its
/// polygons' planes.
///
/// Convexity is the caller's responsibility. Faces whose normal cannot be
/// derived are dropped on insertion, so a brush built from sloppy input may
/// end up with fewer planes than faces, or none at all. A brush without
/// polygons never blocks anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brush {
    polygons: Vec<Polygon>,
    /// One flag per polygon, reserved for partitioning bookkeeping.
    used: Vec<bool>,
}

impl Brush {
    /// Creates a brush with no polygons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a brush from producer-supplied quads, dropping degenerate ones.
    pub fn from_quads<'a, I>(quads: I) -> Self
    where
        I: IntoIterator<Item = &'a Quad>,
    {
        let mut brush = Self::new();
        for quad in quads {
            brush.add_polygon(quad.into());
        }
        brush
    }

    /// Builds the polygon for one face and appends it.
    ///
    /// Returns `false` (and keeps the brush unchanged) if the face is
    /// degenerate.
    pub fn add_polygon(&mut self, vertices: Vec<Point3<f32>>) -> bool {
        match Polygon::from_vertices(vertices) {
            Some(polygon) => {
                debug!(
                    "brush face normal {:?} distance {}",
                    polygon.normal(),
                    polygon.plane().distance()
                );
                self.polygons.push(polygon);
                self.used.push(false);
                true
            }
            None => {
                debug!("dropping degenerate brush face");
                false
            }
        }
    }

    /// Returns the polygons bounding this brush.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Iterates over the bounding planes.
    pub fn planes(&self) -> impl Iterator<Item = &Plane3D> {
        self.polygons.iter().map(Polygon::plane)
    }

    /// Iterates over every polygon vertex (shared corners appear once per face).
    pub fn vertices(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.polygons.iter().flat_map(|p| p.vertices().iter().copied())
    }

    /// Returns the number of polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Returns true if every face was degenerate (or none were added).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Returns the bookkeeping flag of polygon `index`.
    #[inline]
    pub fn is_used(&self, index: usize) -> bool {
        self.used.get(index).copied().unwrap_or(false)
    }

    /// Returns `true` if `point` is behind or on every bounding plane.
    ///
    /// An empty brush contains nothing.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        !self.is_empty() && self.planes().all(|plane| plane.signed_distance(point) <= 0.0)
    }

    /// Classifies the brush's vertices against a plane.
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        classify_points(self.vertices(), plane)
    }

    /// Computes the axis-aligned bounds of the brush's vertices.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut vertices = self.vertices();
        let first = vertices.next()?;
        Some(vertices.fold((first, first), |(min, max), v| (min.inf(&v), max.sup(&v))))
    }
}
