//! Quad generators for the primitive solids used to populate a world.

use nalgebra::{Point3, Vector3};

use crate::Quad;

/// Direction in which a ramp's sloped top rises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampRise {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

/// The eight corners of an axis-aligned box.
///
/// Index layout: `0..4` is the `max.z` side, `4..8` the `min.z` side; within
/// each side the order is top-left, top-right, bottom-left, bottom-right
/// looking down -z with +y up.
fn box_corners(min: Point3<f32>, max: Point3<f32>) -> [Point3<f32>; 8] {
    [
        Point3::new(min.x, max.y, max.z), // 0
        Point3::new(max.x, max.y, max.z), // 1
        Point3::new(min.x, min.y, max.z), // 2
        Point3::new(max.x, min.y, max.z), // 3
        Point3::new(min.x, max.y, min.z), // 4
        Point3::new(max.x, max.y, min.z), // 5
        Point3::new(min.x, min.y, min.z), // 6
        Point3::new(max.x, min.y, min.z), // 7
    ]
}

/// Faces of the box over `corners`, each wound so its normal points outward.
fn box_faces(c: &[Point3<f32>; 8]) -> [Quad; 6] {
    [
        Quad::new(c[0], c[2], c[3], c[1]), // +z
        Quad::new(c[4], c[0], c[1], c[5]), // +y
        Quad::new(c[4], c[6], c[2], c[0]), // -x
        Quad::new(c[2], c[6], c[7], c[3]), // -y
        Quad::new(c[1], c[3], c[7], c[5]), // +x
        Quad::new(c[5], c[7], c[6], c[4]), // -z
    ]
}

/// Generates the 6 faces of the axis-aligned box spanning `min..max`.
pub fn cube_quads(min: Point3<f32>, max: Point3<f32>) -> [Quad; 6] {
    box_faces(&box_corners(min, max))
}

/// Generates the 6 faces of an axis-aligned box around `center`.
pub fn cube_quads_centered(center: Point3<f32>, half_extents: Vector3<f32>) -> [Quad; 6] {
    cube_quads(center - half_extents, center + half_extents)
}

/// Generates the faces of a ramp filling the box `min..max`.
///
/// The top edge on the low end is dropped onto the bottom, so the top face
/// becomes a slope rising towards `rise`. The face on the low end collapses
/// to a line and the two side faces become triangles; they are still emitted
/// as quads with repeated corners.
pub fn ramp_quads(min: Point3<f32>, max: Point3<f32>, rise: RampRise) -> [Quad; 6] {
    let mut c = box_corners(min, max);
    match rise {
        RampRise::PosZ => {
            c[4] = c[6];
            c[5] = c[7];
        }
        RampRise::NegZ => {
            c[0] = c[2];
            c[1] = c[3];
        }
        RampRise::PosX => {
            c[0] = c[2];
            c[4] = c[6];
        }
        RampRise::NegX => {
            c[5] = c[7];
            c[1] = c[3];
        }
    }
    box_faces(&c)
}
