//! Demo worlds to trace against.

use brush_trace::shapes::{cube_quads, ramp_quads, RampRise};
use brush_trace::Brush;
use clap::ValueEnum;
use nalgebra::Point3;

/// Which demo world to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scene {
    /// Walled floor with a block in the middle.
    Arena,
    /// The middle block on its own.
    Single,
    /// A floor with a ramp rising towards +z.
    Ramp,
}

impl Scene {
    pub fn brushes(self) -> Vec<Brush> {
        match self {
            Scene::Arena => arena(),
            Scene::Single => vec![middle_block()],
            Scene::Ramp => vec![
                floor(),
                ramp(p(-50.0, 0.0, -50.0), p(50.0, 50.0, 50.0), RampRise::PosZ),
                block(p(50.0, 0.0, -50.0), p(51.0, 50.0, 50.0)),
            ],
        }
    }
}

fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
    Point3::new(x, y, z)
}

fn block(min: Point3<f32>, max: Point3<f32>) -> Brush {
    Brush::from_quads(&cube_quads(min, max))
}

fn ramp(min: Point3<f32>, max: Point3<f32>, rise: RampRise) -> Brush {
    Brush::from_quads(&ramp_quads(min, max, rise))
}

fn floor() -> Brush {
    block(p(-200.0, -25.0, -200.0), p(200.0, 0.0, 200.0))
}

fn middle_block() -> Brush {
    block(p(-50.0, 0.0, -50.0), p(50.0, 50.0, 50.0))
}

fn arena() -> Vec<Brush> {
    vec![
        floor(),
        // walls
        block(p(-200.0, 0.0, -200.0), p(200.0, 100.0, -175.0)),
        block(p(-200.0, 0.0, -200.0), p(-175.0, 100.0, 200.0)),
        block(p(-200.0, 0.0, 175.0), p(200.0, 100.0, 200.0)),
        block(p(175.0, 0.0, -200.0), p(200.0, 100.0, 200.0)),
        middle_block(),
    ]
}
