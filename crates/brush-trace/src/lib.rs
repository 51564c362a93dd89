//! Swept-box collision traces over a BSP tree of convex brushes.

pub mod bsp;
mod brush;
mod config;
mod error;
mod plane;
mod polygon;
mod quad;
pub mod shapes;
mod trace;

pub use brush::Brush;
pub use bsp::{BrushId, BspTree, FirstPlane, LeastStraddling, PlaneSelector};
pub use config::BuildConfig;
pub use error::TraceError;
pub use plane::{Classification, Plane3D, PlaneSide, PLANE_EPSILON};
pub use polygon::{face_normal, Polygon};
pub use quad::Quad;
pub use trace::{TraceBox, TraceResult, DIST_EPSILON};
