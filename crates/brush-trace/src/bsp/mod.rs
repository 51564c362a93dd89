//! Binary Space Partitioning tree over convex brushes.
//!
//! The tree recursively partitions space with planes taken from brush faces.
//! Leaves reference the brushes occupying their volume, so a swept trace only
//! has to test the brushes of the leaves its path crosses.
//!
//! # Example
//!
//! ```ignore
//! use brush_trace::{BspTree, Brush, LeastStraddling, BuildConfig};
//! use brush_trace::shapes::cube_quads;
//! use nalgebra::Point3;
//!
//! let brushes = vec![Brush::from_quads(&cube_quads(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 10.0, 10.0),
//! ))];
//! let tree = BspTree::build(brushes, &LeastStraddling::default(), &BuildConfig::default());
//! println!("{}", tree.describe());
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: Owns the brush arena and the root node
//! - [`BspNode`]: Split nodes with a plane and two children, or leaves with brush handles
//! - [`PlaneSelector`]: Strategy trait for choosing splitting planes
//! - [`BspVisitor`]: Visitor trait for custom traversal behavior

mod node;
mod selector;
mod tree;
mod visitor;

// Re-export main types
pub use node::{BrushId, BspNode, NodeKind};
pub use selector::{FirstPlane, LeastStraddling, PlaneSelector, SplitStats};
pub use tree::BspTree;
pub use visitor::{BspVisitor, FnVisitor, LeafCollector};
