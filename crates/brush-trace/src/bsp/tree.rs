//! BSP tree container and construction.

use log::{debug, info};
use nalgebra::Point3;

use crate::{Brush, BuildConfig, Classification};

use super::node::{BrushId, BspNode};
use super::selector::{LeastStraddling, PlaneSelector};
use super::visitor::{walk_node, BspVisitor, FnVisitor};

/// A Binary Space Partitioning tree over convex brushes.
///
/// The tree owns the brushes in an arena; leaves refer to them by
/// [`BrushId`]. Internal nodes split space with a plane taken from one of the
/// brush faces. Brushes are never clipped: a brush straddling a split plane
/// is referenced from both subtrees, and traces re-test it against its own
/// planes once they reach a leaf.
///
/// # Construction
///
/// ```ignore
/// use brush_trace::{BspTree, Brush, BuildConfig, FirstPlane};
///
/// let brushes: Vec<Brush> = /* ... */;
/// let tree = BspTree::build(brushes, &FirstPlane, &BuildConfig::default());
/// ```
///
/// The tree is immutable once built, so it can be shared between threads
/// and traced concurrently.
#[derive(Debug, Clone)]
pub struct BspTree {
    brushes: Vec<Brush>,
    root: BspNode,
}

impl BspTree {
    /// Creates a tree with no brushes: a single empty leaf.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            root: BspNode::leaf(0, Vec::new()),
        }
    }

    /// Builds a BSP tree from a collection of brushes.
    ///
    /// Uses the provided [`PlaneSelector`] to choose splitting planes and
    /// `config` to bound depth and leaf size. Brushes without polygons stay
    /// in the arena (their ids remain valid) but are never placed in a leaf.
    pub fn build<S: PlaneSelector>(brushes: Vec<Brush>, selector: &S, config: &BuildConfig) -> Self {
        let set: Vec<BrushId> = brushes
            .iter()
            .enumerate()
            .filter(|(_, brush)| !brush.is_empty())
            .map(|(id, _)| id)
            .collect();

        if set.len() < brushes.len() {
            debug!("skipping {} brushes without faces", brushes.len() - set.len());
        }

        let mut builder = Builder {
            arena: &brushes,
            selector,
            config,
            next_id: 0,
        };
        let root = builder.build_node(set, 0);

        let tree = Self { brushes, root };
        info!(
            "built BSP tree: {} brushes, {} nodes, {} leaves, depth {}",
            tree.brushes.len(),
            tree.node_count(),
            tree.leaf_count(),
            tree.depth()
        );
        tree
    }

    /// Builds a BSP tree using [`LeastStraddling`] and the default [`BuildConfig`].
    pub fn from_brushes(brushes: Vec<Brush>) -> Self {
        Self::build(brushes, &LeastStraddling::default(), &BuildConfig::default())
    }

    /// Returns `true` if the tree holds no brushes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Returns the root node. Always present, a leaf for trivial trees.
    #[inline]
    pub fn root(&self) -> &BspNode {
        &self.root
    }

    /// Returns the brush arena.
    #[inline]
    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    /// Returns the brush behind a handle.
    #[inline]
    pub fn brush(&self, id: BrushId) -> Option<&Brush> {
        self.brushes.get(id)
    }

    /// Returns the maximum depth of the tree (1 for a single leaf).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Returns the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Finds the leaf whose volume contains `point`.
    ///
    /// Points on a split plane go to the front side.
    pub fn find_leaf(&self, point: Point3<f32>) -> &BspNode {
        let mut node = &self.root;
        while let Some(plane) = node.plane() {
            let side = if plane.signed_distance(point) >= 0.0 { 0 } else { 1 };
            match node.child(side) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// Walks every node in pre-order (parents first, front before back).
    pub fn walk<V: BspVisitor>(&self, visitor: &mut V) {
        walk_node(&self.root, 0, visitor);
    }

    /// Renders the tree as indented text, one node per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let mut visitor = FnVisitor::new(|node: &BspNode, depth| {
            let indent = "  ".repeat(depth);
            let line = match node.plane() {
                Some(plane) => format!(
                    "{indent}node {} split normal ({}, {}, {}) distance {}\n",
                    node.id(),
                    plane.normal().x,
                    plane.normal().y,
                    plane.normal().z,
                    plane.distance()
                ),
                None => format!("{indent}leaf {} brushes {:?}\n", node.id(), node.brushes()),
            };
            out.push_str(&line);
        });
        self.walk(&mut visitor);
        out
    }
}

impl Default for BspTree {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared across the recursive build.
struct Builder<'a, S> {
    arena: &'a [Brush],
    selector: &'a S,
    config: &'a BuildConfig,
    next_id: usize,
}

impl<S: PlaneSelector> Builder<'_, S> {
    /// Recursively builds a BSP node from a set of brushes.
    fn build_node(&mut self, set: Vec<BrushId>, depth: usize) -> BspNode {
        // Ids are handed out before the children are built (pre-order).
        let id = self.next_id;
        self.next_id += 1;

        if set.len() <= self.config.max_leaf_brushes || depth >= self.config.max_depth {
            return BspNode::leaf(id, set);
        }

        let Some(plane) = self.selector.select(self.arena, &set) else {
            debug!("node {id}: no distinguishing plane for {} brushes", set.len());
            return BspNode::leaf(id, set);
        };

        let mut front_list = Vec::new();
        let mut back_list = Vec::new();

        for brush_id in set {
            match self.arena[brush_id].classify(&plane) {
                Classification::Front => front_list.push(brush_id),
                Classification::Back => back_list.push(brush_id),
                Classification::Spanning | Classification::Coplanar => {
                    front_list.push(brush_id);
                    back_list.push(brush_id);
                }
            }
        }

        debug!(
            "node {id}: split normal {:?} distance {} -> {} front, {} back",
            plane.normal(),
            plane.distance(),
            front_list.len(),
            back_list.len()
        );

        let front = self.build_node(front_list, depth + 1);
        let back = self.build_node(back_list, depth + 1);
        BspNode::split(id, plane, front, back)
    }
}
