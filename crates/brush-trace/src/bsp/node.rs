//! BSP tree node implementation.

use crate::Plane3D;

/// Handle of a brush inside a tree's brush arena.
pub type BrushId = usize;

/// A node in the BSP tree.
///
/// Internal nodes partition space with a splitting plane and always own two
/// children. Leaves own no geometry: they reference the brushes that occupy
/// (or touch) their volume by [`BrushId`], so a brush straddling a split is
/// simply referenced from leaves on both sides.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// Pre-order build index, unique within a tree.
    id: usize,
    kind: NodeKind,
}

/// The two shapes a [`BspNode`] can take.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Internal node.
    Split {
        plane: Plane3D,
        /// Subtree on the positive side of `plane`.
        front: Box<BspNode>,
        /// Subtree on the negative side of `plane`.
        back: Box<BspNode>,
    },
    /// Terminal node with the brushes to test.
    Leaf { brushes: Vec<BrushId> },
}

impl BspNode {
    /// Creates a leaf referencing `brushes`.
    pub fn leaf(id: usize, brushes: Vec<BrushId>) -> Self {
        Self {
            id,
            kind: NodeKind::Leaf { brushes },
        }
    }

    /// Creates an internal node.
    pub fn split(id: usize, plane: Plane3D, front: BspNode, back: BspNode) -> Self {
        Self {
            id,
            kind: NodeKind::Split {
                plane,
                front: Box::new(front),
                back: Box::new(back),
            },
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Returns the splitting plane, or `None` for a leaf.
    #[inline]
    pub fn plane(&self) -> Option<&Plane3D> {
        match &self.kind {
            NodeKind::Split { plane, .. } => Some(plane),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Returns the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.child(0)
    }

    /// Returns the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.child(1)
    }

    /// Returns child `0` (front) or `1` (back).
    pub fn child(&self, side: usize) -> Option<&BspNode> {
        match (&self.kind, side) {
            (NodeKind::Split { front, .. }, 0) => Some(front.as_ref()),
            (NodeKind::Split { back, .. }, 1) => Some(back.as_ref()),
            _ => None,
        }
    }

    /// Returns the brushes referenced by a leaf; empty for internal nodes.
    #[inline]
    pub fn brushes(&self) -> &[BrushId] {
        match &self.kind {
            NodeKind::Leaf { brushes } => brushes.as_slice(),
            NodeKind::Split { .. } => &[],
        }
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Split { front, back, .. } => 1 + front.depth().max(back.depth()),
        }
    }

    /// Returns the number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Split { front, back, .. } => 1 + front.node_count() + back.node_count(),
        }
    }

    /// Returns the number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Split { front, back, .. } => front.leaf_count() + back.leaf_count(),
        }
    }

    /// Returns the total number of brush references held by leaves of this subtree.
    ///
    /// Brushes referenced by several leaves are counted once per leaf.
    pub fn brush_reference_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { brushes } => brushes.len(),
            NodeKind::Split { front, back, .. } => {
                front.brush_reference_count() + back.brush_reference_count()
            }
        }
    }
}
