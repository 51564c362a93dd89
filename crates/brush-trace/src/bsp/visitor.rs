//! Visitor pattern for BSP tree traversal.
//!
//! Visitors allow custom processing of nodes during a tree walk without
//! coupling traversal logic to specific use cases such as tree dumps.

use super::node::BspNode;

/// Visitor for processing nodes during a pre-order tree walk.
pub trait BspVisitor {
    /// Called once per node, parents before children and front before back.
    ///
    /// `depth` is 0 for the root.
    fn visit(&mut self, node: &BspNode, depth: usize);
}

/// A simple visitor that records the ids of visited leaves.
#[derive(Debug, Default)]
pub struct LeafCollector {
    leaves: Vec<usize>,
}

impl LeafCollector {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected leaf ids.
    pub fn into_leaves(self) -> Vec<usize> {
        self.leaves
    }

    /// Returns a reference to the collected leaf ids.
    pub fn leaves(&self) -> &[usize] {
        &self.leaves
    }
}

impl BspVisitor for LeafCollector {
    fn visit(&mut self, node: &BspNode, _depth: usize) {
        if node.is_leaf() {
            self.leaves.push(node.id());
        }
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F>
where
    F: FnMut(&BspNode, usize),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&BspNode, usize),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(&BspNode, usize),
{
    fn visit(&mut self, node: &BspNode, depth: usize) {
        (self.func)(node, depth);
    }
}

/// Walks `node` and its descendants in pre-order.
pub(crate) fn walk_node<V: BspVisitor>(node: &BspNode, depth: usize, visitor: &mut V) {
    visitor.visit(node, depth);
    if let Some(front) = node.front() {
        walk_node(front, depth + 1, visitor);
    }
    if let Some(back) = node.back() {
        walk_node(back, depth + 1, visitor);
    }
}
