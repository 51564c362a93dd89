//! Tree construction settings.

/// Limits applied while partitioning brushes into a tree.
///
/// ```ignore
/// use brush_trace::BuildConfig;
///
/// let config = BuildConfig::default().with_max_depth(12).with_max_leaf_brushes(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Nodes at this depth (root = 0) become leaves regardless of their contents.
    pub max_depth: usize,
    /// Brush sets of this size or smaller become leaves without further splitting.
    pub max_leaf_brushes: usize,
}

impl BuildConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
    pub const DEFAULT_MAX_LEAF_BRUSHES: usize = 1;

    /// Sets the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the leaf size at which splitting stops.
    pub fn with_max_leaf_brushes(mut self, max_leaf_brushes: usize) -> Self {
        self.max_leaf_brushes = max_leaf_brushes;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_leaf_brushes: Self::DEFAULT_MAX_LEAF_BRUSHES,
        }
    }
}
