/// Build limits of a [`KdTree`](crate::KdTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    /// A node holding more indices than this is split further.
    pub max_leaf_size: usize,
    /// Nodes at this depth are never split, whatever their size.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: 100,
            max_depth: 25,
        }
    }
}

impl TreeConfig {
    pub fn new(max_leaf_size: usize, max_depth: usize) -> Self {
        Self { max_leaf_size, max_depth }
    }

    pub fn with_max_leaf_size(mut self, max_leaf_size: usize) -> Self {
        self.max_leaf_size = max_leaf_size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
