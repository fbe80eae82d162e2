use crate::bounds::{Axis, BoundingBox};
use glam::DVec3;

/// Handle of a node inside the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Panics if the arena outgrows a `u32` index.
    pub(crate) fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node arena exceeds u32::MAX nodes"))
    }

    /// Position of the node in [`KdTree::nodes`](crate::KdTree::nodes).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the k-d tree.
///
/// Nodes are built in two phases. While indices are added the node only
/// tracks a running min/max envelope; [`finalize`](KdNode::finalize) then
/// fixes the bounds, pivot and split axis used for routing and pruning.
#[derive(Clone, Debug)]
pub struct KdNode {
    envelope: BoundingBox,
    bounds: BoundingBox,
    pivot: DVec3,
    split_axis: Axis,
    stale: bool,
    depth: usize,
    parent: Option<NodeId>,
    sibling: Option<NodeId>,
    children: Option<[NodeId; 2]>,
    indices: Vec<usize>,
}

impl KdNode {
    pub(crate) fn new(parent: Option<NodeId>, depth: usize) -> Self {
        KdNode {
            envelope: BoundingBox::EMPTY,
            bounds: BoundingBox::EMPTY,
            pivot: DVec3::ZERO,
            split_axis: Axis::X,
            stale: false,
            depth,
            parent,
            sibling: None,
            children: None,
            indices: Vec::new(),
        }
    }

    /// Adds a point index, growing the envelope to include `point`.
    pub(crate) fn add(&mut self, index: usize, point: DVec3) {
        self.envelope.expand(point);
        self.indices.push(index);
        self.stale = true;
    }

    /// Derives bounds, pivot and split axis from the accumulated envelope.
    pub(crate) fn finalize(&mut self) {
        self.bounds = self.envelope;
        if self.bounds.is_valid() {
            self.pivot = self.bounds.center();
            self.split_axis = Axis::largest(self.bounds.size());
        } else {
            self.pivot = DVec3::ZERO;
            self.split_axis = Axis::X;
        }
        self.stale = false;
    }

    /// Removes and returns the node's indices so they can be handed to the children.
    pub(crate) fn take_indices(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.indices)
    }

    pub(crate) fn set_children(&mut self, children: [NodeId; 2]) {
        self.children = Some(children);
    }

    pub(crate) fn set_sibling(&mut self, sibling: NodeId) {
        self.sibling = Some(sibling);
    }

    /// True if indices were added since the last [`finalize`](KdNode::finalize).
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Child slot a point routes to: 0 if its coordinate on the split axis is
    /// at or above the pivot, 1 otherwise.
    pub fn side(&self, point: DVec3) -> usize {
        if self.split_axis.of(point) >= self.split_axis.of(self.pivot) { 0 } else { 1 }
    }

    /// The child `point` routes to, or `None` if the node was never split.
    pub fn near_child(&self, point: DVec3) -> Option<NodeId> {
        self.children.map(|children| children[self.side(point)])
    }

    /// Box enclosing the node's points. Empty for a node that received none.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Midpoint of [`bounds`](KdNode::bounds).
    pub fn pivot(&self) -> DVec3 {
        self.pivot
    }

    pub fn split_axis(&self) -> Axis {
        self.split_axis
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn sibling(&self) -> Option<NodeId> {
        self.sibling
    }

    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// A leaf holds point indices directly.
    pub fn is_leaf(&self) -> bool {
        !self.indices.is_empty()
    }

    /// An internal node has handed all of its indices to two children.
    pub fn is_internal(&self) -> bool {
        self.indices.is_empty() && self.children.is_some()
    }
}
