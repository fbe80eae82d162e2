use crate::bounds::BoundingBox;
use crate::config::TreeConfig;
use crate::error::KdTreeError;
use crate::metrics::PointMetrics;
use crate::node::{KdNode, NodeId};
use glam::DVec3;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A k-d tree over a static set of 3D points.
///
/// Points are appended first, then [`build`](KdTree::build) partitions them.
/// Each node splits at the midpoint of its bounding box along its longest
/// axis. Appending points to a built tree discards the partition; it has to
/// be built again before it can be queried.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    pub(crate) points: Vec<DVec3>,
    pub(crate) nodes: Vec<KdNode>,
    pub(crate) root: Option<NodeId>,
    config: TreeConfig,
}

impl KdTree {
    /// Creates an empty tree with the default limits (100 points per leaf, depth 25).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeConfig) -> Self {
        KdTree {
            points: Vec::new(),
            nodes: Vec::new(),
            root: None,
            config,
        }
    }

    /// Creates an empty tree with the given leaf size and depth limits.
    pub fn with_limits(max_leaf_size: usize, max_depth: usize) -> Self {
        Self::with_config(TreeConfig::new(max_leaf_size, max_depth))
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn add_point(&mut self, point: DVec3) {
        self.invalidate();
        self.points.push(point);
    }

    pub fn add_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.add_point(DVec3::new(x, y, z));
    }

    pub fn add_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = DVec3>,
    {
        self.invalidate();
        self.points.extend(points);
    }

    /// Appends points given as `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// Returns the number of points added. A list whose length is not a
    /// multiple of three is rejected without adding anything.
    pub fn add_flat(&mut self, coords: &[f64]) -> Result<usize, KdTreeError> {
        if coords.len() % 3 != 0 {
            return Err(KdTreeError::UnalignedCoordinates(coords.len()));
        }
        self.add_points(coords.chunks_exact(3).map(|c| DVec3::new(c[0], c[1], c[2])));
        Ok(coords.len() / 3)
    }

    /// Appends `count` uniformly distributed points inside `bounds`.
    ///
    /// The seed depends on the number of points already stored, so repeated
    /// calls continue the cloud instead of repeating it.
    pub fn add_random_points(&mut self, count: usize, bounds: &BoundingBox) {
        let mut rng = StdRng::seed_from_u64(get_seed().wrapping_add(self.points.len() as u64));
        let min = bounds.min();
        let size = bounds.size();

        self.invalidate();
        self.points.reserve(count);
        for _ in 0..count {
            let x = min.x + rng.r#gen::<f64>() * size.x;
            let y = min.y + rng.r#gen::<f64>() * size.y;
            let z = min.z + rng.r#gen::<f64>() * size.z;
            self.points.push(DVec3::new(x, y, z));
        }
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Min/max/center/centroid of the stored points.
    pub fn metrics(&self) -> Option<PointMetrics> {
        PointMetrics::from_points(&self.points)
    }

    /// Drops all points and the built partition.
    pub fn clear(&mut self) {
        self.points.clear();
        self.nodes.clear();
        self.root = None;
    }

    /// Partitions all appended points.
    ///
    /// Any previous partition is discarded. Fails if no points were added.
    pub fn build(&mut self) -> Result<(), KdTreeError> {
        if self.points.is_empty() {
            warn!("No points added to the tree, aborting build");
            return Err(KdTreeError::EmptyPointSet);
        }

        self.nodes.clear();
        self.root = None;

        let mut root = KdNode::new(None, 0);
        for (index, &point) in self.points.iter().enumerate() {
            root.add(index, point);
        }
        root.finalize();

        let root_id = NodeId::new(self.nodes.len());
        self.nodes.push(root);
        self.split(root_id, 0);
        self.root = Some(root_id);

        debug!(
            "Built tree over {} points: {} nodes, {} leaves, depth {}",
            self.points.len(),
            self.node_count(),
            self.leaf_count(),
            self.depth()
        );
        Ok(())
    }

    /// Recursively splits `id` until the size or depth limit is reached.
    fn split(&mut self, id: NodeId, depth: usize) {
        let count = self.nodes[id.index()].count();
        if depth >= self.config.max_depth || count <= self.config.max_leaf_size {
            return;
        }

        let indices = self.nodes[id.index()].take_indices();
        for index in indices {
            let point = self.points[index];
            let child = self.get_split_child(id, point);
            self.nodes[child.index()].add(index, point);
        }

        // Children exist: the node held more than `max_leaf_size` indices.
        if let Some(children) = self.nodes[id.index()].children() {
            for child in children {
                self.nodes[child.index()].finalize();
            }
            for child in children {
                self.split(child, depth + 1);
            }
        }
    }

    /// Returns the child of `id` that `point` routes to, allocating the
    /// sibling pair on first use.
    fn get_split_child(&mut self, id: NodeId, point: DVec3) -> NodeId {
        let children = match self.nodes[id.index()].children() {
            Some(children) => children,
            None => {
                let depth = self.nodes[id.index()].depth() + 1;
                let first = NodeId::new(self.nodes.len());
                let second = NodeId::new(self.nodes.len() + 1);

                let mut a = KdNode::new(Some(id), depth);
                let mut b = KdNode::new(Some(id), depth);
                a.set_sibling(second);
                b.set_sibling(first);
                self.nodes.push(a);
                self.nodes.push(b);

                self.nodes[id.index()].set_children([first, second]);
                [first, second]
            }
        };

        let node = &mut self.nodes[id.index()];
        if node.is_stale() {
            node.finalize();
        }
        children[node.side(point)]
    }

    /// Drops a built partition before the point set changes.
    fn invalidate(&mut self) {
        if self.root.take().is_some() {
            warn!("Points added to a built tree, it must be built again before querying");
            self.nodes.clear();
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &KdNode {
        &self.nodes[id.index()]
    }

    /// All nodes of the built tree, the root first.
    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes that hold point indices.
    pub fn leaves(&self) -> impl Iterator<Item = &KdNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Depth of the deepest node, 0 for a single-leaf or unbuilt tree.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(KdNode::depth).max().unwrap_or(0)
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
