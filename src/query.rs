use crate::bounds::BoundingBox;
use crate::error::KdTreeError;
use crate::intersect::{IntersectionMode, Intersects};
use crate::kdtree::KdTree;
use crate::node::NodeId;
use crate::sphere::BoundingSphere;
use glam::DVec3;

/// Result of a nearest-point query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Index of the point in insertion order.
    pub index: usize,
    pub point: DVec3,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

/// Shape that bounds a nearest-point search.
///
/// Only points inside the region are candidates, and a subtree is visited
/// only if the region overlaps its bounding box.
pub trait SearchRegion {
    fn contains(&self, point: DVec3) -> bool;

    fn overlaps(&self, bounds: &BoundingBox) -> bool;
}

impl SearchRegion for BoundingBox {
    fn contains(&self, point: DVec3) -> bool {
        BoundingBox::contains(self, point)
    }

    fn overlaps(&self, bounds: &BoundingBox) -> bool {
        bounds.intersects_box(self)
    }
}

impl SearchRegion for BoundingSphere {
    fn contains(&self, point: DVec3) -> bool {
        BoundingSphere::contains(self, point)
    }

    fn overlaps(&self, bounds: &BoundingBox) -> bool {
        bounds.intersects(self, IntersectionMode::Solid)
    }
}

impl KdTree {
    /// Finds the point closest to `point` inside the cube of half extent
    /// `distance` centred on it.
    ///
    /// Returns `Ok(None)` if `distance` is negative or NaN, or if no stored
    /// point lies inside the cube. A distance of 0 finds exactly coincident
    /// points only.
    pub fn find_closest_point(&self, point: DVec3, distance: f64) -> Result<Option<Nearest>, KdTreeError> {
        let root = self.root.ok_or(KdTreeError::NotBuilt)?;
        if !(distance >= 0.0) {
            return Ok(None);
        }
        let region = BoundingBox::cube(point, distance);
        Ok(self.search(root, point, &region))
    }

    /// Finds the point closest to `point` within `radius` of it.
    ///
    /// Pass `f64::INFINITY` for an unconstrained nearest-neighbor query.
    pub fn find_closest_point_in_sphere(&self, point: DVec3, radius: f64) -> Result<Option<Nearest>, KdTreeError> {
        let root = self.root.ok_or(KdTreeError::NotBuilt)?;
        if !(radius >= 0.0) {
            return Ok(None);
        }
        let region = BoundingSphere::new(point, radius);
        Ok(self.search(root, point, &region))
    }

    /// Finds the point closest to `point` among those inside an arbitrary region.
    pub fn find_closest_point_within<R: SearchRegion>(&self, point: DVec3, region: &R) -> Result<Option<Nearest>, KdTreeError> {
        let root = self.root.ok_or(KdTreeError::NotBuilt)?;
        Ok(self.search(root, point, region))
    }

    /// Linear scan over every stored point, O(n). Does not need a built tree.
    ///
    /// Ties go to the lowest index. Points at a NaN distance are skipped.
    /// Returns `None` if no point is at a comparable distance.
    pub fn find_closest_point_brute(&self, point: DVec3) -> Option<Nearest> {
        let mut best: Option<(usize, f64)> = None;
        for (index, p) in self.points.iter().enumerate() {
            let d2 = p.distance_squared(point);
            if d2.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
                best = Some((index, d2));
            }
        }
        best.map(|(index, d2)| self.nearest(index, d2))
    }

    fn search<R: SearchRegion>(&self, id: NodeId, query: DVec3, region: &R) -> Option<Nearest> {
        let node = &self.nodes[id.index()];
        if node.is_leaf() {
            return self.closest_in_leaf(node.indices(), query, region);
        }

        // A node with neither indices nor children received no points.
        let near = node.near_child(query)?;
        let near_result = self.search(near, query, region);

        let far_result = match self.nodes[near.index()].sibling() {
            Some(far) if region.overlaps(self.nodes[far.index()].bounds()) => self.search(far, query, region),
            _ => None,
        };

        match (near_result, far_result) {
            (Some(n), Some(f)) if f.distance < n.distance => Some(f),
            (None, f) => f,
            (n, _) => n,
        }
    }

    fn closest_in_leaf<R: SearchRegion>(&self, indices: &[usize], query: DVec3, region: &R) -> Option<Nearest> {
        let mut best: Option<(usize, f64)> = None;
        for &index in indices {
            let p = self.points[index];
            if !region.contains(p) {
                continue;
            }
            let d2 = p.distance_squared(query);
            if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
                best = Some((index, d2));
            }
        }
        best.map(|(index, d2)| self.nearest(index, d2))
    }

    fn nearest(&self, index: usize, distance_sq: f64) -> Nearest {
        Nearest {
            index,
            point: self.points[index],
            distance: distance_sq.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_tree() -> KdTree {
        let mut tree = KdTree::with_limits(2, 10);
        tree.add_xyz(0.0, 0.0, 0.0);
        tree.add_xyz(1.0, 0.0, 0.0);
        tree.add_xyz(0.0, 1.0, 0.0);
        tree.add_xyz(0.0, 0.0, 1.0);
        tree.add_xyz(5.0, 5.0, 5.0);
        tree.add_xyz(10.0, 10.0, 10.0);
        tree.build().unwrap();
        tree
    }

    #[test]
    fn test_six_point_scenario() {
        let tree = scenario_tree();
        let nearest = tree.find_closest_point(DVec3::new(0.1, 0.0, 0.0), 1.0).unwrap().unwrap();
        assert_eq!(nearest.index, 0);
        assert_eq!(nearest.point, DVec3::ZERO);
        assert!((nearest.distance - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_query_before_build() {
        let mut tree = KdTree::new();
        tree.add_xyz(1.0, 1.0, 1.0);
        assert_eq!(tree.find_closest_point(DVec3::ZERO, 1.0), Err(KdTreeError::NotBuilt));
        assert_eq!(tree.find_closest_point_in_sphere(DVec3::ZERO, 1.0), Err(KdTreeError::NotBuilt));
        // Brute force works on the raw point set.
        assert_eq!(tree.find_closest_point_brute(DVec3::ZERO).unwrap().index, 0);
    }

    #[test]
    fn test_degenerate_regions() {
        let tree = scenario_tree();
        assert_eq!(tree.find_closest_point(DVec3::ZERO, -1.0), Ok(None));
        assert_eq!(tree.find_closest_point(DVec3::ZERO, f64::NAN), Ok(None));
        assert_eq!(tree.find_closest_point_in_sphere(DVec3::ZERO, -0.5), Ok(None));

        // Nothing within 0.5 of (3, 3, 3).
        assert_eq!(tree.find_closest_point(DVec3::splat(3.0), 0.5), Ok(None));
        assert_eq!(tree.find_closest_point_in_sphere(DVec3::splat(3.0), 0.5), Ok(None));
    }

    #[test]
    fn test_zero_distance_is_a_match() {
        let tree = scenario_tree();
        let nearest = tree.find_closest_point(DVec3::splat(5.0), 0.0).unwrap().unwrap();
        assert_eq!(nearest.index, 4);
        assert_eq!(nearest.distance, 0.0);
    }

    #[test]
    fn test_sphere_query_reaches_far_subtree() {
        let tree = scenario_tree();
        // (4, 4, 4) routes to the [5, 10] half but (5, 5, 5) is the answer either way.
        let nearest = tree.find_closest_point_in_sphere(DVec3::splat(4.0), f64::INFINITY).unwrap().unwrap();
        assert_eq!(nearest.index, 4);

        // (2.4, 0, 0) routes to the low half, nearest is (1, 0, 0).
        let nearest = tree.find_closest_point_in_sphere(DVec3::new(2.4, 0.0, 0.0), 10.0).unwrap().unwrap();
        assert_eq!(nearest.index, 1);
    }

    #[test]
    fn test_region_limits_candidates() {
        let tree = scenario_tree();
        // (1, 0, 0) is at distance 0.9 but outside a cube of half extent 0.5 around (0.1, 0, 0).
        let nearest = tree.find_closest_point(DVec3::new(0.1, 0.0, 0.0), 0.5).unwrap().unwrap();
        assert_eq!(nearest.index, 0);

        let region = BoundingBox::from_coords(0.5, -0.5, -0.5, 2.0, 0.5, 0.5);
        let nearest = tree.find_closest_point_within(DVec3::ZERO, &region).unwrap().unwrap();
        assert_eq!(nearest.index, 1);
    }

    #[test]
    fn test_brute_force_ties_take_lowest_index() {
        let mut tree = KdTree::new();
        tree.add_xyz(1.0, 0.0, 0.0);
        tree.add_xyz(-1.0, 0.0, 0.0);
        assert_eq!(tree.find_closest_point_brute(DVec3::ZERO).unwrap().index, 0);
        assert!(KdTree::new().find_closest_point_brute(DVec3::ZERO).is_none());
    }

    #[test]
    fn test_nan_points_are_never_nearest() {
        let mut tree = KdTree::new();
        tree.add_xyz(f64::NAN, 0.0, 0.0);
        tree.add_xyz(1.0, 0.0, 0.0);
        tree.build().unwrap();

        let q = DVec3::new(1.0, 0.0, 0.0);
        let brute = tree.find_closest_point_brute(q).unwrap();
        assert_eq!(brute.index, 1);
        assert_eq!(brute.distance, 0.0);

        let found = tree.find_closest_point_in_sphere(q, f64::INFINITY).unwrap().unwrap();
        assert_eq!(found.index, brute.index);
    }
}
