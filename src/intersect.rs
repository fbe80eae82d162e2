//! Pairwise intersection tests between bounding volumes.
//!
//! Box–sphere tests follow the classic decomposition from Graphics Gems
//! (Arvo, "A Simple Method for Box-Sphere Intersection Testing"). Only the
//! hollow–hollow and solid–solid combinations are supported.

use crate::bounds::BoundingBox;
use crate::sphere::BoundingSphere;

/// How the two volumes are interpreted by an intersection test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IntersectionMode {
    /// Only the surfaces count: a volume strictly inside the other does not intersect it.
    #[default]
    Hollow,
    /// Any shared volume counts.
    Solid,
}

/// Intersection test between `Self` and another bounding volume `T`.
pub trait Intersects<T> {
    fn intersects(&self, other: &T, mode: IntersectionMode) -> bool;
}

impl Intersects<BoundingBox> for BoundingBox {
    /// Boxes have a single overlap test; `mode` is ignored.
    fn intersects(&self, other: &BoundingBox, _mode: IntersectionMode) -> bool {
        self.intersects_box(other)
    }
}

impl Intersects<BoundingSphere> for BoundingSphere {
    /// Both modes resolve to the same center-distance test.
    fn intersects(&self, other: &BoundingSphere, _mode: IntersectionMode) -> bool {
        self.intersects_sphere(other)
    }
}

impl Intersects<BoundingBox> for BoundingSphere {
    fn intersects(&self, other: &BoundingBox, mode: IntersectionMode) -> bool {
        box_sphere(other, self, mode)
    }
}

impl Intersects<BoundingSphere> for BoundingBox {
    fn intersects(&self, other: &BoundingSphere, mode: IntersectionMode) -> bool {
        box_sphere(self, other, mode)
    }
}

fn box_sphere(aabb: &BoundingBox, sphere: &BoundingSphere, mode: IntersectionMode) -> bool {
    let center = sphere.center();
    let min = aabb.min();
    let max = aabb.max();
    let r2 = sphere.radius_sq();

    match mode {
        IntersectionMode::Hollow => {
            let mut dmin = 0.0;
            let mut dmax = 0.0;
            let mut face = false;
            for i in 0..3 {
                let to_min = center[i] - min[i];
                let to_max = center[i] - max[i];
                let a = to_min * to_min;
                let b = to_max * to_max;
                dmax += a.max(b);
                if center[i] < min[i] {
                    face = true;
                    dmin += a;
                } else if center[i] > max[i] {
                    face = true;
                    dmin += b;
                } else if a.min(b) <= r2 {
                    face = true;
                }
            }
            face && dmin <= r2 && r2 <= dmax
        }
        IntersectionMode::Solid => {
            let mut dmin = 0.0;
            for i in 0..3 {
                let d = if center[i] < min[i] {
                    center[i] - min[i]
                } else if center[i] > max[i] {
                    center[i] - max[i]
                } else {
                    continue;
                };
                dmin += d * d;
            }
            dmin <= r2
        }
    }
}
