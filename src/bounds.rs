use glam::DVec3;

/// Coordinate axis of a 3D point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis into a `DVec3` (0 = X, 1 = Y, 2 = Z).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis with the largest component of `extent`.
    ///
    /// Ties are resolved in the order X, Y, Z.
    pub fn largest(extent: DVec3) -> Axis {
        if extent.x >= extent.y && extent.x >= extent.z {
            Axis::X
        } else if extent.y >= extent.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Reads the component of `v` along this axis.
    pub fn of(self, v: DVec3) -> f64 {
        v[self.index()]
    }
}

/// Axis-aligned bounding box in 3D space.
///
/// Size, half size and center are derived from the two corners whenever they
/// are read, so mutating either corner keeps them consistent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    min: DVec3,
    max: DVec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::ZERO)
    }
}

impl BoundingBox {
    /// A box containing nothing. Expanding it by a point yields that point.
    pub const EMPTY: BoundingBox = BoundingBox {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };

    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from its six scalar bounds.
    pub fn from_coords(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self::new(DVec3::new(min_x, min_y, min_z), DVec3::new(max_x, max_y, max_z))
    }

    /// Creates a box centred on `center` with the given half extent on every axis.
    pub fn from_center(center: DVec3, half_size: DVec3) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    /// Cube of half extent `distance` around `center`.
    pub fn cube(center: DVec3, distance: f64) -> Self {
        Self::from_center(center, DVec3::splat(distance))
    }

    /// Smallest box enclosing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[DVec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut bounds = Self::EMPTY;
        for &p in points {
            bounds.expand(p);
        }
        Some(bounds)
    }

    pub fn min(&self) -> DVec3 {
        self.min
    }

    pub fn max(&self) -> DVec3 {
        self.max
    }

    pub fn set_min(&mut self, min: DVec3) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: DVec3) {
        self.max = max;
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Resizes the box, keeping the min corner fixed.
    pub fn set_size(&mut self, size: DVec3) {
        self.max = self.min + size;
    }

    pub fn half_size(&self) -> DVec3 {
        self.size() / 2.0
    }

    pub fn center(&self) -> DVec3 {
        (self.max + self.min) / 2.0
    }

    /// True if `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Grows the box to include `point`.
    pub fn expand(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Inclusive point containment on all three axes.
    pub fn contains(&self, point: DVec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Separating-axis overlap test, inclusive on the boundaries.
    pub fn intersects_box(&self, other: &BoundingBox) -> bool {
        self.max.x >= other.min.x && self.min.x <= other.max.x &&
        self.max.y >= other.min.y && self.min.y <= other.max.y &&
        self.max.z >= other.min.z && self.min.z <= other.max.z
    }
}
