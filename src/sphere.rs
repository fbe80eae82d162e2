use glam::DVec3;

/// Sphere given by a center and a radius.
///
/// The squared radius is cached whenever the radius is assigned.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "SphereParts", into = "SphereParts"))]
pub struct BoundingSphere {
    center: DVec3,
    radius: f64,
    radius_sq: f64,
}

/// Serialized form; the squared radius is rebuilt on load.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SphereParts {
    center: DVec3,
    radius: f64,
}

#[cfg(feature = "serde")]
impl From<SphereParts> for BoundingSphere {
    fn from(parts: SphereParts) -> Self {
        Self::new(parts.center, parts.radius)
    }
}

#[cfg(feature = "serde")]
impl From<BoundingSphere> for SphereParts {
    fn from(sphere: BoundingSphere) -> Self {
        Self { center: sphere.center, radius: sphere.radius }
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new(DVec3::ZERO, 0.0)
    }
}

impl BoundingSphere {
    /// Creates a sphere. Negative radii are clamped to zero.
    pub fn new(center: DVec3, radius: f64) -> Self {
        let mut sphere = Self { center, radius: 0.0, radius_sq: 0.0 };
        sphere.set_radius(radius);
        sphere
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn set_center(&mut self, center: DVec3) {
        self.center = center;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn radius_sq(&self) -> f64 {
        self.radius_sq
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(0.0);
        self.radius_sq = self.radius * self.radius;
    }

    /// True if `point` lies inside or on the sphere.
    pub fn contains(&self, point: DVec3) -> bool {
        self.center.distance_squared(point) <= self.radius_sq
    }

    /// True if the two spheres overlap or touch.
    pub fn intersects_sphere(&self, other: &BoundingSphere) -> bool {
        let radii = self.radius + other.radius;
        self.center.distance_squared(other.center) <= radii * radii
    }
}
