use glam::DVec3;

/// Summary statistics of a point list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMetrics {
    pub min: DVec3,
    pub max: DVec3,
    /// Midpoint of the bounding envelope.
    pub center: DVec3,
    /// Mean of all points.
    pub centroid: DVec3,
    /// `max - min`.
    pub range: DVec3,
}

impl PointMetrics {
    /// Computes the metrics, or `None` if `points` is empty.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        let mut sum = DVec3::ZERO;
        for &p in points {
            min = min.min(p);
            max = max.max(p);
            sum += p;
        }

        Some(Self {
            min,
            max,
            center: (max + min) / 2.0,
            centroid: sum / points.len() as f64,
            range: max - min,
        })
    }
}
