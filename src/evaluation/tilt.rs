use crate::math::{KdTree, Point3};

/// Mean and spread of tilt over a neighborhood of surface points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltStatistics {
    /// Mean tilt, degrees.
    pub mean: f64,
    /// Population standard deviation of tilt, degrees.
    pub std_dev: f64,
    /// Number of points in the neighborhood, the center point included.
    pub count: usize,
}

impl TiltStatistics {
    /// Statistics of a set of tilt values. All zero for an empty set.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (count, sum, sum_sq) = values
            .into_iter()
            .fold((0_usize, 0.0, 0.0), |(n, s, s2), t| (n + 1, s + t, s2 + t * t));
        if count == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                count,
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let n = count as f64;
        let mean = sum / n;
        // guard against tiny negative variances from cancellation
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Self {
            mean,
            std_dev: variance.sqrt(),
            count,
        }
    }
}

/// Radius queries of tilt over a fixed point cloud.
#[derive(Debug)]
pub struct TiltNeighborhood<'a> {
    tree: KdTree,
    points: &'a [Point3],
    tilts: &'a [f64],
    radius: f64,
}

impl<'a> TiltNeighborhood<'a> {
    /// Indexes `points` (with their `tilts`, in degrees) for queries of `radius`.
    #[must_use]
    pub fn new(points: &'a [Point3], tilts: &'a [f64], radius: f64) -> Self {
        Self {
            tree: KdTree::build(points),
            points,
            tilts,
            radius,
        }
    }

    /// Tilt statistics over every cloud point within the radius of point `index`.
    #[must_use]
    pub fn statistics(&self, index: usize) -> TiltStatistics {
        let neighbors = self.tree.radius_search(&self.points[index], self.radius);
        TiltStatistics::from_values(neighbors.into_iter().map(|i| self.tilts[i]))
    }
}
