use std::cmp::Ordering;

use super::Point3;

/// A point stored in the tree together with its index in the input cloud.
#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    point: Point3,
    idx: usize,
}

#[derive(Debug)]
struct KdNode {
    entry: IndexedPoint,
    split_dim: usize,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

/// Balanced 3D k-d tree for radius queries over a point cloud.
///
/// Immutable once built, so concurrent queries need no locking.
/// Construction is `O(n log² n)`; a radius query visits `O(n^(2/3) + k)` nodes
/// for `k` results.
#[derive(Debug)]
pub struct KdTree {
    root: Option<Box<KdNode>>,
    size: usize,
}

impl KdTree {
    /// Builds a tree over `points`; result indices refer to positions in this slice.
    #[must_use]
    pub fn build(points: &[Point3]) -> Self {
        let mut entries: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(idx, &point)| IndexedPoint { point, idx })
            .collect();

        let size = entries.len();
        let root = Self::build_recursive(&mut entries, 0);

        Self { root, size }
    }

    fn build_recursive(entries: &mut [IndexedPoint], depth: usize) -> Option<Box<KdNode>> {
        if entries.is_empty() {
            return None;
        }

        let dim = depth % 3;
        entries.sort_by(|a, b| {
            a.point[dim]
                .partial_cmp(&b.point[dim])
                .unwrap_or(Ordering::Equal)
        });

        let mid = entries.len() / 2;
        let (left, rest) = entries.split_at_mut(mid);
        let (pivot, right) = rest.split_first_mut()?;

        Some(Box::new(KdNode {
            entry: *pivot,
            split_dim: dim,
            left: Self::build_recursive(left, depth + 1),
            right: Self::build_recursive(right, depth + 1),
        }))
    }

    /// Number of points in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Indices of all points within `radius` of `query` (boundary inclusive),
    /// in ascending index order.
    #[must_use]
    pub fn radius_search(&self, query: &Point3, radius: f64) -> Vec<usize> {
        let mut results = Vec::new();
        if let Some(root) = &self.root {
            Self::radius_search_recursive(root, query, radius * radius, &mut results);
        }
        results.sort_unstable();
        results
    }

    fn radius_search_recursive(
        node: &KdNode,
        query: &Point3,
        radius_sq: f64,
        results: &mut Vec<usize>,
    ) {
        if (node.entry.point - query).norm_squared() <= radius_sq {
            results.push(node.entry.idx);
        }

        let dim = node.split_dim;
        let diff = query[dim] - node.entry.point[dim];

        let (near, far) = if diff < 0.0 {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(child) = near {
            Self::radius_search_recursive(child, query, radius_sq, results);
        }

        // Far side only matters if the splitting plane is within reach
        if diff * diff <= radius_sq {
            if let Some(child) = far {
                Self::radius_search_recursive(child, query, radius_sq, results);
            }
        }
    }
}
