use std::collections::HashMap;

use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3};

use super::ShapeModel;

impl ShapeModel {
    /// Creates a regular tetrahedron centered at the origin.
    ///
    /// Vertices sit on alternate corners of a cube; faces are wound outward.
    ///
    /// # Errors
    ///
    /// Returns an error if `edge_length` is not a positive finite number.
    pub fn regular_tetrahedron(edge_length: f64) -> Result<Self> {
        check_size("edge_length", edge_length)?;

        // cube corners (±1, ±1, ±1) are 2*sqrt(2) apart
        let s = edge_length / (2.0 * 2.0_f64.sqrt());
        let vertices = vec![
            Point3::new(s, s, s),
            Point3::new(s, -s, -s),
            Point3::new(-s, s, -s),
            Point3::new(-s, -s, s),
        ];
        let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

        Self::new(vertices, faces)
    }

    /// Creates a geodesic sphere centered at the origin.
    ///
    /// Starts from an icosahedron and splits every triangle into four
    /// `subdivisions` times, pushing new vertices out to `radius`. The result
    /// has `20 * 4^subdivisions` faces.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not a positive finite number.
    pub fn icosphere(radius: f64, subdivisions: u32) -> Result<Self> {
        check_size("radius", radius)?;

        let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let mut directions: Vec<Vector3> = [
            (-1.0, t, 0.0),
            (1.0, t, 0.0),
            (-1.0, -t, 0.0),
            (1.0, -t, 0.0),
            (0.0, -1.0, t),
            (0.0, 1.0, t),
            (0.0, -1.0, -t),
            (0.0, 1.0, -t),
            (t, 0.0, -1.0),
            (t, 0.0, 1.0),
            (-t, 0.0, -1.0),
            (-t, 0.0, 1.0),
        ]
        .iter()
        .map(|&(x, y, z)| Vector3::new(x, y, z).normalize())
        .collect();

        let mut faces: Vec<[usize; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
            let mut midpoint = |i: usize, j: usize, directions: &mut Vec<Vector3>| {
                *midpoints.entry((i.min(j), i.max(j))).or_insert_with(|| {
                    let mid = (directions[i] + directions[j]).normalize();
                    directions.push(mid);
                    directions.len() - 1
                })
            };

            let mut refined = Vec::with_capacity(faces.len() * 4);
            for &[a, b, c] in &faces {
                let ab = midpoint(a, b, &mut directions);
                let bc = midpoint(b, c, &mut directions);
                let ca = midpoint(c, a, &mut directions);
                refined.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
            }
            faces = refined;
        }

        let vertices = directions
            .into_iter()
            .map(|d| Point3::from(d * radius))
            .collect();

        Self::new(vertices, faces)
    }
}

fn check_size(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MeshError::InvalidParameter(format!("{name} must be positive, got {value}")).into())
    }
}
