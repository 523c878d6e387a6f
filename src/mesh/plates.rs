use crate::math::{triangle_centroid, triangle_cross, Point3, Vector3};

use super::ShapeModel;

/// Geometry of one triangular plate (face) of a shape model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    /// Centroid of the plate.
    pub center: Point3,
    /// Unit outward normal. Zero for a zero-area plate.
    pub normal: Vector3,
    /// Plate area, in squared mesh units.
    pub area: f64,
}

pub(super) fn compute_plates(vertices: &[Point3], faces: &[[usize; 3]]) -> Vec<Plate> {
    faces
        .iter()
        .map(|&[a, b, c]| {
            let (a, b, c) = (&vertices[a], &vertices[b], &vertices[c]);
            let cross = triangle_cross(a, b, c);
            Plate {
                center: triangle_centroid(a, b, c),
                normal: cross.try_normalize(0.0).unwrap_or_else(Vector3::zeros),
                area: 0.5 * cross.norm(),
            }
        })
        .collect()
}

impl ShapeModel {
    /// Plate centers, in face order.
    #[must_use]
    pub fn plate_centers(&self) -> Vec<Point3> {
        self.plates().iter().map(|p| p.center).collect()
    }

    /// Per-vertex unit normals: the area-weighted mean of the incident plate normals.
    ///
    /// A vertex with no incident plate gets a zero normal.
    #[must_use]
    pub fn vertex_normals(&self) -> Vec<Vector3> {
        let mut sums = vec![Vector3::zeros(); self.vertex_count()];
        for (tri, plate) in self.faces().iter().zip(self.plates()) {
            let weighted = plate.normal * plate.area;
            for &i in tri {
                sums[i] += weighted;
            }
        }
        sums.into_iter()
            .map(|n| n.try_normalize(0.0).unwrap_or_else(Vector3::zeros))
            .collect()
    }

    /// Per-vertex areas: one third of the area of every incident plate.
    ///
    /// The values sum to the total surface area.
    #[must_use]
    pub fn vertex_areas(&self) -> Vec<f64> {
        let mut areas = vec![0.0; self.vertex_count()];
        for (tri, plate) in self.faces().iter().zip(self.plates()) {
            for &i in tri {
                areas[i] += plate.area / 3.0;
            }
        }
        areas
    }
}
