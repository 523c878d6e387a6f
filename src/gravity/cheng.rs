use crate::math::{Point3, Vector3};
use crate::mesh::ShapeModel;

use super::{GravityModel, GravityValue, Tolerances};

#[derive(Debug, Clone)]
struct PlateRecord {
    center: Point3,
    /// Unit outward normal scaled by twice the plate area.
    scaled_normal: Vector3,
    /// `Σ 3 / |2 v_k - v_i - v_j|` over the three vertices, used when the
    /// field point sits on this plate's center.
    self_term: f64,
}

/// Approximate gravity from a single layer of plate sources (Cheng).
///
/// Each plate contributes as if concentrated at its center:
///
/// ```text
/// potential    = -1/4 * Σ_f (x_f - P) · N_f / |x_f - P|
/// acceleration = -1/4 * Σ_f (N_f - (x_f - P) ((x_f - P) · N_f) / |x_f - P|²) / |x_f - P|
/// ```
///
/// with `x_f` the plate center and `N_f = 2 A_f n_f`. There is no edge pass,
/// which makes this several times cheaper than [`Werner`](super::Werner) at
/// the cost of accuracy close to the surface.
#[derive(Debug, Clone)]
pub struct Cheng {
    plates: Vec<PlateRecord>,
    tolerances: Tolerances,
}

impl Cheng {
    /// Precomputes plate centers and area-scaled normals for `model`.
    #[must_use]
    pub fn new(model: &ShapeModel, tolerances: Tolerances) -> Self {
        let plates = model
            .plates()
            .iter()
            .enumerate()
            .map(|(face, plate)| {
                let [a, b, c] = model.face_points(face);
                let self_term: f64 = [(a, b, c), (b, c, a), (c, a, b)]
                    .iter()
                    .map(|(mid, i, j)| 3.0 / (2.0 * mid.coords - i.coords - j.coords).norm())
                    .sum();
                PlateRecord {
                    center: plate.center,
                    scaled_normal: plate.normal * (2.0 * plate.area),
                    self_term,
                }
            })
            .collect();

        Self { plates, tolerances }
    }
}

impl GravityModel for Cheng {
    fn evaluate(&self, point: &Point3) -> GravityValue {
        let mut potential = 0.0;
        let mut acceleration = Vector3::zeros();

        for plate in &self.plates {
            let x = plate.center - point;
            let distance = x.norm();
            let normal = &plate.scaled_normal;

            if distance < self.tolerances.centroid {
                // 1/|x - P| is singular here; the plate adds no potential
                acceleration -= normal * plate.self_term;
                continue;
            }

            let projection = x.dot(normal);
            potential += projection / distance;
            acceleration -= (normal - x * (projection / (distance * distance))) / distance;
        }

        GravityValue {
            potential: -0.25 * potential,
            acceleration: acceleration * 0.25,
        }
    }
}
