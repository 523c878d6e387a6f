use std::f64::consts::PI;

use crate::math::{Matrix3, Point3, Vector3};
use crate::mesh::ShapeModel;

use super::{GravityModel, GravityValue, Tolerances};

/// Precomputed data for one plate.
#[derive(Debug, Clone)]
struct FaceRecord {
    vertices: [usize; 3],
    /// `n ⊗ n` for the unit outward normal `n`.
    dyad: Matrix3,
}

/// Precomputed data for one undirected edge.
#[derive(Debug, Clone)]
struct EdgeRecord {
    vertices: [usize; 2],
    /// Sum over the adjacent plates of `n_face ⊗ n_edge`.
    dyad: Matrix3,
    length: f64,
}

/// Exact polyhedral gravity (Werner & Scheeres, 1997).
///
/// For a field point `P` and `r_i = v_i - P`:
///
/// ```text
/// potential    = 1/2 * (Σ_f r_fᵀ F_f r_f ω_f - Σ_e r_eᵀ E_e r_e L_e)
/// acceleration =        Σ_f F_f r_f ω_f     - Σ_e E_e r_e L_e
/// ```
///
/// where `ω_f` is the solid angle a plate subtends at `P` and
/// `L_e = ln((|r_1| + |r_2| + e) / (|r_1| + |r_2| - e))` for an edge of length `e`.
/// Results are per unit `G * density`. The model is exact for any closed,
/// outward-wound polyhedron, inside or outside.
#[derive(Debug, Clone)]
pub struct Werner {
    vertices: Vec<Point3>,
    faces: Vec<FaceRecord>,
    edges: Vec<EdgeRecord>,
    tolerances: Tolerances,
}

impl Werner {
    /// Precomputes plate and edge dyads for `model`.
    #[must_use]
    pub fn new(model: &ShapeModel, tolerances: Tolerances) -> Self {
        let plates = model.plates();
        let vertices = model.vertices().to_vec();

        let faces = model
            .faces()
            .iter()
            .zip(plates)
            .map(|(&tri, plate)| FaceRecord {
                vertices: tri,
                dyad: plate.normal * plate.normal.transpose(),
            })
            .collect();

        let edges = model
            .edges()
            .iter()
            .map(|edge| {
                let dyad = edge.uses.iter().fold(Matrix3::zeros(), |acc, u| {
                    let face_normal = plates[u.face].normal;
                    // Points away from the plate interior, in the plate's plane
                    let edge_normal = (vertices[u.to] - vertices[u.from])
                        .cross(&face_normal)
                        .try_normalize(0.0)
                        .unwrap_or_else(Vector3::zeros);
                    acc + face_normal * edge_normal.transpose()
                });
                let [a, b] = edge.vertices;
                EdgeRecord {
                    vertices: edge.vertices,
                    dyad,
                    length: (vertices[b] - vertices[a]).norm(),
                }
            })
            .collect();

        Self {
            vertices,
            faces,
            edges,
            tolerances,
        }
    }

    /// Sum of the solid angles all plates subtend at `point`.
    ///
    /// `4π` inside a closed outward-wound polyhedron, `0` outside.
    #[must_use]
    pub fn solid_angle_sum(&self, point: &Point3) -> f64 {
        let (r, r_norm) = self.relative_positions(point);
        self.faces
            .iter()
            .map(|f| self.solid_angle(f, &r, &r_norm))
            .sum()
    }

    /// Returns `true` if `point` lies inside the polyhedron.
    #[must_use]
    pub fn is_inside(&self, point: &Point3) -> bool {
        self.solid_angle_sum(point) >= 2.0 * PI
    }

    fn relative_positions(&self, point: &Point3) -> (Vec<Vector3>, Vec<f64>) {
        let r: Vec<Vector3> = self.vertices.iter().map(|v| v - point).collect();
        let r_norm = r.iter().map(Vector3::norm).collect();
        (r, r_norm)
    }

    /// Signed solid angle of a plate, from the Van Oosterom-Strackee formula.
    fn solid_angle(&self, face: &FaceRecord, r: &[Vector3], r_norm: &[f64]) -> f64 {
        let [a, b, c] = face.vertices;
        let (ra, rb, rc) = (&r[a], &r[b], &r[c]);
        let (la, lb, lc) = (r_norm[a], r_norm[b], r_norm[c]);

        let mut numerator = ra.dot(&rb.cross(rc));
        if numerator.abs() < self.tolerances.solid_angle {
            // A signed zero would pick the atan2 branch at random
            numerator = -0.0;
        }
        let denominator = la * lb * lc + la * rb.dot(rc) + lb * rc.dot(ra) + lc * ra.dot(rb);

        2.0 * numerator.atan2(denominator)
    }

    /// The per-edge logarithm `L_e`, or zero when the point lies on the edge.
    fn edge_log(&self, edge: &EdgeRecord, r_norm: &[f64]) -> f64 {
        let [p1, p2] = edge.vertices;
        let sum = r_norm[p1] + r_norm[p2];
        if (sum - edge.length).abs() < self.tolerances.edge {
            0.0
        } else {
            ((sum + edge.length) / (sum - edge.length)).ln()
        }
    }
}

impl GravityModel for Werner {
    fn evaluate(&self, point: &Point3) -> GravityValue {
        let (r, r_norm) = self.relative_positions(point);

        let mut potential = 0.0;
        let mut acceleration = Vector3::zeros();

        for edge in &self.edges {
            let le = self.edge_log(edge, &r_norm);
            let r1 = &r[edge.vertices[0]];
            let er = edge.dyad * r1;
            potential -= r1.dot(&er) * le;
            acceleration -= er * le;
        }

        for face in &self.faces {
            let omega = self.solid_angle(face, &r, &r_norm);
            let ra = &r[face.vertices[0]];
            let fr = face.dyad * ra;
            potential += ra.dot(&fr) * omega;
            acceleration += fr * omega;
        }

        GravityValue {
            potential: 0.5 * potential,
            acceleration,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn werner(model: &ShapeModel) -> Werner {
        Werner::new(model, Tolerances::default())
    }

    /// `∫ dV / r` over a regular tetrahedron, seen from its centroid.
    ///
    /// The body splits into four pyramids with apex at the centroid, so the
    /// integral reduces to `12 h ∫₀^{π/3} (sqrt(d² sec²θ + h²) - h) dθ` with `h`
    /// the inradius of the solid and `d` the inradius of a face. The remaining
    /// one-dimensional integral is evaluated with composite Simpson's rule.
    fn tetrahedron_centroid_integral(edge: f64) -> f64 {
        let h = edge / (2.0 * 6.0_f64.sqrt());
        let d = edge / (2.0 * 3.0_f64.sqrt());
        let f = |theta: f64| (d * d / theta.cos().powi(2) + h * h).sqrt() - h;

        let n = 2000;
        let step = (PI / 3.0) / f64::from(n);
        let mut sum = f(0.0) + f(PI / 3.0);
        for i in 1..n {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * f(step * f64::from(i));
        }
        12.0 * h * sum * step / 3.0
    }

    // ── closed-form checks ──

    #[test]
    fn tetrahedron_centroid_potential() {
        let edge = 2.0 * 2.0_f64.sqrt();
        let model = ShapeModel::regular_tetrahedron(edge).unwrap();
        let value = werner(&model).evaluate(&p(0.0, 0.0, 0.0));

        let expected = -tetrahedron_centroid_integral(edge);
        approx::assert_relative_eq!(value.potential, expected, max_relative = 1e-6);
        // symmetric body: no net pull at its centroid
        assert!(value.acceleration.norm() < 1e-12);
    }

    #[test]
    fn potential_scales_with_size_squared() {
        let small = ShapeModel::regular_tetrahedron(1.0).unwrap();
        let large = ShapeModel::regular_tetrahedron(3.0).unwrap();
        let origin = p(0.0, 0.0, 0.0);
        let ratio =
            werner(&large).evaluate(&origin).potential / werner(&small).evaluate(&origin).potential;
        approx::assert_relative_eq!(ratio, 9.0, max_relative = 1e-9);
    }

    // ── solid angles ──

    #[test]
    fn solid_angles_classify_inside_and_outside() {
        let model = ShapeModel::icosphere(5.0, 2).unwrap();
        let w = werner(&model);

        for inside in [p(0.0, 0.0, 0.0), p(3.0, -1.0, 2.0), p(0.0, 0.0, -4.5)] {
            assert!((w.solid_angle_sum(&inside) - 4.0 * PI).abs() < 1e-6);
            assert!(w.is_inside(&inside));
        }
        for outside in [p(6.0, 0.0, 0.0), p(-10.0, 20.0, 3.0), p(0.0, 0.0, 5.5)] {
            assert!(w.solid_angle_sum(&outside).abs() < 1e-6);
            assert!(!w.is_inside(&outside));
        }
    }

    // ── spherical symmetry ──

    #[test]
    fn sphere_is_symmetric_and_attractive() {
        let model = ShapeModel::icosphere(10.0, 3).unwrap();
        let w = werner(&model);

        let a = w.evaluate(&p(20.0, 0.0, 0.0));
        let b = w.evaluate(&p(0.0, 0.0, -20.0));
        let c = w.evaluate(&p(20.0 / 3.0_f64.sqrt(), 20.0 / 3.0_f64.sqrt(), 20.0 / 3.0_f64.sqrt()));

        for other in [&b, &c] {
            assert!((a.potential - other.potential).abs() < 0.01 * a.potential.abs());
            assert!(
                (a.acceleration.norm() - other.acceleration.norm()).abs()
                    < 0.01 * a.acceleration.norm()
            );
        }
        assert!(a.potential < 0.0);
        // acceleration points back toward the centroid
        assert!(a.acceleration.normalize().dot(&-Vector3::x()) > 0.9999);
        assert!(b.acceleration.normalize().dot(&Vector3::z()) > 0.9999);
    }

    #[test]
    fn interior_field_is_nearly_linear() {
        // homogeneous sphere: |g| grows linearly with radius inside
        let model = ShapeModel::icosphere(10.0, 4).unwrap();
        let w = werner(&model);
        let g2 = w.evaluate(&p(2.0, 0.0, 0.0)).acceleration.norm();
        let g4 = w.evaluate(&p(4.0, 0.0, 0.0)).acceleration.norm();
        approx::assert_relative_eq!(g4 / g2, 2.0, max_relative = 0.02);
    }

    // ── degenerate field points ──

    #[test]
    fn edge_midpoint_is_finite() {
        let model = ShapeModel::icosphere(10.0, 2).unwrap();
        let w = werner(&model);
        let edge = &model.edges()[0];
        let [a, b] = edge.vertices;
        let midpoint =
            Point3::from((model.vertices()[a].coords + model.vertices()[b].coords) * 0.5);

        let record = w.edges.iter().find(|e| e.vertices == edge.vertices).unwrap();
        let (_, r_norm) = w.relative_positions(&midpoint);
        assert_eq!(w.edge_log(record, &r_norm), 0.0);

        let value = w.evaluate(&midpoint);
        assert!(value.is_finite(), "{value:?}");
        assert!(value.potential < 0.0);
    }

    #[test]
    fn vertex_field_point_is_finite() {
        let model = ShapeModel::icosphere(10.0, 2).unwrap();
        let value = werner(&model).evaluate(&model.vertices()[7]);
        assert!(value.is_finite(), "{value:?}");
    }

    #[test]
    fn surface_point_matches_nearby_exterior_point() {
        let model = ShapeModel::icosphere(10.0, 2).unwrap();
        let w = werner(&model);
        let center = model.plates()[5].center;
        let normal = model.plates()[5].normal;
        let on = w.evaluate(&center);
        let off = w.evaluate(&(center + normal * 1e-6));
        assert!((on.potential - off.potential).abs() < 1e-4 * on.potential.abs());
    }
}
