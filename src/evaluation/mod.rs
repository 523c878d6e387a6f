pub mod derived;
mod parallel;
mod reference;
mod tilt;

pub use derived::SurfaceQuantities;
pub use parallel::{available_workers, chunk_ranges, WorkerPool};
pub use reference::{area_weighted_mean, minimum, ReferencePolicy};
pub use tilt::{TiltNeighborhood, TiltStatistics};

use tracing::info;

use crate::error::{EvaluationError, Result};
use crate::gravity::{
    GravityModel, GravityValue, Method, PhysicalScaling, PolyhedralGravity, Tolerances,
};
use crate::math::{LatLonRadius, Point3, Vector3};
use crate::mesh::ShapeModel;

/// A location at which the field is evaluated, with the surface normal there if known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPoint {
    /// Position in km.
    pub position: Point3,
    /// Unit surface normal, if known.
    pub normal: Option<Vector3>,
}

impl FieldPoint {
    /// A field point without a known normal.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// A field point with a known surface normal.
    #[must_use]
    pub fn with_normal(position: Point3, normal: Vector3) -> Self {
        Self {
            position,
            normal: Some(normal),
        }
    }
}

/// Which points of (or near) the shape model to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPointSource {
    /// Every plate center, with plate normals and areas.
    Centers,
    /// Every vertex, with area-weighted vertex normals and one-third plate areas.
    Vertices,
    /// A caller-supplied list of points.
    External(Vec<FieldPoint>),
}

impl FieldPointSource {
    /// External points paired one-to-one with known normals.
    ///
    /// # Errors
    ///
    /// Returns an error if the two lists differ in length.
    pub fn external_with_normals(points: Vec<Point3>, normals: Vec<Vector3>) -> Result<Self> {
        if points.len() != normals.len() {
            return Err(EvaluationError::NormalCountMismatch {
                points: points.len(),
                normals: normals.len(),
            }
            .into());
        }
        Ok(Self::External(
            points
                .into_iter()
                .zip(normals)
                .map(|(p, n)| FieldPoint::with_normal(p, n))
                .collect(),
        ))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Centers => "plate centers",
            Self::Vertices => "vertices",
            Self::External(_) => "external points",
        }
    }
}

/// Normal used for field points that do not carry one.
///
/// The resolved direction is normalized; it is zero when the defining vector is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NormalFallback {
    /// Opposite the acceleration, which gives zero slope.
    #[default]
    AlongGravity,
    /// Along the position vector, which gives zero tilt.
    Radial,
    /// A fixed direction.
    Fixed(Vector3),
}

impl NormalFallback {
    fn resolve(self, position: &Point3, acceleration: &Vector3) -> Vector3 {
        let direction = match self {
            Self::AlongGravity => -acceleration,
            Self::Radial => position.coords,
            Self::Fixed(normal) => normal,
        };
        direction.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }
}

/// Parameters of an evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    /// Gravity method.
    pub method: Method,
    /// Bulk density in g/cm³.
    pub density: f64,
    /// Spin rate about the z axis, rad/s.
    pub rotation_rate: f64,
    /// How the elevation reference potential is chosen.
    pub reference: ReferencePolicy,
    /// Degeneracy tolerances of the gravity methods.
    pub tolerances: Tolerances,
    /// Worker threads; `None` uses every available core.
    pub workers: Option<usize>,
    /// Neighborhood radius in km for tilt statistics; `None` skips them.
    pub tilt_radius: Option<f64>,
    /// Normal for field points without one.
    pub normal_fallback: NormalFallback,
}

impl Default for GravityParams {
    fn default() -> Self {
        Self {
            method: Method::Werner,
            density: 1.0,
            rotation_rate: 0.0,
            reference: ReferencePolicy::AreaWeightedMean,
            tolerances: Tolerances::default(),
            workers: None,
            tilt_radius: None,
            normal_fallback: NormalFallback::AlongGravity,
        }
    }
}

impl GravityParams {
    /// Sets the gravity method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the density in g/cm³.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the spin rate in rad/s.
    #[must_use]
    pub fn with_rotation_rate(mut self, rotation_rate: f64) -> Self {
        self.rotation_rate = rotation_rate;
        self
    }

    /// Sets the reference potential policy.
    #[must_use]
    pub fn with_reference(mut self, reference: ReferencePolicy) -> Self {
        self.reference = reference;
        self
    }

    /// Sets the degeneracy tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Sets the number of worker threads.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Enables tilt statistics over the given neighborhood radius in km.
    #[must_use]
    pub fn with_tilt_radius(mut self, radius: f64) -> Self {
        self.tilt_radius = Some(radius);
        self
    }

    /// Sets the normal used for field points without one.
    #[must_use]
    pub fn with_normal_fallback(mut self, fallback: NormalFallback) -> Self {
        self.normal_fallback = fallback;
        self
    }
}

/// Everything computed at one field point, in SI units and degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySample {
    /// Position in km.
    pub position: Point3,
    /// Surface normal used for slope and tilt.
    pub normal: Vector3,
    /// Surface area the point stands for, km²; `None` for external points.
    pub area: Option<f64>,
    /// Latitude, east longitude and radius of the position.
    pub coordinates: LatLonRadius,
    /// Potential in J/kg and acceleration in m/s².
    pub gravity: GravityValue,
    /// Slope, elevation, signed acceleration magnitude and tilt.
    pub surface: SurfaceQuantities,
    /// Tilt statistics over the neighborhood, when requested.
    pub tilt_statistics: Option<TiltStatistics>,
}

/// Result of one evaluation pass, in field-point order.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityField {
    /// Method that produced the values.
    pub method: Method,
    /// Reference potential used for elevation, J/kg.
    pub reference_potential: f64,
    /// One sample per field point.
    pub samples: Vec<GravitySample>,
}

impl GravityField {
    /// Scaled gravity values, in field-point order.
    #[must_use]
    pub fn values(&self) -> Vec<GravityValue> {
        self.samples.iter().map(|s| s.gravity).collect()
    }
}

/// Evaluates the gravity field of a shape model over a set of field points.
///
/// Plate and edge records are built once per pass, shared read-only by the
/// workers, and the per-point results are gathered back in point order.
pub struct GravityEvaluation<'a> {
    model: &'a ShapeModel,
    params: GravityParams,
}

impl<'a> GravityEvaluation<'a> {
    /// Creates a new `GravityEvaluation` with default parameters.
    #[must_use]
    pub fn new(model: &'a ShapeModel) -> Self {
        Self {
            model,
            params: GravityParams::default(),
        }
    }

    /// Sets custom evaluation parameters.
    #[must_use]
    pub fn with_params(mut self, params: GravityParams) -> Self {
        self.params = params;
        self
    }

    /// Evaluates `source` on a worker pool created for this pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the pool cannot be
    /// started, no reference potential can be resolved, or any field point
    /// yields a non-finite gravity value or surface quantity. A point with
    /// zero net acceleration has no elevation and fails the pass.
    pub fn execute(&self, source: &FieldPointSource) -> Result<GravityField> {
        let pool = match self.params.workers {
            Some(workers) => WorkerPool::new(workers)?,
            None => WorkerPool::with_available_parallelism()?,
        };
        self.execute_with_pool(source, &pool)
    }

    /// Evaluates `source` on an existing worker pool.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_with_pool(
        &self,
        source: &FieldPointSource,
        pool: &WorkerPool,
    ) -> Result<GravityField> {
        self.check_tilt_radius()?;
        let points = self.collect_points(source);

        info!(
            points = points.positions.len(),
            source = source.label(),
            method = self.params.method.name(),
            workers = pool.workers(),
            "evaluating gravity"
        );

        let values = self.evaluate_points(&points.positions, pool)?;
        let reference_potential = self
            .params
            .reference
            .resolve(&values, points.areas.as_deref())?;

        let normals: Vec<Vector3> = points
            .normals
            .iter()
            .zip(&points.positions)
            .zip(&values)
            .map(|((normal, position), value)| {
                normal.unwrap_or_else(|| {
                    self.params
                        .normal_fallback
                        .resolve(position, &value.acceleration)
                })
            })
            .collect();

        let surface = values
            .iter()
            .zip(&points.positions)
            .zip(&normals)
            .enumerate()
            .map(|(index, ((value, position), normal))| {
                let quantities =
                    SurfaceQuantities::compute(value, position, normal, reference_potential);
                if quantities.is_finite() {
                    Ok(quantities)
                } else {
                    Err(EvaluationError::NonFinite { index }.into())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let tilt_statistics: Vec<Option<TiltStatistics>> = match self.params.tilt_radius {
            Some(radius) => {
                let tilts: Vec<f64> = surface.iter().map(|s| s.tilt).collect();
                let neighborhood = TiltNeighborhood::new(&points.positions, &tilts, radius);
                let stats = pool.scatter_gather(points.positions.len(), |start, stop| {
                    Ok((start..stop).map(|i| neighborhood.statistics(i)).collect())
                })?;
                stats.into_iter().map(Some).collect()
            }
            None => vec![None; points.positions.len()],
        };

        let samples = points
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| GravitySample {
                position: *position,
                normal: normals[i],
                area: points.areas.as_ref().map(|a| a[i]),
                coordinates: LatLonRadius::from_point(position),
                gravity: values[i],
                surface: surface[i],
                tilt_statistics: tilt_statistics[i],
            })
            .collect();

        info!(reference_potential, "gravity evaluation complete");

        Ok(GravityField {
            method: self.params.method,
            reference_potential,
            samples,
        })
    }

    /// Evaluates the scaled potential and acceleration at each of `points`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the density or rotation rate is invalid, or any
    /// point yields a non-finite value. No partial results are returned.
    pub fn evaluate_points(
        &self,
        points: &[Point3],
        pool: &WorkerPool,
    ) -> Result<Vec<GravityValue>> {
        let scaling = PhysicalScaling::new(self.params.density, self.params.rotation_rate)?;
        let gravity =
            PolyhedralGravity::new(self.params.method, self.model, self.params.tolerances);

        pool.scatter_gather(points.len(), |start, stop| {
            points[start..stop]
                .iter()
                .enumerate()
                .map(|(offset, point)| {
                    let value = scaling.apply(gravity.evaluate(point), point);
                    if value.is_finite() {
                        Ok(value)
                    } else {
                        Err(EvaluationError::NonFinite {
                            index: start + offset,
                        }
                        .into())
                    }
                })
                .collect()
        })
    }

    fn check_tilt_radius(&self) -> Result<()> {
        match self.params.tilt_radius {
            Some(radius) if !(radius.is_finite() && radius > 0.0) => {
                Err(EvaluationError::InvalidParameter {
                    parameter: "tilt_radius",
                    value: radius,
                    reason: "must be positive and finite",
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    fn collect_points(&self, source: &FieldPointSource) -> CollectedPoints {
        match source {
            FieldPointSource::Centers => {
                let plates = self.model.plates();
                CollectedPoints {
                    positions: self.model.plate_centers(),
                    normals: plates.iter().map(|p| Some(p.normal)).collect(),
                    areas: Some(plates.iter().map(|p| p.area).collect()),
                }
            }
            FieldPointSource::Vertices => CollectedPoints {
                positions: self.model.vertices().to_vec(),
                normals: self.model.vertex_normals().into_iter().map(Some).collect(),
                areas: Some(self.model.vertex_areas()),
            },
            FieldPointSource::External(points) => CollectedPoints {
                positions: points.iter().map(|p| p.position).collect(),
                normals: points.iter().map(|p| p.normal).collect(),
                areas: None,
            },
        }
    }
}

struct CollectedPoints {
    positions: Vec<Point3>,
    normals: Vec<Option<Vector3>>,
    areas: Option<Vec<f64>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GravityError;
    use crate::gravity::GRAVITATIONAL_CONSTANT;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn sphere() -> ShapeModel {
        ShapeModel::icosphere(10.0, 2).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    // ── plate centers and vertices ──

    #[test]
    fn centers_pass_on_sphere() {
        init_tracing();
        let model = sphere();
        let field = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(2))
            .execute(&FieldPointSource::Centers)
            .unwrap();

        assert_eq!(field.method, Method::Werner);
        assert_eq!(field.samples.len(), model.face_count());
        for (sample, plate) in field.samples.iter().zip(model.plates()) {
            assert_eq!(sample.position, plate.center);
            assert_eq!(sample.area, Some(plate.area));
            assert!(sample.gravity.potential < 0.0);
            // near-spherical body: gravity almost along the plate normal
            assert!(sample.surface.slope < 10.0, "slope {}", sample.surface.slope);
            assert!(sample.surface.acceleration_magnitude > 0.0);
            let elevation = sample.surface.elevation;
            assert!(elevation.abs() < 500.0, "elevation {elevation}");
            assert!(sample.tilt_statistics.is_none());
        }

        let areas: Vec<f64> = model.plates().iter().map(|p| p.area).collect();
        assert_eq!(
            field.reference_potential.to_bits(),
            area_weighted_mean(&field.values(), &areas).to_bits()
        );
    }

    #[test]
    fn vertices_pass_uses_vertex_normals() {
        let model = sphere();
        let field = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(3).with_method(Method::Cheng))
            .execute(&FieldPointSource::Vertices)
            .unwrap();

        assert_eq!(field.method, Method::Cheng);
        assert_eq!(field.samples.len(), model.vertex_count());
        for (sample, normal) in field.samples.iter().zip(model.vertex_normals()) {
            assert_eq!(sample.normal, normal);
            assert!((sample.coordinates.radius - 10.0).abs() < 1e-9);
            assert!(sample.surface.tilt < 5.0);
        }
    }

    #[test]
    fn minimum_reference_puts_lowest_point_at_zero() {
        let model = ShapeModel::regular_tetrahedron(4.0).unwrap();
        let field = GravityEvaluation::new(&model)
            .with_params(
                GravityParams::default()
                    .with_workers(1)
                    .with_reference(ReferencePolicy::Minimum),
            )
            .execute(&FieldPointSource::Vertices)
            .unwrap();
        for sample in &field.samples {
            assert!(sample.surface.elevation >= 0.0);
        }
        assert!(field.samples.iter().any(|s| s.surface.elevation == 0.0));
    }

    // ── external points ──

    #[test]
    fn external_points_need_reference() {
        let model = sphere();
        let source = FieldPointSource::External(vec![FieldPoint::new(p(20.0, 0.0, 0.0))]);
        let result = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(1))
            .execute(&source);
        assert!(matches!(
            result,
            Err(GravityError::Evaluation(EvaluationError::MissingReferencePotential(_)))
        ));
    }

    #[test]
    fn external_points_with_reference_from_centers_pass() {
        let model = sphere();
        let params = GravityParams::default().with_workers(2).with_density(2.0);
        let centers = GravityEvaluation::new(&model)
            .with_params(params)
            .execute(&FieldPointSource::Centers)
            .unwrap();

        let source = FieldPointSource::External(vec![
            FieldPoint::new(p(0.0, 0.0, 15.0)),
            FieldPoint::with_normal(p(12.0, 0.0, 0.0), Vector3::y()),
        ]);
        let field = GravityEvaluation::new(&model)
            .with_params(
                params.with_reference(ReferencePolicy::Supplied(centers.reference_potential)),
            )
            .execute(&source)
            .unwrap();

        assert_eq!(field.reference_potential, centers.reference_potential);
        let above = &field.samples[0];
        assert!(above.area.is_none());
        // default fallback normal gives zero slope
        assert!(above.surface.slope.abs() < 1e-5);
        assert!((above.normal.norm() - 1.0).abs() < 1e-12);
        let down = above.gravity.acceleration.normalize();
        assert!((above.normal + down).norm() < 1e-12);
        // 5 km above a 10 km sphere: positive elevation, a few km
        assert!(above.surface.elevation > 2000.0 && above.surface.elevation < 10000.0);

        let sideways = &field.samples[1];
        assert_eq!(sideways.normal, Vector3::y());
        assert!((sideways.surface.slope - 90.0).abs() < 1e-3);
        assert!((sideways.surface.tilt - 90.0).abs() < 1e-9);
    }

    #[test]
    fn radial_fallback_gives_zero_tilt() {
        let model = sphere();
        let source = FieldPointSource::External(vec![FieldPoint::new(p(3.0, -14.0, 6.0))]);
        let field = GravityEvaluation::new(&model)
            .with_params(
                GravityParams::default()
                    .with_workers(1)
                    .with_reference(ReferencePolicy::Supplied(0.0))
                    .with_normal_fallback(NormalFallback::Radial),
            )
            .execute(&source)
            .unwrap();
        let sample = &field.samples[0];
        assert!(sample.surface.tilt.abs() < 1e-5);
        assert!((sample.normal - p(3.0, -14.0, 6.0).coords.normalize()).norm() < 1e-12);
    }

    #[test]
    fn fixed_fallback_is_normalized() {
        let model = sphere();
        let source = FieldPointSource::External(vec![FieldPoint::new(p(0.0, 0.0, 12.0))]);
        let field = GravityEvaluation::new(&model)
            .with_params(
                GravityParams::default()
                    .with_workers(1)
                    .with_reference(ReferencePolicy::Supplied(0.0))
                    .with_normal_fallback(NormalFallback::Fixed(Vector3::new(0.0, 0.0, 4.0))),
            )
            .execute(&source)
            .unwrap();
        assert_eq!(field.samples[0].normal, Vector3::z());
        assert!(field.samples[0].surface.slope.abs() < 1e-5);
    }

    // ── tetrahedron centroid ──

    /// `∫ dV / r` in km², seen from the centroid of a regular tetrahedron
    /// with a 2√2 km edge.
    const TETRAHEDRON_CENTROID_INTEGRAL: f64 = 4.389_580_813_420_937;

    fn tetrahedron() -> ShapeModel {
        ShapeModel::regular_tetrahedron(2.0 * 2.0_f64.sqrt()).unwrap()
    }

    #[test]
    fn tetrahedron_centroid_potential_in_si_units() {
        let model = tetrahedron();
        let pool = WorkerPool::new(1).unwrap();
        let values = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_density(1.0).with_rotation_rate(0.0))
            .evaluate_points(&[p(0.0, 0.0, 0.0)], &pool)
            .unwrap();

        // G ρ with ρ = 1000 kg/m³, and km² to m²
        let expected = -GRAVITATIONAL_CONSTANT * 1e3 * 1e6 * TETRAHEDRON_CENTROID_INTEGRAL;
        approx::assert_relative_eq!(values[0].potential, expected, max_relative = 1e-6);
        assert!(values[0].acceleration.norm() < 1e-12);
    }

    #[test]
    fn zero_acceleration_fails_the_pass() {
        // no net pull at the centroid of a symmetric body
        let model = ShapeModel::regular_tetrahedron(2.0).unwrap();
        let source = FieldPointSource::External(vec![
            FieldPoint::new(p(0.0, 0.0, 5.0)),
            FieldPoint::new(p(0.0, 0.0, 0.0)),
        ]);
        let result = GravityEvaluation::new(&model)
            .with_params(
                GravityParams::default()
                    .with_workers(2)
                    .with_reference(ReferencePolicy::Supplied(0.0)),
            )
            .execute(&source);
        assert!(matches!(
            result,
            Err(GravityError::Evaluation(EvaluationError::NonFinite { index: 1 }))
        ));
    }

    #[test]
    fn mismatched_normals_fail() {
        let result = FieldPointSource::external_with_normals(
            vec![p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)],
            vec![Vector3::x()],
        );
        assert!(matches!(
            result,
            Err(GravityError::Evaluation(EvaluationError::NormalCountMismatch {
                points: 2,
                normals: 1
            }))
        ));
    }

    // ── parallel evaluation ──

    #[test]
    fn one_and_eight_workers_agree() {
        let model = sphere();
        let source = FieldPointSource::Centers;
        let one = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(1).with_tilt_radius(3.0))
            .execute(&source)
            .unwrap();
        let eight = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(8).with_tilt_radius(3.0))
            .execute(&source)
            .unwrap();
        assert_eq!(one, eight);
    }

    #[test]
    fn shared_pool_is_reusable() {
        let model = ShapeModel::regular_tetrahedron(2.0).unwrap();
        let pool = WorkerPool::new(2).unwrap();
        let evaluation = GravityEvaluation::new(&model);
        let first = evaluation.execute_with_pool(&FieldPointSource::Centers, &pool).unwrap();
        let second = evaluation.execute_with_pool(&FieldPointSource::Centers, &pool).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn evaluate_points_keeps_order() {
        let model = sphere();
        let pool = WorkerPool::new(4).unwrap();
        let points: Vec<Point3> = (1..=9).map(|i| p(10.0 + f64::from(i), 0.0, 0.0)).collect();
        let values = GravityEvaluation::new(&model)
            .evaluate_points(&points, &pool)
            .unwrap();
        for pair in values.windows(2) {
            // farther out: weaker pull, shallower potential
            assert!(pair[1].acceleration.norm() < pair[0].acceleration.norm());
            assert!(pair[1].potential > pair[0].potential);
        }
    }

    // ── tilt statistics ──

    #[test]
    fn tilt_statistics_cover_neighbors() {
        let model = sphere();
        let field = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(2).with_tilt_radius(4.0))
            .execute(&FieldPointSource::Centers)
            .unwrap();
        for sample in &field.samples {
            let stats = sample.tilt_statistics.unwrap();
            assert!(stats.count > 1);
            assert!(stats.mean >= 0.0 && stats.mean < 10.0);
            assert!(stats.std_dev >= 0.0);
        }
    }

    // ── parameter validation ──

    #[test]
    fn invalid_parameters_fail() {
        let model = ShapeModel::regular_tetrahedron(1.0).unwrap();
        let source = FieldPointSource::Centers;

        let bad_density = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(1).with_density(-1.0))
            .execute(&source);
        assert!(bad_density.is_err());

        let bad_radius = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(1).with_tilt_radius(0.0))
            .execute(&source);
        assert!(bad_radius.is_err());

        let no_workers = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_workers(0))
            .execute(&source);
        assert!(matches!(no_workers, Err(GravityError::Parallel(_))));
    }

    #[test]
    fn spin_lowers_equatorial_pull() {
        let model = sphere();
        let point = [p(12.0, 0.0, 0.0)];
        let pool = WorkerPool::new(1).unwrap();
        let still = GravityEvaluation::new(&model).evaluate_points(&point, &pool).unwrap();
        let spinning = GravityEvaluation::new(&model)
            .with_params(GravityParams::default().with_rotation_rate(2e-4))
            .evaluate_points(&point, &pool)
            .unwrap();
        assert!(spinning[0].acceleration.norm() < still[0].acceleration.norm());
        assert!(spinning[0].potential < still[0].potential);
    }
}
