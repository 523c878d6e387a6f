mod cheng;
mod scaling;
mod werner;

pub use cheng::Cheng;
pub use scaling::{PhysicalScaling, GRAVITATIONAL_CONSTANT};
pub use werner::Werner;

use crate::math::{Point3, Vector3};
use crate::mesh::ShapeModel;

/// Potential and acceleration at one field point.
///
/// Gravity methods produce raw values in mesh units (potential in km²,
/// acceleration in km, both per unit `G * density`). [`PhysicalScaling`]
/// converts them to J/kg and m/s².
///
/// The potential is negative outside the body and the acceleration points
/// into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityValue {
    /// Gravitational potential.
    pub potential: f64,
    /// Gravitational acceleration.
    pub acceleration: Vector3,
}

impl GravityValue {
    /// Returns `true` if the potential and every acceleration component are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.potential.is_finite() && self.acceleration.iter().all(|c| c.is_finite())
    }
}

/// Absolute tolerances, in km, for the degenerate cases of the gravity methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Field point on an edge: `|r1| + |r2|` within this of the edge length.
    pub edge: f64,
    /// Solid-angle numerator treated as zero below this magnitude.
    pub solid_angle: f64,
    /// Field point at a plate center (Cheng).
    pub centroid: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            edge: 1e-9,
            solid_angle: 1e-9,
            centroid: 1e-9,
        }
    }
}

/// A gravity method that evaluates a shape model's field at arbitrary points.
pub trait GravityModel {
    /// Evaluates the raw potential and acceleration at `point`.
    fn evaluate(&self, point: &Point3) -> GravityValue;
}

/// Selects which gravity method to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Exact polyhedral method of Werner & Scheeres (1997).
    #[default]
    Werner,
    /// Single-layer plate approximation of Cheng; faster and less accurate near the surface.
    Cheng,
}

impl Method {
    /// Short lowercase name of the method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Werner => "werner",
            Self::Cheng => "cheng",
        }
    }
}

/// A gravity method with its precomputed plate and edge records.
#[derive(Debug, Clone)]
pub enum PolyhedralGravity {
    /// Exact method.
    Werner(Werner),
    /// Approximate method.
    Cheng(Cheng),
}

impl PolyhedralGravity {
    /// Precomputes the records `method` needs for `model`.
    #[must_use]
    pub fn new(method: Method, model: &ShapeModel, tolerances: Tolerances) -> Self {
        match method {
            Method::Werner => Self::Werner(Werner::new(model, tolerances)),
            Method::Cheng => Self::Cheng(Cheng::new(model, tolerances)),
        }
    }

    /// The method this instance implements.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Werner(_) => Method::Werner,
            Self::Cheng(_) => Method::Cheng,
        }
    }
}

impl GravityModel for PolyhedralGravity {
    fn evaluate(&self, point: &Point3) -> GravityValue {
        match self {
            Self::Werner(w) => w.evaluate(point),
            Self::Cheng(c) => c.evaluate(point),
        }
    }
}
