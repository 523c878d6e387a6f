use crate::gravity::GravityValue;
use crate::math::{angle_between_deg, Point3, Vector3};

/// Slope in degrees: the angle between the surface normal and the downhill
/// direction `-acceleration`.
#[must_use]
pub fn slope(normal: &Vector3, acceleration: &Vector3) -> f64 {
    angle_between_deg(normal, &-acceleration)
}

/// Height above the reference potential surface, in meters.
///
/// `potential` and `reference_potential` in J/kg, `acceleration` in m/s².
#[must_use]
pub fn elevation(potential: f64, reference_potential: f64, acceleration: &Vector3) -> f64 {
    (potential - reference_potential) / acceleration.norm()
}

/// Acceleration magnitude, negative when the net pull leaves the surface
/// (slope above 90 degrees).
#[must_use]
pub fn signed_acceleration_magnitude(acceleration: &Vector3, slope_deg: f64) -> f64 {
    let magnitude = acceleration.norm();
    if slope_deg > 90.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Tilt in degrees: the angle between the radial position vector and the surface normal.
#[must_use]
pub fn tilt(position: &Point3, normal: &Vector3) -> f64 {
    angle_between_deg(&position.coords, normal)
}

/// All per-point quantities derived from a scaled gravity value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceQuantities {
    /// Degrees.
    pub slope: f64,
    /// Meters.
    pub elevation: f64,
    /// m/s², signed.
    pub acceleration_magnitude: f64,
    /// Degrees.
    pub tilt: f64,
}

impl SurfaceQuantities {
    /// Derives slope, elevation, signed acceleration magnitude and tilt.
    #[must_use]
    pub fn compute(
        value: &GravityValue,
        position: &Point3,
        normal: &Vector3,
        reference_potential: f64,
    ) -> Self {
        let slope = slope(normal, &value.acceleration);
        Self {
            slope,
            elevation: elevation(value.potential, reference_potential, &value.acceleration),
            acceleration_magnitude: signed_acceleration_magnitude(&value.acceleration, slope),
            tilt: tilt(position, normal),
        }
    }

    /// Whether every quantity is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.slope.is_finite()
            && self.elevation.is_finite()
            && self.acceleration_magnitude.is_finite()
            && self.tilt.is_finite()
    }
}
