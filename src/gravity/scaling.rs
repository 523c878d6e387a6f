use crate::error::{EvaluationError, Result};
use crate::math::Point3;

use super::GravityValue;

/// Newtonian gravitational constant, m³ kg⁻¹ s⁻².
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67384e-11;

/// `G` in km³ kg⁻¹ s⁻².
const G_KM: f64 = GRAVITATIONAL_CONSTANT * 1e-9;
/// kg/km³ per g/cm³.
const DENSITY_TO_KG_PER_KM3: f64 = 1e12;
/// m² per km².
const KM2_TO_M2: f64 = 1e6;
/// m per km.
const KM_TO_M: f64 = 1e3;

/// Converts raw method output (km units, per unit `G * density`) to SI, and
/// adds the centrifugal term of a body spinning about its z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalScaling {
    density: f64,
    rotation_rate: f64,
}

impl PhysicalScaling {
    /// Creates a scaling for `density` in g/cm³ and `rotation_rate` in rad/s.
    ///
    /// # Errors
    ///
    /// Returns an error if the density is not positive and finite, or the
    /// rotation rate is not finite.
    pub fn new(density: f64, rotation_rate: f64) -> Result<Self> {
        if !(density.is_finite() && density > 0.0) {
            return Err(EvaluationError::InvalidParameter {
                parameter: "density",
                value: density,
                reason: "must be positive and finite",
            }
            .into());
        }
        if !rotation_rate.is_finite() {
            return Err(EvaluationError::InvalidParameter {
                parameter: "rotation_rate",
                value: rotation_rate,
                reason: "must be finite",
            }
            .into());
        }
        Ok(Self {
            density,
            rotation_rate,
        })
    }

    /// Scales a raw value evaluated at `point` (km) to J/kg and m/s².
    #[must_use]
    pub fn apply(&self, raw: GravityValue, point: &Point3) -> GravityValue {
        let g_rho = G_KM * self.density * DENSITY_TO_KG_PER_KM3;
        let mut potential = KM2_TO_M2 * g_rho * raw.potential;
        let mut acceleration = raw.acceleration * (KM_TO_M * g_rho);

        if self.rotation_rate != 0.0 {
            let omega_sq = self.rotation_rate * self.rotation_rate;
            potential -= KM2_TO_M2 * 0.5 * omega_sq * (point.x * point.x + point.y * point.y);
            acceleration.x += KM_TO_M * omega_sq * point.x;
            acceleration.y += KM_TO_M * omega_sq * point.y;
        }

        GravityValue {
            potential,
            acceleration,
        }
    }
}
