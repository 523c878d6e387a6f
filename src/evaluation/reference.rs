use crate::error::{EvaluationError, Result};
use crate::gravity::GravityValue;

/// How the reference potential for elevation is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReferencePolicy {
    /// Area-weighted mean potential over the evaluated surface points.
    #[default]
    AreaWeightedMean,
    /// Lowest potential in the batch.
    Minimum,
    /// A value obtained elsewhere, typically from an earlier full-surface pass.
    Supplied(f64),
}

impl ReferencePolicy {
    /// Resolves the reference potential for a completed batch.
    ///
    /// `areas` holds the surface area each value stands for and is `None` when
    /// the batch is an arbitrary point list rather than a full-surface pass.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingReferencePotential`] if the policy
    /// needs a full-surface pass and `areas` is `None`, and
    /// [`EvaluationError::InvalidParameter`] for a non-finite supplied value.
    pub fn resolve(&self, values: &[GravityValue], areas: Option<&[f64]>) -> Result<f64> {
        match (self, areas) {
            (Self::Supplied(reference), _) => {
                if reference.is_finite() {
                    Ok(*reference)
                } else {
                    Err(EvaluationError::InvalidParameter {
                        parameter: "reference_potential",
                        value: *reference,
                        reason: "must be finite",
                    }
                    .into())
                }
            }
            (Self::AreaWeightedMean, Some(areas)) => Ok(area_weighted_mean(values, areas)),
            (Self::Minimum, Some(_)) => Ok(minimum(values)),
            (_, None) => {
                Err(EvaluationError::MissingReferencePotential("arbitrary field points").into())
            }
        }
    }
}

/// `Σ potential_i * area_i / Σ area_i`.
///
/// `NaN` when the total area is zero.
#[must_use]
pub fn area_weighted_mean(values: &[GravityValue], areas: &[f64]) -> f64 {
    let (weighted, total) = values
        .iter()
        .zip(areas)
        .fold((0.0, 0.0), |(weighted, total), (value, &area)| {
            (weighted + value.potential * area, total + area)
        });
    weighted / total
}

/// Smallest potential in the batch; `+∞` for an empty batch.
#[must_use]
pub fn minimum(values: &[GravityValue]) -> f64 {
    values
        .iter()
        .map(|v| v.potential)
        .fold(f64::INFINITY, f64::min)
}
