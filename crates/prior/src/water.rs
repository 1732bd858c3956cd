//! Water-table depth distributions.

use crate::error::PriorError;

/// Distribution of the water-table depth (m below surface).
///
/// A depth of `0.0` is the surface sentinel: the whole column is saturated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaterTableModel {
    /// The same depth in every realization.
    Fixed {
        /// Water-table depth.
        depth: f64,
    },
    /// Uniform between `min` and `max` (inclusive).
    Uniform {
        /// Shallowest depth.
        min: f64,
        /// Deepest depth.
        max: f64,
    },
    /// Normal with the given mean and standard deviation, clamped at the
    /// surface.
    Normal {
        /// Mean depth.
        mean: f64,
        /// Standard deviation.
        std: f64,
    },
}

impl WaterTableModel {
    /// Validates the distribution parameters.
    pub fn validate(&self) -> Result<(), PriorError> {
        let invalid = |reason: String| Err(PriorError::InvalidWaterTable { reason });
        match *self {
            WaterTableModel::Fixed { depth } => {
                if !depth.is_finite() || depth < 0.0 {
                    return invalid(format!(
                        "fixed depth must be finite and non-negative, got {depth}"
                    ));
                }
            }
            WaterTableModel::Uniform { min, max } => {
                if !min.is_finite() || !max.is_finite() || min < 0.0 {
                    return invalid(format!(
                        "uniform bounds must be finite and non-negative, got [{min}, {max}]"
                    ));
                }
                if min > max {
                    return invalid(format!("uniform min ({min}) exceeds max ({max})"));
                }
            }
            WaterTableModel::Normal { mean, std } => {
                if !mean.is_finite() || !std.is_finite() || std < 0.0 {
                    return invalid(format!(
                        "normal mean must be finite and std finite and non-negative, got mean {mean}, std {std}"
                    ));
                }
            }
        }
        Ok(())
    }
}
