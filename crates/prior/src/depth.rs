//! Depth sampling grid shared by every realization of a run.

use crate::error::PriorError;

/// Ascending depth samples `z`.
///
/// Each sample is the bottom of a depth cell, so a grid built with
/// [`DepthGrid::new`] runs `step, 2*step, ..., depth_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    depths: Vec<f64>,
}

impl DepthGrid {
    /// Builds a uniform grid from `step` down to `depth_max`.
    ///
    /// # Errors
    ///
    /// Returns [`PriorError::InvalidDepthGrid`] if either value is not finite
    /// and positive, or if `step` exceeds `depth_max`.
    ///
    /// # Example
    ///
    /// ```
    /// use lithos_prior::DepthGrid;
    ///
    /// let grid = DepthGrid::new(90.0, 1.0).unwrap();
    /// assert_eq!(grid.len(), 90);
    /// assert_eq!(grid.depths()[0], 1.0);
    /// assert_eq!(grid.depths()[89], 90.0);
    /// ```
    pub fn new(depth_max: f64, step: f64) -> Result<Self, PriorError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(PriorError::InvalidDepthGrid {
                reason: format!("step must be finite and positive, got {step}"),
            });
        }
        if !depth_max.is_finite() || depth_max <= 0.0 {
            return Err(PriorError::InvalidDepthGrid {
                reason: format!("depth_max must be finite and positive, got {depth_max}"),
            });
        }
        if step > depth_max {
            return Err(PriorError::InvalidDepthGrid {
                reason: format!("step ({step}) exceeds depth_max ({depth_max})"),
            });
        }
        // Tolerance absorbs the rounding in depth_max / step for decimal steps.
        let n = ((depth_max / step) - 1e-9).ceil() as usize;
        let depths = (1..=n).map(|i| i as f64 * step).collect();
        Ok(Self { depths })
    }

    /// Returns the depth samples.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Returns `true` if the grid has no samples. Never true for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Returns the deepest sample.
    pub fn max_depth(&self) -> f64 {
        self.depths.last().copied().unwrap_or(0.0)
    }
}
