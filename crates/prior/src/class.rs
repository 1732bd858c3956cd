//! Lithology classes and their resistivity distributions.

use crate::error::PriorError;

/// Integer code identifying a lithology class (1-based).
pub type ClassCode = u16;

/// Log-normal resistivity distribution.
///
/// `res` is the median resistivity in ohm-m; `log10(res)` is the mean of the
/// underlying normal. `unc` is its standard deviation in log10 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistivityPrior {
    res: f64,
    unc: f64,
}

impl ResistivityPrior {
    /// Creates a distribution with median `res` and log10 uncertainty `unc`.
    pub fn new(res: f64, unc: f64) -> Self {
        Self { res, unc }
    }

    /// Returns the median resistivity (ohm-m).
    pub fn res(&self) -> f64 {
        self.res
    }

    /// Returns the log10 standard deviation.
    pub fn unc(&self) -> f64 {
        self.unc
    }

    /// Returns `log10(res)`.
    pub fn log_mean(&self) -> f64 {
        self.res.log10()
    }

    /// Maps a standard-normal score to a resistivity value.
    ///
    /// `10^(log10(res) + unc * score)`; strictly positive for any finite score.
    pub fn value_at(&self, score: f64) -> f64 {
        10f64.powf(self.log_mean() + self.unc * score)
    }

    fn validate(&self, code: ClassCode, what: &str) -> Result<(), PriorError> {
        if !self.res.is_finite() || self.res <= 0.0 {
            return Err(PriorError::InvalidClass {
                code,
                reason: format!("{what} resistivity must be finite and positive, got {}", self.res),
            });
        }
        if !self.unc.is_finite() || self.unc < 0.0 {
            return Err(PriorError::InvalidClass {
                code,
                reason: format!(
                    "{what} resistivity uncertainty must be finite and non-negative, got {}",
                    self.unc
                ),
            });
        }
        Ok(())
    }
}

/// A lithology type with natural layer-thickness bounds and resistivity
/// parameters.
///
/// # Example
///
/// ```
/// use lithos_prior::{Class, ResistivityPrior};
///
/// let clay = Class::new(1, "Clay", 1.0, 10.0, ResistivityPrior::new(20.0, 0.1))
///     .with_unsaturated(ResistivityPrior::new(40.0, 0.1));
/// assert_eq!(clay.code(), 1);
/// assert!(clay.unsaturated().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    code: ClassCode,
    name: String,
    min_thick: f64,
    max_thick: f64,
    saturated: ResistivityPrior,
    unsaturated: Option<ResistivityPrior>,
}

impl Class {
    /// Creates a class without unsaturated resistivity parameters.
    pub fn new(
        code: ClassCode,
        name: impl Into<String>,
        min_thick: f64,
        max_thick: f64,
        saturated: ResistivityPrior,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            min_thick,
            max_thick,
            saturated,
            unsaturated: None,
        }
    }

    /// Sets the unsaturated resistivity distribution.
    pub fn with_unsaturated(mut self, unsaturated: ResistivityPrior) -> Self {
        self.unsaturated = Some(unsaturated);
        self
    }

    /// Returns the class code.
    pub fn code(&self) -> ClassCode {
        self.code
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the minimum natural layer thickness.
    pub fn min_thick(&self) -> f64 {
        self.min_thick
    }

    /// Returns the maximum natural layer thickness.
    pub fn max_thick(&self) -> f64 {
        self.max_thick
    }

    /// Returns the saturated resistivity distribution.
    pub fn saturated(&self) -> &ResistivityPrior {
        &self.saturated
    }

    /// Returns the unsaturated resistivity distribution, if any.
    pub fn unsaturated(&self) -> Option<&ResistivityPrior> {
        self.unsaturated.as_ref()
    }

    pub(crate) fn validate(&self) -> Result<(), PriorError> {
        let code = self.code;
        if code == 0 {
            return Err(PriorError::InvalidClass {
                code,
                reason: "class codes start at 1".to_string(),
            });
        }
        if !self.min_thick.is_finite() || self.min_thick < 0.0 {
            return Err(PriorError::InvalidClass {
                code,
                reason: format!(
                    "min_thick must be finite and non-negative, got {}",
                    self.min_thick
                ),
            });
        }
        if !self.max_thick.is_finite() || self.max_thick <= 0.0 {
            return Err(PriorError::InvalidClass {
                code,
                reason: format!(
                    "max_thick must be finite and positive, got {}",
                    self.max_thick
                ),
            });
        }
        if self.min_thick > self.max_thick {
            return Err(PriorError::InvalidClass {
                code,
                reason: format!(
                    "min_thick ({}) exceeds max_thick ({})",
                    self.min_thick, self.max_thick
                ),
            });
        }
        self.saturated.validate(code, "saturated")?;
        if let Some(ref unsat) = self.unsaturated {
            unsat.validate(code, "unsaturated")?;
        }
        Ok(())
    }
}
