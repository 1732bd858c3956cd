//! Run configuration for the ensemble driver.

use lithos_layers::RejectionBudget;

use crate::error::RealizeError;

/// Default p-value below which a layer-count histogram is flagged as skewed.
pub const DEFAULT_SKEW_P_VALUE: f64 = 0.001;

/// Configuration of an ensemble run.
///
/// # Example
///
/// ```
/// use lithos_realize::RealizeConfig;
///
/// let config = RealizeConfig::new(500).with_seed(7).with_parallel(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RealizeConfig {
    /// Number of realizations.
    n_reals: usize,
    /// Master seed; `None` seeds from the OS.
    seed: Option<u64>,
    /// Run realizations on the rayon thread pool.
    parallel: bool,
    /// Try limits of the per-realization rejection loop.
    budget: RejectionBudget,
    /// Significance level of the layer-count skew test.
    skew_p_value: f64,
}

impl RealizeConfig {
    /// Creates a configuration for `n_reals` realizations.
    ///
    /// Defaults: no seed, parallel, default [`RejectionBudget`],
    /// `skew_p_value = 0.001`.
    pub fn new(n_reals: usize) -> Self {
        Self {
            n_reals,
            seed: None,
            parallel: true,
            budget: RejectionBudget::default(),
            skew_p_value: DEFAULT_SKEW_P_VALUE,
        }
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the rejection-loop budget.
    pub fn with_budget(mut self, budget: RejectionBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the significance level of the layer-count skew test.
    pub fn with_skew_p_value(mut self, p: f64) -> Self {
        self.skew_p_value = p;
        self
    }

    /// Returns the number of realizations.
    pub fn n_reals(&self) -> usize {
        self.n_reals
    }

    /// Returns the master seed, if set.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns `true` if realizations run in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the rejection-loop budget.
    pub fn budget(&self) -> RejectionBudget {
        self.budget
    }

    /// Returns the significance level of the layer-count skew test.
    pub fn skew_p_value(&self) -> f64 {
        self.skew_p_value
    }

    /// Validates this configuration.
    ///
    /// Returns an error if `n_reals < 1` or `skew_p_value` is not in (0, 1).
    pub fn validate(&self) -> Result<(), RealizeError> {
        if self.n_reals < 1 {
            return Err(RealizeError::InvalidConfig {
                reason: "n_reals must be at least 1".to_string(),
            });
        }
        if !(self.skew_p_value > 0.0 && self.skew_p_value < 1.0) {
            return Err(RealizeError::InvalidConfig {
                reason: format!(
                    "skew_p_value must be in (0, 1), got {}",
                    self.skew_p_value
                ),
            });
        }
        Ok(())
    }
}

impl Default for RealizeConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}
