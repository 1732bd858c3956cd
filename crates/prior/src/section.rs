//! Stratigraphic sections.

use std::collections::BTreeSet;

use crate::class::ClassCode;
use crate::error::PriorError;

/// An ordered slot in the stratigraphic column.
///
/// Sections are listed shallowest first. Every section but the last is an
/// optional overlay that is present in a realization with probability
/// `frequency`; the last section supplies the basal type of the column and
/// only its `types` and `weights` are used.
///
/// A single weight equal to `1.0` is a sentinel for "uniform over all
/// types" and is expanded when the section is placed in a
/// [`PriorConfig`](crate::PriorConfig).
///
/// # Example
///
/// ```
/// use lithos_prior::Section;
///
/// let s = Section::new(vec![1, 2, 3], vec![1.0])
///     .with_frequency(0.7)
///     .with_thickness(5.0, 20.0)
///     .with_layers(1, 4)
///     .with_repeat(false);
/// assert_eq!(s.max_layers(), 4);
/// assert!(!s.allow_repeat());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    types: Vec<ClassCode>,
    weights: Vec<f64>,
    frequency: f64,
    min_thick: f64,
    max_thick: f64,
    min_layers: usize,
    max_layers: usize,
    allow_repeat: bool,
    min_depth: f64,
}

impl Section {
    /// Creates a section over `types` with the given weights.
    ///
    /// Defaults: `frequency = 1.0`, thickness `0.0..=0.0`, layers `1..=1`,
    /// repetition allowed, `min_depth = 0.0`.
    pub fn new(types: Vec<ClassCode>, weights: Vec<f64>) -> Self {
        Self {
            types,
            weights,
            frequency: 1.0,
            min_thick: 0.0,
            max_thick: 0.0,
            min_layers: 1,
            max_layers: 1,
            allow_repeat: true,
            min_depth: 0.0,
        }
    }

    /// Sets the occurrence probability.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the total-thickness bounds.
    pub fn with_thickness(mut self, min_thick: f64, max_thick: f64) -> Self {
        self.min_thick = min_thick;
        self.max_thick = max_thick;
        self
    }

    /// Sets the layer-count bounds (inclusive).
    pub fn with_layers(mut self, min_layers: usize, max_layers: usize) -> Self {
        self.min_layers = min_layers;
        self.max_layers = max_layers;
        self
    }

    /// Sets whether two consecutive layers may share a type.
    pub fn with_repeat(mut self, allow_repeat: bool) -> Self {
        self.allow_repeat = allow_repeat;
        self
    }

    /// Sets the cumulative depth shallower sections must reach.
    pub fn with_min_depth(mut self, min_depth: f64) -> Self {
        self.min_depth = min_depth;
        self
    }

    /// Returns the candidate class codes.
    pub fn types(&self) -> &[ClassCode] {
        &self.types
    }

    /// Returns the type weights, parallel to [`types`](Self::types).
    ///
    /// Inside a [`PriorConfig`](crate::PriorConfig) these are normalized to
    /// sum to 1.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the occurrence probability.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Returns the minimum total thickness.
    pub fn min_thick(&self) -> f64 {
        self.min_thick
    }

    /// Returns the maximum total thickness.
    pub fn max_thick(&self) -> f64 {
        self.max_thick
    }

    /// Returns the minimum layer count.
    pub fn min_layers(&self) -> usize {
        self.min_layers
    }

    /// Returns the maximum layer count.
    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    /// Returns `true` if consecutive layers may share a type.
    pub fn allow_repeat(&self) -> bool {
        self.allow_repeat
    }

    /// Returns the minimum cumulative depth of shallower sections.
    pub fn min_depth(&self) -> f64 {
        self.min_depth
    }

    /// Checks the type/weight vectors and replaces the weights with a
    /// normalized copy. A code may appear only once. `index` is 1-based.
    pub(crate) fn normalize_weights(&mut self, index: usize) -> Result<(), PriorError> {
        if self.types.is_empty() {
            return Err(PriorError::EmptyTypes { section: index });
        }
        let mut seen = BTreeSet::new();
        if let Some(&code) = self.types.iter().find(|&&c| !seen.insert(c)) {
            return Err(PriorError::DuplicateSectionType {
                section: index,
                code,
            });
        }
        let n = self.types.len();

        if self.weights.len() == 1 && self.weights[0] == 1.0 {
            self.weights = vec![1.0 / n as f64; n];
            return Ok(());
        }
        if self.weights.len() != n {
            return Err(PriorError::WeightLengthMismatch {
                section: index,
                types: n,
                weights: self.weights.len(),
            });
        }
        if let Some(&w) = self.weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(PriorError::InvalidSection {
                section: index,
                reason: format!("weights must be finite and non-negative, got {w}"),
            });
        }
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return Err(PriorError::ZeroWeights { section: index });
        }
        for w in &mut self.weights {
            *w /= total;
        }
        Ok(())
    }

    /// Checks the parameters only an overlay section uses. `index` is 1-based.
    pub(crate) fn validate_overlay(&self, index: usize) -> Result<(), PriorError> {
        let invalid = |reason: String| PriorError::InvalidSection {
            section: index,
            reason,
        };

        if !(0.0..=1.0).contains(&self.frequency) {
            return Err(invalid(format!(
                "frequency must be in [0, 1], got {}",
                self.frequency
            )));
        }
        if !self.min_thick.is_finite() || self.min_thick < 0.0 {
            return Err(invalid(format!(
                "min_thick must be finite and non-negative, got {}",
                self.min_thick
            )));
        }
        if !self.max_thick.is_finite() || self.max_thick <= 0.0 {
            return Err(invalid(format!(
                "max_thick must be finite and positive, got {}",
                self.max_thick
            )));
        }
        if self.min_thick > self.max_thick {
            return Err(invalid(format!(
                "min_thick ({}) exceeds max_thick ({})",
                self.min_thick, self.max_thick
            )));
        }
        if self.min_layers == 0 {
            return Err(invalid("min_layers must be at least 1".to_string()));
        }
        if self.min_layers > self.max_layers {
            return Err(invalid(format!(
                "min_layers ({}) exceeds max_layers ({})",
                self.min_layers, self.max_layers
            )));
        }
        if !self.allow_repeat && self.max_layers >= 2 {
            let positive = self.weights.iter().filter(|&&w| w > 0.0).count();
            if positive < 2 {
                return Err(PriorError::DegenerateNoRepeat { section: index });
            }
        }
        Ok(())
    }

    /// Checks the minimum depth, which applies to every section.
    pub(crate) fn validate_min_depth(&self, index: usize) -> Result<(), PriorError> {
        if !self.min_depth.is_finite() || self.min_depth < 0.0 {
            return Err(PriorError::InvalidSection {
                section: index,
                reason: format!(
                    "min_depth must be finite and non-negative, got {}",
                    self.min_depth
                ),
            });
        }
        Ok(())
    }
}
