//! Run diagnostics accumulated across realizations.
//!
//! [`Diagnostics`] is a plain accumulator: the sequential driver records into
//! one value, the parallel driver folds one per rayon job and merges them.
//! [`Diagnostics::finish`] turns it into a serializable [`DiagnosticsReport`]
//! with three signals:
//!
//! - `constraints_unsatisfied`: some realization exhausted its try budget;
//! - `layer_counts_skewed`: for some overlay section, the observed layer
//!   counts fail a chi-square goodness-of-fit test against the uniform
//!   distribution on `[min_layers, max_layers]`;
//! - `average_tries`: mean number of draws per realization.

use std::time::Duration;

use lithos_layers::LithologyRealization;
use lithos_prior::PriorConfig;
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Minimum expected count per histogram bin for the skew test to apply.
pub const MIN_EXPECTED_PER_BIN: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
struct SectionCounts {
    min_layers: usize,
    max_layers: usize,
    /// Occurrences of each layer count, offset by `min_layers`.
    histogram: Vec<u64>,
}

impl SectionCounts {
    fn record(&mut self, n_layers: usize) {
        if let Some(bin) = n_layers
            .checked_sub(self.min_layers)
            .and_then(|i| self.histogram.get_mut(i))
        {
            *bin += 1;
        }
    }

    fn n_active(&self) -> u64 {
        self.histogram.iter().sum()
    }
}

/// Accumulator threaded through the ensemble driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    n_reals: usize,
    n_exhausted: usize,
    total_tries: u64,
    sections: Vec<SectionCounts>,
}

impl Diagnostics {
    /// Creates an empty accumulator with one histogram per overlay section.
    pub fn new(prior: &PriorConfig) -> Self {
        let sections = prior
            .overlays()
            .iter()
            .map(|s| SectionCounts {
                min_layers: s.min_layers(),
                max_layers: s.max_layers(),
                histogram: vec![0; s.max_layers() - s.min_layers() + 1],
            })
            .collect();
        Self {
            n_reals: 0,
            n_exhausted: 0,
            total_tries: 0,
            sections,
        }
    }

    /// Records one realization.
    pub fn record(&mut self, realization: &LithologyRealization) {
        self.n_reals += 1;
        if realization.exhausted() {
            self.n_exhausted += 1;
        }
        self.total_tries += realization.tries() as u64;
        for (counts, seq) in self.sections.iter_mut().zip(realization.sections()) {
            if let Some(seq) = seq {
                counts.record(seq.len());
            }
        }
    }

    /// Combines two accumulators built from the same prior.
    pub fn merge(mut self, other: Self) -> Self {
        self.n_reals += other.n_reals;
        self.n_exhausted += other.n_exhausted;
        self.total_tries += other.total_tries;
        for (a, b) in self.sections.iter_mut().zip(other.sections) {
            for (x, y) in a.histogram.iter_mut().zip(b.histogram) {
                *x += y;
            }
        }
        self
    }

    /// Returns the number of recorded realizations.
    pub fn n_reals(&self) -> usize {
        self.n_reals
    }

    /// Returns the number of realizations that exhausted their try budget.
    pub fn n_exhausted(&self) -> usize {
        self.n_exhausted
    }

    /// Returns the summed try count.
    pub fn total_tries(&self) -> u64 {
        self.total_tries
    }

    /// Builds the report, flagging sections whose layer-count test yields a
    /// p-value below `skew_p_value`.
    pub fn finish(&self, skew_p_value: f64, elapsed: Duration) -> DiagnosticsReport {
        let sections: Vec<SectionReport> = self
            .sections
            .iter()
            .enumerate()
            .map(|(i, counts)| {
                let test = uniformity_test(&counts.histogram);
                SectionReport {
                    section: i + 1,
                    min_layers: counts.min_layers,
                    max_layers: counts.max_layers,
                    n_active: counts.n_active(),
                    histogram: counts.histogram.clone(),
                    chi_square: test.map(|(stat, _)| stat),
                    p_value: test.map(|(_, p)| p),
                    skewed: test.is_some_and(|(_, p)| p < skew_p_value),
                }
            })
            .collect();

        let average_tries = if self.n_reals == 0 {
            0.0
        } else {
            self.total_tries as f64 / self.n_reals as f64
        };

        DiagnosticsReport {
            n_reals: self.n_reals,
            n_exhausted: self.n_exhausted,
            constraints_unsatisfied: self.n_exhausted > 0,
            layer_counts_skewed: sections.iter().any(|s| s.skewed),
            average_tries,
            elapsed_secs: elapsed.as_secs_f64(),
            sections,
        }
    }
}

/// Chi-square goodness of fit of `histogram` against equal bin
/// probabilities. Returns `(statistic, p_value)`, or `None` when there are
/// fewer than two bins or fewer than [`MIN_EXPECTED_PER_BIN`] expected per bin.
pub fn uniformity_test(histogram: &[u64]) -> Option<(f64, f64)> {
    let k = histogram.len();
    if k < 2 {
        return None;
    }
    let n: u64 = histogram.iter().sum();
    let expected = n as f64 / k as f64;
    if expected < MIN_EXPECTED_PER_BIN {
        return None;
    }
    let stat: f64 = histogram
        .iter()
        .map(|&o| {
            let d = o as f64 - expected;
            d * d / expected
        })
        .sum();
    let dist = ChiSquared::new((k - 1) as f64).ok()?;
    Some((stat, dist.sf(stat)))
}

/// Per-section layer-count summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    /// 1-based section index.
    pub section: usize,
    /// Smallest allowed layer count.
    pub min_layers: usize,
    /// Largest allowed layer count.
    pub max_layers: usize,
    /// Realizations in which the section was active.
    pub n_active: u64,
    /// Occurrences of each layer count from `min_layers` to `max_layers`.
    pub histogram: Vec<u64>,
    /// Chi-square statistic, if the test applied.
    pub chi_square: Option<f64>,
    /// Chi-square p-value, if the test applied.
    pub p_value: Option<f64>,
    /// `true` if the p-value fell below the configured significance level.
    pub skewed: bool,
}

/// Summary of an ensemble run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    n_reals: usize,
    n_exhausted: usize,
    constraints_unsatisfied: bool,
    layer_counts_skewed: bool,
    average_tries: f64,
    elapsed_secs: f64,
    sections: Vec<SectionReport>,
}

impl DiagnosticsReport {
    /// Returns the number of realizations.
    pub fn n_reals(&self) -> usize {
        self.n_reals
    }

    /// Returns the number of realizations that exhausted their try budget.
    pub fn n_exhausted(&self) -> usize {
        self.n_exhausted
    }

    /// Returns `true` if any realization may violate the prior's constraints.
    pub fn constraints_unsatisfied(&self) -> bool {
        self.constraints_unsatisfied
    }

    /// Returns `true` if any section's layer counts look non-uniform.
    pub fn layer_counts_skewed(&self) -> bool {
        self.layer_counts_skewed
    }

    /// Returns the mean number of draws per realization.
    pub fn average_tries(&self) -> f64 {
        self.average_tries
    }

    /// Returns the wall-clock duration of the run in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Returns the per-section layer-count summaries.
    pub fn sections(&self) -> &[SectionReport] {
        &self.sections
    }
}
