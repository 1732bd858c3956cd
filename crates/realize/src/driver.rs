//! Ensemble driver: lithology, water table and resistivity per realization.
//!
//! Each realization draws from its own [`StdRng`], seeded from a seed taken
//! in order from one master generator. The sequential and the rayon drivers
//! therefore produce identical ensembles for the same master seed.

use std::time::Instant;

use lithos_layers::{LithologyRealization, RejectionBudget, generate_lithology_with_budget};
use lithos_prior::{ClassCode, DepthGrid, PriorConfig};
use lithos_resistivity::{assign_resistivity, sample_water_table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::RealizeConfig;
use crate::diagnostics::{Diagnostics, DiagnosticsReport};
use crate::ensemble::Ensemble;
use crate::error::RealizeError;

/// One sampled subsurface column.
#[derive(Debug, Clone, PartialEq)]
pub struct Realization {
    column: LithologyRealization,
    resistivity: Vec<f64>,
    water_table: f64,
}

impl Realization {
    /// Returns the lithology column and its layer stack.
    pub fn column(&self) -> &LithologyRealization {
        &self.column
    }

    /// Returns the class code at each depth sample.
    pub fn lithology(&self) -> &[ClassCode] {
        self.column.lithology()
    }

    /// Returns the resistivity (ohm-m) at each depth sample.
    pub fn resistivity(&self) -> &[f64] {
        &self.resistivity
    }

    /// Returns the water-table depth.
    pub fn water_table(&self) -> f64 {
        self.water_table
    }
}

/// Draws one realization: lithology, then water table, then resistivity.
///
/// # Errors
///
/// Propagates [`LayerError`](lithos_layers::LayerError) and
/// [`ResistivityError`](lithos_resistivity::ResistivityError).
pub fn realize(
    prior: &PriorConfig,
    depths: &[f64],
    budget: RejectionBudget,
    rng: &mut impl Rng,
) -> Result<Realization, RealizeError> {
    let column = generate_lithology_with_budget(prior, depths, budget, rng)?;
    let water_table = sample_water_table(prior.water_table(), rng);
    let resistivity = assign_resistivity(
        prior,
        column.lithology(),
        column.layer_index(),
        water_table,
        depths,
        rng,
    )?;
    Ok(Realization {
        column,
        resistivity,
        water_table,
    })
}

/// An ensemble together with its diagnostics report.
#[derive(Debug, Clone)]
pub struct EnsembleRun {
    ensemble: Ensemble,
    report: DiagnosticsReport,
}

impl EnsembleRun {
    /// Returns the ensemble.
    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    /// Returns the diagnostics report.
    pub fn report(&self) -> &DiagnosticsReport {
        &self.report
    }

    /// Consumes the run, returning `(ensemble, report)`.
    pub fn into_parts(self) -> (Ensemble, DiagnosticsReport) {
        (self.ensemble, self.report)
    }
}

/// Generates `config.n_reals()` realizations on `grid`.
///
/// A realization that exhausts its try budget is kept and counted in the
/// report; it never aborts the run.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`RealizeError::InvalidConfig`] | `config` fails validation |
/// | [`RealizeError::Layer`] | lithology generation failed |
/// | [`RealizeError::Resistivity`] | resistivity assignment failed |
#[tracing::instrument(skip_all, fields(n_reals = config.n_reals(), n_depths = grid.len(), parallel = config.parallel()))]
pub fn generate_ensemble(
    prior: &PriorConfig,
    grid: &DepthGrid,
    config: &RealizeConfig,
) -> Result<EnsembleRun, RealizeError> {
    config.validate()?;
    let start = Instant::now();

    let mut master = match config.seed() {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let seeds: Vec<u64> = (0..config.n_reals()).map(|_| master.random()).collect();

    let mut ensemble = Ensemble::zeros(config.n_reals(), grid.depths().to_vec());
    let diagnostics = if config.parallel() {
        fill_parallel(prior, grid.depths(), config.budget(), &seeds, &mut ensemble)?
    } else {
        fill_sequential(prior, grid.depths(), config.budget(), &seeds, &mut ensemble)?
    };
    let report = diagnostics.finish(config.skew_p_value(), start.elapsed());

    info!(
        n_reals = report.n_reals(),
        average_tries = report.average_tries(),
        elapsed_secs = report.elapsed_secs(),
        "ensemble complete"
    );
    if report.constraints_unsatisfied() {
        warn!(
            n_exhausted = report.n_exhausted(),
            "some realizations exhausted the try budget; results may not match the prior"
        );
    }
    if report.layer_counts_skewed() {
        let skewed: Vec<usize> = report
            .sections()
            .iter()
            .filter(|s| s.skewed)
            .map(|s| s.section)
            .collect();
        warn!(
            sections = ?skewed,
            "layer-count distribution deviates from uniform"
        );
    }

    Ok(EnsembleRun { ensemble, report })
}

/// Draws the realization for `seed` and writes it into one ensemble row.
fn store_row(
    prior: &PriorConfig,
    depths: &[f64],
    budget: RejectionBudget,
    seed: u64,
    (lithology, resistivity, water_table): (&mut [ClassCode], &mut [f64], &mut f64),
    diagnostics: &mut Diagnostics,
) -> Result<(), RealizeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let real = realize(prior, depths, budget, &mut rng)?;
    lithology.copy_from_slice(real.lithology());
    resistivity.copy_from_slice(real.resistivity());
    *water_table = real.water_table();
    diagnostics.record(real.column());
    Ok(())
}

fn fill_sequential(
    prior: &PriorConfig,
    depths: &[f64],
    budget: RejectionBudget,
    seeds: &[u64],
    ensemble: &mut Ensemble,
) -> Result<Diagnostics, RealizeError> {
    let n = depths.len();
    let mut diagnostics = Diagnostics::new(prior);
    let rows = ensemble
        .lithology
        .chunks_mut(n)
        .zip(ensemble.resistivity.chunks_mut(n))
        .zip(ensemble.water_table.iter_mut())
        .zip(seeds);
    for (((lith, res), wt), &seed) in rows {
        store_row(prior, depths, budget, seed, (lith, res, wt), &mut diagnostics)?;
    }
    Ok(diagnostics)
}

fn fill_parallel(
    prior: &PriorConfig,
    depths: &[f64],
    budget: RejectionBudget,
    seeds: &[u64],
    ensemble: &mut Ensemble,
) -> Result<Diagnostics, RealizeError> {
    let n = depths.len();
    ensemble
        .lithology
        .par_chunks_mut(n)
        .zip(ensemble.resistivity.par_chunks_mut(n))
        .zip(ensemble.water_table.par_iter_mut())
        .zip(seeds.par_iter())
        .try_fold(
            || Diagnostics::new(prior),
            |mut diagnostics, (((lith, res), wt), &seed)| {
                store_row(prior, depths, budget, seed, (lith, res, wt), &mut diagnostics)?;
                Ok::<_, RealizeError>(diagnostics)
            },
        )
        .try_reduce(|| Diagnostics::new(prior), |a, b| Ok(a.merge(b)))
}
