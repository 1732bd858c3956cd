use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use lithos_prior::PriorConfig;
use lithos_realize::{DiagnosticsReport, Ensemble, generate_ensemble};

use crate::cli::GenerateArgs;
use crate::config;
use crate::convert;

/// Run the ensemble generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Load the prior file and apply CLI overrides
    let mut config = config::load(&args.config)?;
    if let Some(n) = args.n_reals {
        config.run.n_reals = n;
    }
    if args.sequential {
        config.run.parallel = false;
    }

    // 2. Build library types
    let prior = convert::build_prior(&config)?;
    let grid = convert::build_depth_grid(&config.run)?;
    let realize_cfg = convert::build_realize_config(&config, args.seed)?;
    info!(
        path = %args.config.display(),
        n_classes = prior.classes().len(),
        n_sections = prior.n_sections(),
        n_depths = grid.len(),
        n_reals = realize_cfg.n_reals(),
        "prior loaded"
    );

    // 3. Sample
    let run = generate_ensemble(&prior, &grid, &realize_cfg).context("ensemble generation failed")?;

    // 4. Report
    println!("{}", summary(&prior, run.ensemble(), run.report()));
    if let Some(ref path) = args.diagnostics {
        write_report(path, run.report())?;
        info!(path = %path.display(), "diagnostics written");
    }
    Ok(())
}

/// Human-readable run summary.
fn summary(prior: &PriorConfig, ensemble: &Ensemble, report: &DiagnosticsReport) -> String {
    let mut lines = vec![format!(
        "{} realizations x {} depths, average tries {:.1}, {} exhausted",
        ensemble.n_reals(),
        ensemble.n_depths(),
        report.average_tries(),
        report.n_exhausted(),
    )];
    for (code, fraction) in ensemble.class_fractions() {
        let name = prior.class(code).map_or("?", |c| c.name());
        lines.push(format!("  {code:>3} {name:<20} {:>6.2}%", fraction * 100.0));
    }
    if report.constraints_unsatisfied() {
        lines.push("warning: some realizations may not satisfy the prior constraints".to_string());
    }
    if report.layer_counts_skewed() {
        lines.push("warning: layer-count distribution deviates from uniform".to_string());
    }
    lines.join("\n")
}

/// Writes the diagnostics report as pretty-printed JSON.
fn write_report(path: &Path, report: &DiagnosticsReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize diagnostics")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write diagnostics: {}", path.display()))
}
