//! Check command: validate a prior file without sampling.

use anyhow::Result;
use tracing::info_span;

use crate::cli::CheckArgs;
use crate::config;
use crate::convert;

/// Validates the prior file and prints a one-line summary.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    let config = config::load(&args.config)?;
    let prior = convert::build_prior(&config)?;
    let grid = convert::build_depth_grid(&config.run)?;
    convert::build_realize_config(&config, None)?;

    println!(
        "{}: ok ({} classes, {} sections, {} depth samples to {} m, water table {})",
        args.config.display(),
        prior.classes().len(),
        prior.n_sections(),
        grid.len(),
        grid.max_depth(),
        if prior.water_table().is_some() {
            "configured"
        } else {
            "at surface"
        },
    );
    Ok(())
}
