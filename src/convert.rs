//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use lithos_prior::{Class, DepthGrid, PriorConfig, ResistivityPrior, Section, WaterTableModel};
use lithos_realize::{RealizeConfig, RejectionBudget};

use crate::config::*;

/// Parses the `[water_table]` table into a [`WaterTableModel`].
pub fn parse_water_table(wt: &WaterTableToml) -> Result<WaterTableModel> {
    let field = |value: Option<f64>, name: &str| {
        value.with_context(|| {
            format!(
                "water_table distribution {:?} requires `{name}`",
                wt.distribution
            )
        })
    };
    match wt.distribution.to_lowercase().as_str() {
        "fixed" => Ok(WaterTableModel::Fixed {
            depth: field(wt.depth, "depth")?,
        }),
        "uniform" => Ok(WaterTableModel::Uniform {
            min: field(wt.min, "min")?,
            max: field(wt.max, "max")?,
        }),
        "normal" => Ok(WaterTableModel::Normal {
            mean: field(wt.mean, "mean")?,
            std: field(wt.std, "std")?,
        }),
        other => bail!("unknown water_table distribution: {other:?}"),
    }
}

/// Converts one `[[classes]]` entry.
pub fn build_class(c: &ClassToml) -> Result<Class> {
    let class = Class::new(
        c.code,
        c.name.clone(),
        c.min_thick,
        c.max_thick,
        ResistivityPrior::new(c.res, c.res_unc),
    );
    match (c.unsat_res, c.unsat_res_unc) {
        (Some(res), Some(unc)) => Ok(class.with_unsaturated(ResistivityPrior::new(res, unc))),
        (None, None) => Ok(class),
        _ => bail!(
            "class {}: unsat_res and unsat_res_unc must be given together",
            c.code
        ),
    }
}

/// Converts one `[[sections]]` entry.
pub fn build_section(s: &SectionToml) -> Section {
    Section::new(s.types.clone(), s.probabilities.clone())
        .with_frequency(s.frequency)
        .with_thickness(s.min_thick, s.max_thick)
        .with_layers(s.min_layers, s.max_layers)
        .with_repeat(s.repeat)
        .with_min_depth(s.min_depth)
}

/// Builds and validates the [`PriorConfig`].
pub fn build_prior(config: &LithosConfig) -> Result<PriorConfig> {
    let classes = config
        .classes
        .iter()
        .map(build_class)
        .collect::<Result<Vec<_>>>()?;
    let sections = config.sections.iter().map(build_section).collect();
    let water_table = config
        .water_table
        .as_ref()
        .map(parse_water_table)
        .transpose()?;
    PriorConfig::new(classes, sections, water_table).context("invalid prior")
}

/// Builds the [`DepthGrid`] from the `[run]` table.
pub fn build_depth_grid(run: &RunToml) -> Result<DepthGrid> {
    DepthGrid::new(run.depth_max, run.depth_step).context("invalid depth grid")
}

/// Builds the [`RealizeConfig`]; a CLI seed takes precedence over the file's.
pub fn build_realize_config(config: &LithosConfig, seed: Option<u64>) -> Result<RealizeConfig> {
    let run = &config.run;
    let mut cfg = RealizeConfig::new(run.n_reals)
        .with_parallel(run.parallel)
        .with_budget(RejectionBudget::new(run.max_tries, run.escalate_after))
        .with_skew_p_value(run.skew_p_value);
    if let Some(s) = seed.or(config.seed) {
        cfg = cfg.with_seed(s);
    }
    cfg.validate().context("invalid [run] settings")?;
    Ok(cfg)
}
