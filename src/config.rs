use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level prior file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LithosConfig {
    /// Master RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Run settings.
    #[serde(default)]
    pub run: RunToml,

    /// Lithology classes.
    pub classes: Vec<ClassToml>,

    /// Sections, shallowest first; the last one is the basal section.
    pub sections: Vec<SectionToml>,

    /// Optional water-table distribution.
    #[serde(default)]
    pub water_table: Option<WaterTableToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default = "default_n_reals")]
    pub n_reals: usize,
    #[serde(default = "default_depth_max")]
    pub depth_max: f64,
    #[serde(default = "default_depth_step")]
    pub depth_step: f64,
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_max_tries")]
    pub max_tries: usize,
    #[serde(default = "default_escalate_after")]
    pub escalate_after: usize,
    #[serde(default = "default_skew_p_value")]
    pub skew_p_value: f64,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            n_reals: default_n_reals(),
            depth_max: default_depth_max(),
            depth_step: default_depth_step(),
            parallel: true,
            max_tries: default_max_tries(),
            escalate_after: default_escalate_after(),
            skew_p_value: default_skew_p_value(),
        }
    }
}

fn default_n_reals() -> usize {
    1000
}
fn default_depth_max() -> f64 {
    90.0
}
fn default_depth_step() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_max_tries() -> usize {
    1000
}
fn default_escalate_after() -> usize {
    100
}
fn default_skew_p_value() -> f64 {
    0.001
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassToml {
    pub code: u16,
    pub name: String,
    pub min_thick: f64,
    pub max_thick: f64,
    pub res: f64,
    pub res_unc: f64,
    #[serde(default)]
    pub unsat_res: Option<f64>,
    #[serde(default)]
    pub unsat_res_unc: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionToml {
    pub types: Vec<u16>,
    #[serde(default = "default_probabilities")]
    pub probabilities: Vec<f64>,
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    #[serde(default)]
    pub min_thick: f64,
    #[serde(default)]
    pub max_thick: f64,
    #[serde(default = "default_layers")]
    pub min_layers: usize,
    #[serde(default = "default_layers")]
    pub max_layers: usize,
    #[serde(default = "default_true")]
    pub repeat: bool,
    #[serde(default)]
    pub min_depth: f64,
}

/// `[1.0]` means equal weights for every type.
fn default_probabilities() -> Vec<f64> {
    vec![1.0]
}
fn default_frequency() -> f64 {
    1.0
}
fn default_layers() -> usize {
    1
}

/// Water-table distribution; which fields are required depends on
/// `distribution`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaterTableToml {
    pub distribution: String,
    pub depth: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

/// Reads and parses a prior file.
pub fn load(path: &Path) -> Result<LithosConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}
