use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lithos stochastic lithology and resistivity prior generator.
#[derive(Parser)]
#[command(
    name = "lithos",
    version,
    about = "Stochastic 1-D lithology and resistivity prior generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate an ensemble of prior realizations.
    Generate(GenerateArgs),
    /// Validate a prior file without sampling.
    Check(CheckArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML prior file.
    #[arg(short, long, default_value = "lithos.toml")]
    pub config: PathBuf,

    /// Override the number of realizations from config.
    #[arg(short, long)]
    pub n_reals: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run realizations on a single thread.
    #[arg(long)]
    pub sequential: bool,

    /// Write the diagnostics report as JSON to this path.
    #[arg(short, long)]
    pub diagnostics: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML prior file.
    #[arg(short, long, default_value = "lithos.toml")]
    pub config: PathBuf,
}
