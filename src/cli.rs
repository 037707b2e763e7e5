use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pluvio disdrometer DSD processing toolkit.
#[derive(Parser)]
#[command(
    name = "pluvio",
    version,
    about = "Disdrometer drop-size-distribution processing toolkit"
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
    /// Derive physical (and optionally radar) fields from a spectra table.
    Process(ProcessArgs),
    /// Fit gamma DSD parameters to each spectrum.
    Fit(FitArgs),
}

/// Arguments for the `process` subcommand.
#[derive(clap::Args)]
pub struct ProcessArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pluvio.toml")]
    pub config: PathBuf,

    /// Override input spectra JSON path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also compute radar moments (requires a scattering table in config).
    #[arg(long)]
    pub radar: bool,

    /// Fit rain-rate power-law relationships (implies --radar).
    #[arg(long)]
    pub relations: bool,
}

/// Arguments for the `fit` subcommand.
#[derive(clap::Args)]
pub struct FitArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pluvio.toml")]
    pub config: PathBuf,

    /// Override input spectra JSON path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override estimation method (moments, mle, constrained).
    #[arg(short, long)]
    pub method: Option<String>,
}
