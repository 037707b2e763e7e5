//! Fit command: per-spectrum gamma parameter estimation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, info_span};

use pluvio_gamma::{estimator_for, fit_container, FitMethod};

use crate::cli::FitArgs;
use crate::config::PluvioConfig;
use crate::convert;
use crate::input;
use crate::output::{self, FitOut, FitOutput};

/// Run the gamma-fitting pipeline.
pub fn run(args: FitArgs) -> Result<()> {
    let _cmd = info_span!("fit").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PluvioConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Read the normalized spectra table
    let input_path = args
        .input
        .as_ref()
        .or(config.io.input.as_ref())
        .ok_or_else(|| {
            anyhow::anyhow!("no input path: set [io].input in config or use --input")
        })?;
    let container = input::read_spectra(input_path)?;
    if container.is_empty() {
        bail!("spectra document contains no samples");
    }

    // 3. Build the strategy: CLI --method overrides config
    let (config_method, gamma_config) = convert::build_gamma_config(&config.estimation)?;
    let method: FitMethod = match &args.method {
        Some(name) => name.parse()?,
        None => config_method,
    };
    let strategy = estimator_for(method, &gamma_config)?;

    // 4. Fit every spectrum
    let fits = fit_container(&container, strategy.as_ref());
    let n_undefined = fits.iter().filter(|f| f.is_undefined()).count();
    info!(
        method = %method,
        n_fits = fits.len(),
        n_undefined,
        "gamma fits computed"
    );

    // 5. Write output JSON
    let out = FitOutput {
        metadata: output::metadata(&container),
        method: method.as_str().to_string(),
        time: container.timestamps(),
        fits: fits.iter().map(FitOut::from).collect(),
    };
    let out_path: PathBuf = args
        .output
        .or(config.io.output.clone())
        .unwrap_or_else(|| input_path.with_extension("fits.json"));

    std::fs::write(&out_path, output::to_json(&out)?)
        .with_context(|| format!("failed to write output: {}", out_path.display()))?;
    info!(path = %out_path.display(), "gamma fits written");

    Ok(())
}
