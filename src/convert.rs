//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{bail, Result};

use pluvio_gamma::{FitMethod, GammaConfig, MomentOrders};
use pluvio_radar::RadarConfig;

use crate::config::{EstimationToml, RadarToml};

/// Parses a moment-order name ("246" or "234") into the enum variant.
pub fn parse_moment_orders(s: &str) -> Result<MomentOrders> {
    match s {
        "246" | "m246" => Ok(MomentOrders::M246),
        "234" | "m234" => Ok(MomentOrders::M234),
        other => bail!("unknown moment orders: {other:?} (expected 246 or 234)"),
    }
}

/// Builds the gamma estimation configuration and method from TOML settings.
pub fn build_gamma_config(toml: &EstimationToml) -> Result<(FitMethod, GammaConfig)> {
    let method: FitMethod = toml.method.parse()?;
    let config = GammaConfig::new()
        .with_moment_orders(parse_moment_orders(&toml.moment_orders)?)
        .with_mu_bounds(toml.mu_min, toml.mu_max);
    config.validate()?;
    Ok((method, config))
}

/// Builds the radar processor configuration from TOML settings.
pub fn build_radar_config(toml: &RadarToml) -> Result<RadarConfig> {
    let base = match toml.wavelength_mm {
        Some(wl) => RadarConfig::new(wl),
        None => match toml.band.to_lowercase().as_str() {
            "s" => RadarConfig::s_band(),
            "c" => RadarConfig::c_band(),
            "x" => RadarConfig::x_band(),
            other => bail!("unknown radar band: {other:?} (expected s, c, or x)"),
        },
    };
    let config = base
        .with_dielectric_factor(toml.dielectric_factor)
        .with_temperature_c(toml.temperature_c);
    config.validate()?;
    Ok(config)
}
