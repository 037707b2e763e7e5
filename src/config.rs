use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Pluvio configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PluvioConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Gamma estimation settings.
    #[serde(default)]
    pub estimation: EstimationToml,

    /// Radar moment settings.
    #[serde(default)]
    pub radar: RadarToml,

    /// Process-command settings.
    #[serde(default)]
    pub process: ProcessToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimationToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_moment_orders")]
    pub moment_orders: String,
    #[serde(default = "default_mu_min")]
    pub mu_min: f64,
    #[serde(default = "default_mu_max")]
    pub mu_max: f64,
}

impl Default for EstimationToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            moment_orders: default_moment_orders(),
            mu_min: default_mu_min(),
            mu_max: default_mu_max(),
        }
    }
}

fn default_method() -> String {
    "moments".to_string()
}
fn default_moment_orders() -> String {
    "246".to_string()
}
fn default_mu_min() -> f64 {
    -2.99
}
fn default_mu_max() -> f64 {
    20.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RadarToml {
    /// Named band (s, c, x); `wavelength_mm` overrides if both are set.
    #[serde(default = "default_band")]
    pub band: String,
    #[serde(default)]
    pub wavelength_mm: Option<f64>,
    #[serde(default = "default_dielectric")]
    pub dielectric_factor: f64,
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,
    /// Path to a precomputed scattering-amplitude JSON table.
    #[serde(default)]
    pub scattering_table: Option<PathBuf>,
}

impl Default for RadarToml {
    fn default() -> Self {
        Self {
            band: default_band(),
            wavelength_mm: None,
            dielectric_factor: default_dielectric(),
            temperature_c: default_temperature(),
            scattering_table: None,
        }
    }
}

fn default_band() -> String {
    "x".to_string()
}
fn default_dielectric() -> f64 {
    0.93
}
fn default_temperature() -> f64 {
    10.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessToml {
    /// Physical fields to compute; radar fields are appended with --radar.
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

impl Default for ProcessToml {
    fn default() -> Self {
        Self {
            fields: default_fields(),
        }
    }
}

fn default_fields() -> Vec<String> {
    ["rain_rate", "lwc", "d0", "dm", "nt", "nw", "dmax"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
