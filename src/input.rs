//! Normalized spectra documents: the reader→core interface.
//!
//! Instrument-specific file parsing belongs to external readers; pluvio
//! consumes their normalized output, a JSON document carrying timestamps
//! and per-bin concentrations aligned to a named or inline bin table.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use pluvio_bins::{BinTable, VelocityLaw};
use pluvio_dsd::{DsdContainer, DsdSpectrum, Location};
use pluvio_radar::{ScatteringRow, ScatteringSource, TabulatedScattering};

/// A normalized spectra table as produced by an instrument reader.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpectraDocument {
    /// Bin-table selection: a named preset or an inline layout.
    pub instrument: InstrumentSpec,
    /// Optional instrument location.
    #[serde(default)]
    pub location: Option<LocationDoc>,
    /// One timestamp per sample (RFC 3339).
    pub time: Vec<DateTime<Utc>>,
    /// One concentration row per sample, aligned to the bin table
    /// (mm⁻¹·m⁻³).
    pub nd: Vec<Vec<f64>>,
}

/// Instrument bin-table selection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InstrumentSpec {
    /// A named preset, e.g. `"parsivel"`.
    Named(String),
    /// An inline bin layout.
    Inline {
        /// Bin center diameters (mm).
        centers: Vec<f64>,
        /// Bin widths (mm).
        widths: Vec<f64>,
        /// Fall-velocity relation.
        velocity: VelocityLaw,
    },
}

/// Instrument location in a spectra document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationDoc {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A precomputed scattering-amplitude table document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScatteringDocument {
    pub wavelength_mm: f64,
    pub temperature_c: f64,
    pub rows: Vec<ScatteringRow>,
}

/// Builds the bin table an instrument spec names.
pub fn build_bin_table(spec: &InstrumentSpec) -> Result<BinTable> {
    match spec {
        InstrumentSpec::Named(name) => match name.to_lowercase().as_str() {
            "parsivel" => Ok(BinTable::parsivel()),
            other => bail!("unknown instrument preset: {other:?} (expected parsivel)"),
        },
        InstrumentSpec::Inline {
            centers,
            widths,
            velocity,
        } => BinTable::build(centers.clone(), widths.clone(), *velocity)
            .context("invalid inline bin table"),
    }
}

/// Reads a spectra document and assembles the DSD container.
pub fn read_spectra(path: &Path) -> Result<DsdContainer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spectra file: {}", path.display()))?;
    let doc: SpectraDocument =
        serde_json::from_str(&text).context("failed to parse spectra JSON")?;

    if doc.time.len() != doc.nd.len() {
        bail!(
            "spectra document has {} timestamps but {} concentration rows",
            doc.time.len(),
            doc.nd.len()
        );
    }

    let bins = Arc::new(build_bin_table(&doc.instrument)?);
    let mut container = DsdContainer::new(bins);
    if let Some(loc) = doc.location {
        container = container.with_location(Location {
            latitude: loc.latitude,
            longitude: loc.longitude,
            name: loc.name,
        });
    }

    for (timestamp, nd) in doc.time.into_iter().zip(doc.nd) {
        container
            .append(DsdSpectrum::new(timestamp, nd))
            .with_context(|| format!("failed to append spectrum at {timestamp}"))?;
    }

    info!(
        n_spectra = container.len(),
        n_bins = container.bin_table().len(),
        "spectra loaded"
    );
    Ok(container)
}

/// Reads a scattering-amplitude table document.
pub fn read_scattering_table(path: &Path) -> Result<TabulatedScattering> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scattering table: {}", path.display()))?;
    let doc: ScatteringDocument =
        serde_json::from_str(&text).context("failed to parse scattering-table JSON")?;
    let table = TabulatedScattering::build(doc.wavelength_mm, doc.temperature_c, doc.rows)
        .context("invalid scattering table")?;
    info!(
        n_rows = table.len(),
        wavelength_mm = table.wavelength_mm(),
        "scattering table loaded"
    );
    Ok(table)
}
