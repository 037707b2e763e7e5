//! JSON output structures for derived fields and gamma fits.
//!
//! Non-finite sentinels (−∞ dBZ for no-signal reflectivity) serialize as
//! JSON `null`, which downstream consumers read as "no signal".

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use pluvio_dsd::DsdContainer;
use pluvio_gamma::GammaFit;
use pluvio_moments::PowerLawFit;

/// Top-level output of the `process` command.
#[derive(Debug, Serialize)]
pub struct ProcessOutput {
    /// Instrument and container metadata.
    pub metadata: Metadata,
    /// One timestamp per spectrum.
    pub time: Vec<DateTime<Utc>>,
    /// field name -> one value per spectrum.
    pub fields: BTreeMap<String, Vec<f64>>,
    /// Rain-rate power-law relationships, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Relations>,
}

/// Container metadata echoed into every output document.
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub n_spectra: usize,
    pub n_bins: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationOut>,
}

/// Instrument location in an output document.
#[derive(Debug, Serialize)]
pub struct LocationOut {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Fitted rainfall relationships.
#[derive(Debug, Serialize)]
pub struct Relations {
    /// R = a·Kdp^b, if enough positive samples existed.
    pub r_kdp: Option<PowerLawOut>,
    /// R = a·Zh^b against linear reflectivity.
    pub r_zh: Option<PowerLawOut>,
}

/// A fitted power law in an output document.
#[derive(Debug, Serialize)]
pub struct PowerLawOut {
    pub a: f64,
    pub b: f64,
    pub r_squared: f64,
}

impl From<PowerLawFit> for PowerLawOut {
    fn from(fit: PowerLawFit) -> Self {
        Self {
            a: fit.a,
            b: fit.b,
            r_squared: fit.r_squared,
        }
    }
}

/// Top-level output of the `fit` command.
#[derive(Debug, Serialize)]
pub struct FitOutput {
    pub metadata: Metadata,
    /// The estimation method used for every fit.
    pub method: String,
    pub time: Vec<DateTime<Utc>>,
    /// One fit per spectrum; parameters are null for undefined fits.
    pub fits: Vec<FitOut>,
}

/// One gamma fit in an output document.
#[derive(Debug, Serialize)]
pub struct FitOut {
    pub n0: Option<f64>,
    pub mu: Option<f64>,
    pub lambda: Option<f64>,
    pub gof: f64,
}

impl From<&GammaFit> for FitOut {
    fn from(fit: &GammaFit) -> Self {
        match fit.params() {
            Some(p) => Self {
                n0: Some(p.n0),
                mu: Some(p.mu),
                lambda: Some(p.lambda),
                gof: fit.gof(),
            },
            None => Self {
                n0: None,
                mu: None,
                lambda: None,
                gof: fit.gof(),
            },
        }
    }
}

/// Builds the metadata block from a container.
pub fn metadata(container: &DsdContainer) -> Metadata {
    Metadata {
        n_spectra: container.len(),
        n_bins: container.bin_table().len(),
        location: container.location().map(|loc| LocationOut {
            latitude: loc.latitude,
            longitude: loc.longitude,
            name: loc.name.clone(),
        }),
    }
}

/// Serializes an output document to pretty JSON.
pub fn to_json<T: Serialize>(output: &T) -> Result<String> {
    serde_json::to_string_pretty(output).context("failed to serialize output JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_fit_serializes_null_params() {
        let fit = GammaFit::undefined(pluvio_gamma::FitMethod::Moments);
        let out = FitOut::from(&fit);
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"n0\":null"));
        assert!(json.contains("\"gof\":0.0"));
    }

    #[test]
    fn no_signal_reflectivity_serializes_null() {
        let mut fields = BTreeMap::new();
        fields.insert("zh".to_string(), vec![35.2, f64::NEG_INFINITY]);
        let out = ProcessOutput {
            metadata: Metadata {
                n_spectra: 2,
                n_bins: 32,
                location: None,
            },
            time: vec![],
            fields,
            relations: None,
        };
        let json = to_json(&out).unwrap();
        assert!(json.contains("null"), "json: {json}");
        assert!(!json.contains("NaN"));
    }
}
