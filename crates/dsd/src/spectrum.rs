//! A single drop-concentration spectrum.

use chrono::{DateTime, Utc};

/// One time sample of drop concentrations N(D), aligned to a bin table.
///
/// Concentrations are in mm⁻¹·m⁻³ (number per unit volume per unit
/// diameter). Negative, NaN, and infinite inputs are sanitized to 0.0 at
/// construction so they can never reach a moment integral as a
/// NaN-producing term; rain-free samples are expected input, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct DsdSpectrum {
    timestamp: DateTime<Utc>,
    nd: Vec<f64>,
    counts: Option<Vec<f64>>,
}

impl DsdSpectrum {
    /// Creates a spectrum, sanitizing degenerate concentration values to 0.
    pub fn new(timestamp: DateTime<Utc>, nd: Vec<f64>) -> Self {
        let nd = nd
            .into_iter()
            .map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
            .collect();
        Self {
            timestamp,
            nd,
            counts: None,
        }
    }

    /// Attaches the raw per-bin drop counts the instrument reported.
    pub fn with_counts(mut self, counts: Vec<f64>) -> Self {
        self.counts = Some(counts);
        self
    }

    /// Sample timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Concentration values, one per bin (mm⁻¹·m⁻³).
    pub fn nd(&self) -> &[f64] {
        &self.nd
    }

    /// Raw drop counts, if the reader supplied them.
    pub fn counts(&self) -> Option<&[f64]> {
        self.counts.as_deref()
    }

    /// Number of concentration values.
    pub fn len(&self) -> usize {
        self.nd.len()
    }

    /// Returns `true` if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.nd.is_empty()
    }

    /// Returns `true` if every concentration is zero (a rain-free sample).
    pub fn is_rain_free(&self) -> bool {
        self.nd.iter().all(|&v| v == 0.0)
    }

    /// Number of bins with nonzero concentration.
    pub fn nonzero_bins(&self) -> usize {
        self.nd.iter().filter(|&&v| v > 0.0).count()
    }
}
