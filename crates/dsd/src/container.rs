//! Time-ordered container of DSD spectra with cached derived fields.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pluvio_bins::BinTable;
use tracing::debug;

use crate::error::DsdError;
use crate::field::{FieldCalculator, FieldKind};
use crate::spectrum::DsdSpectrum;

/// Timestamp ordering policy for [`DsdContainer::append`].
///
/// Strict mode rejects out-of-order appends instead of re-sorting, so
/// upstream ordering bugs surface instead of being hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOrdering {
    /// Timestamps must be monotonically non-decreasing (default).
    #[default]
    Strict,
    /// Any timestamp order is accepted.
    Unsorted,
}

/// Geographic location of the instrument that produced a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
    /// Optional site name.
    pub name: Option<String>,
}

/// A time series of drop-concentration spectra plus derived scalar fields.
///
/// The container owns the spectra, shares its [`BinTable`] read-only, and
/// lazily computes derived fields through registered [`FieldCalculator`]s.
/// Computed sequences are cached; repeated [`field`](Self::field) calls
/// return the identical cached slice. Appending a spectrum clears the cache
/// so every field sequence always has exactly one value per spectrum.
pub struct DsdContainer {
    spectra: Vec<DsdSpectrum>,
    bins: Arc<BinTable>,
    location: Option<Location>,
    ordering: TimeOrdering,
    calculators: BTreeMap<FieldKind, Box<dyn FieldCalculator>>,
    cache: BTreeMap<FieldKind, Vec<f64>>,
}

impl DsdContainer {
    /// Creates an empty container with strict timestamp ordering.
    pub fn new(bins: Arc<BinTable>) -> Self {
        Self::with_ordering(bins, TimeOrdering::Strict)
    }

    /// Creates an empty container with an explicit ordering policy.
    pub fn with_ordering(bins: Arc<BinTable>, ordering: TimeOrdering) -> Self {
        Self {
            spectra: Vec::new(),
            bins,
            location: None,
            ordering,
            calculators: BTreeMap::new(),
            cache: BTreeMap::new(),
        }
    }

    /// Sets the instrument location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Appends a spectrum, preserving time order.
    ///
    /// # Errors
    ///
    /// [`DsdError::ShapeMismatch`] if the spectrum length does not match the
    /// bin table; [`DsdError::OutOfOrder`] in strict mode if the timestamp
    /// precedes the last appended one.
    pub fn append(&mut self, spectrum: DsdSpectrum) -> Result<(), DsdError> {
        if spectrum.len() != self.bins.len() {
            return Err(DsdError::ShapeMismatch {
                got: spectrum.len(),
                expected: self.bins.len(),
            });
        }

        if self.ordering == TimeOrdering::Strict {
            if let Some(last) = self.spectra.last() {
                if spectrum.timestamp() < last.timestamp() {
                    return Err(DsdError::OutOfOrder {
                        timestamp: spectrum.timestamp(),
                        last: last.timestamp(),
                    });
                }
            }
        }

        if !self.cache.is_empty() {
            debug!(
                n_fields = self.cache.len(),
                "appending spectrum invalidates cached derived fields"
            );
            self.cache.clear();
        }

        self.spectra.push(spectrum);
        Ok(())
    }

    /// Registers (or replaces) the calculator for a field kind.
    ///
    /// Replacing a calculator drops any cached sequence for that kind.
    pub fn register(&mut self, kind: FieldKind, calculator: Box<dyn FieldCalculator>) {
        self.cache.remove(&kind);
        self.calculators.insert(kind, calculator);
    }

    /// Returns the derived field sequence for `kind`, computing and caching
    /// it on first access.
    ///
    /// # Errors
    ///
    /// [`DsdError::UnknownField`] if no calculator is registered for `kind`;
    /// [`DsdError::Field`] if the calculator fails.
    pub fn field(&mut self, kind: FieldKind) -> Result<&[f64], DsdError> {
        if !self.cache.contains_key(&kind) {
            let calculator =
                self.calculators
                    .get(&kind)
                    .ok_or_else(|| DsdError::UnknownField {
                        name: kind.as_str().to_string(),
                    })?;

            debug!(field = %kind, n_spectra = self.spectra.len(), "computing derived field");
            let values = calculator
                .compute(&self.spectra, &self.bins)
                .map_err(|source| DsdError::Field { kind, source })?;

            assert_eq!(
                values.len(),
                self.spectra.len(),
                "calculator for {kind} returned {} values for {} spectra",
                values.len(),
                self.spectra.len()
            );
            self.cache.insert(kind, values);
        }

        Ok(self.cache.get(&kind).expect("cached above"))
    }

    /// Looks up a field by its canonical name.
    ///
    /// # Errors
    ///
    /// [`DsdError::UnknownField`] if the name is not recognized, plus the
    /// failure modes of [`field`](Self::field).
    pub fn field_by_name(&mut self, name: &str) -> Result<&[f64], DsdError> {
        let kind: FieldKind = name.parse()?;
        self.field(kind)
    }

    /// The spectra, in append order.
    pub fn spectra(&self) -> &[DsdSpectrum] {
        &self.spectra
    }

    /// The shared bin table.
    pub fn bin_table(&self) -> &Arc<BinTable> {
        &self.bins
    }

    /// Instrument location, if known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Number of spectra.
    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    /// Returns `true` if no spectra have been appended.
    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    /// Timestamps of all spectra, in append order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.spectra.iter().map(|s| s.timestamp()).collect()
    }

    /// Field kinds with a cached sequence, in registry order.
    pub fn computed_fields(&self) -> Vec<FieldKind> {
        self.cache.keys().copied().collect()
    }
}
