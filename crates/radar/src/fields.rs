//! Field calculators that plug radar moments into a container.

use std::sync::Arc;

use pluvio_bins::BinTable;
use pluvio_dsd::{BoxError, DsdContainer, DsdSpectrum, FieldCalculator, FieldKind};
use rayon::prelude::*;

use crate::processor::RadarProcessor;

/// Computes one radar field per spectrum through a shared processor.
///
/// A failed scattering lookup aborts the whole field computation — the
/// error names the offending diameter — rather than substituting zero into
/// the integral.
pub struct RadarField {
    kind: FieldKind,
    processor: Arc<RadarProcessor>,
}

impl RadarField {
    /// Creates a calculator for one of the radar field kinds.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not a radar field.
    pub fn new(kind: FieldKind, processor: Arc<RadarProcessor>) -> Self {
        assert!(
            Self::supported(kind),
            "{kind} is not a radar field (register a physical calculator instead)"
        );
        Self { kind, processor }
    }

    /// Returns `true` for the field kinds this calculator can compute.
    pub fn supported(kind: FieldKind) -> bool {
        matches!(
            kind,
            FieldKind::Zh | FieldKind::Zv | FieldKind::Zdr | FieldKind::Kdp | FieldKind::Ai
        )
    }

    fn one(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> Result<f64, crate::RadarError> {
        match self.kind {
            FieldKind::Zh => self.processor.reflectivity(spectrum, bins),
            FieldKind::Zv => self.processor.reflectivity_v(spectrum, bins),
            FieldKind::Zdr => self.processor.differential_reflectivity(spectrum, bins),
            FieldKind::Kdp => self.processor.specific_differential_phase(spectrum, bins),
            FieldKind::Ai => self.processor.specific_attenuation(spectrum, bins),
            _ => unreachable!("constructor rejects non-radar kinds"),
        }
    }
}

impl FieldCalculator for RadarField {
    fn compute(&self, spectra: &[DsdSpectrum], bins: &BinTable) -> Result<Vec<f64>, BoxError> {
        let results: Result<Vec<f64>, crate::RadarError> = spectra
            .par_iter()
            .map(|s| self.one(s, bins))
            .collect();
        results.map_err(BoxError::from)
    }
}

/// Registers every radar field calculator with a container, all sharing
/// one processor.
pub fn register_radar_fields(container: &mut DsdContainer, processor: Arc<RadarProcessor>) {
    for kind in FieldKind::ALL {
        if RadarField::supported(kind) {
            container.register(kind, Box::new(RadarField::new(kind, Arc::clone(&processor))));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use num_complex::Complex64;
    use pluvio_bins::VelocityLaw;

    use crate::config::RadarConfig;
    use crate::scattering::{ScatteringRow, TabulatedScattering};

    fn setup(bin_centers: Vec<f64>) -> DsdContainer {
        let n = bin_centers.len();
        let bins = Arc::new(
            BinTable::build(bin_centers, vec![0.5; n], VelocityLaw::atlas_ulbrich()).unwrap(),
        );
        DsdContainer::new(bins)
    }

    fn processor() -> Arc<RadarProcessor> {
        let rows = (1..=8)
            .map(|i| {
                let d = i as f64 * 0.5;
                ScatteringRow {
                    diameter: d,
                    back_h: Complex64::new(d * d, 0.0),
                    back_v: Complex64::new(0.8 * d * d, 0.0),
                    fwd_h: Complex64::new(d, 0.1 * d),
                    fwd_v: Complex64::new(0.9 * d, 0.08 * d),
                }
            })
            .collect();
        let table = TabulatedScattering::build(53.5, 10.0, rows).unwrap();
        Arc::new(RadarProcessor::new(RadarConfig::c_band(), Arc::new(table)).unwrap())
    }

    #[test]
    fn registers_all_radar_kinds() {
        let mut c = setup(vec![0.5, 1.5, 2.5]);
        let t = Utc.with_ymd_and_hms(2022, 9, 3, 15, 0, 0).unwrap();
        c.append(DsdSpectrum::new(t, vec![100.0, 20.0, 2.0])).unwrap();
        register_radar_fields(&mut c, processor());

        for kind in [FieldKind::Zh, FieldKind::Zv, FieldKind::Zdr, FieldKind::Kdp, FieldKind::Ai] {
            let seq = c.field(kind).unwrap();
            assert_eq!(seq.len(), 1);
            assert!(!seq[0].is_nan(), "{kind} must not be NaN");
        }
    }

    #[test]
    fn lookup_failure_surfaces_through_container() {
        // 6.0 mm occupied bin is outside the 0.5..=4.0 table domain.
        let mut c = setup(vec![0.5, 6.0]);
        let t = Utc.with_ymd_and_hms(2022, 9, 3, 15, 0, 0).unwrap();
        c.append(DsdSpectrum::new(t, vec![10.0, 10.0])).unwrap();
        register_radar_fields(&mut c, processor());

        let err = c.field(FieldKind::Zh).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("zh"), "message: {message}");
        let source = std::error::Error::source(&err).expect("wrapped lookup error");
        assert!(source.to_string().contains("6 mm"), "source: {source}");
    }

    #[test]
    #[should_panic(expected = "not a radar field")]
    fn physical_kind_rejected() {
        let _ = RadarField::new(FieldKind::Lwc, processor());
    }
}
