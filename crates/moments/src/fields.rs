//! Field calculators that plug physical moments into a container.

use pluvio_bins::BinTable;
use pluvio_dsd::{BoxError, DsdContainer, DsdSpectrum, FieldCalculator, FieldKind};
use rayon::prelude::*;

use crate::integrate;

/// Computes one physical field per spectrum.
///
/// Spectra are independent, so the sweep is a rayon parallel map with only
/// read-only shares of the bin table.
pub struct PhysicalField {
    kind: FieldKind,
}

impl PhysicalField {
    /// Creates a calculator for one of the physical field kinds.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a radar field; those are computed by
    /// `pluvio-radar`.
    pub fn new(kind: FieldKind) -> Self {
        assert!(
            Self::supported(kind),
            "{kind} is not a physical field (register a radar calculator instead)"
        );
        Self { kind }
    }

    /// Returns `true` for the field kinds this calculator can compute.
    pub fn supported(kind: FieldKind) -> bool {
        matches!(
            kind,
            FieldKind::RainRate
                | FieldKind::Lwc
                | FieldKind::D0
                | FieldKind::Dm
                | FieldKind::Nt
                | FieldKind::Nw
                | FieldKind::Dmax
        )
    }

    fn one(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
        match self.kind {
            FieldKind::RainRate => integrate::rain_rate(spectrum, bins),
            FieldKind::Lwc => integrate::lwc(spectrum, bins),
            FieldKind::D0 => integrate::median_volume_diameter(spectrum, bins),
            FieldKind::Dm => integrate::mass_weighted_mean_diameter(spectrum, bins),
            FieldKind::Nt => integrate::total_concentration(spectrum, bins),
            FieldKind::Nw => {
                let lwc = integrate::lwc(spectrum, bins);
                let d0 = integrate::median_volume_diameter(spectrum, bins);
                integrate::normalized_intercept(lwc, d0)
            }
            FieldKind::Dmax => integrate::max_diameter(spectrum, bins),
            _ => unreachable!("constructor rejects non-physical kinds"),
        }
    }
}

impl FieldCalculator for PhysicalField {
    fn compute(&self, spectra: &[DsdSpectrum], bins: &BinTable) -> Result<Vec<f64>, BoxError> {
        Ok(spectra.par_iter().map(|s| self.one(s, bins)).collect())
    }
}

/// Registers every physical field calculator with a container.
pub fn register_physical_fields(container: &mut DsdContainer) {
    for kind in FieldKind::ALL {
        if PhysicalField::supported(kind) {
            container.register(kind, Box::new(PhysicalField::new(kind)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use pluvio_bins::VelocityLaw;
    use std::sync::Arc;

    fn container() -> DsdContainer {
        let bins = Arc::new(
            BinTable::build(
                vec![0.5, 1.5, 2.5, 3.5],
                vec![1.0, 1.0, 1.0, 1.0],
                VelocityLaw::atlas_ulbrich(),
            )
            .unwrap(),
        );
        let mut c = DsdContainer::new(bins);
        let t0 = Utc.with_ymd_and_hms(2020, 7, 15, 6, 0, 0).unwrap();
        for (i, nd) in [
            vec![100.0, 50.0, 10.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 200.0, 0.0, 0.0],
        ]
        .into_iter()
        .enumerate()
        {
            c.append(DsdSpectrum::new(
                t0 + chrono::Duration::minutes(i as i64),
                nd,
            ))
            .unwrap();
        }
        c
    }

    #[test]
    fn register_covers_physical_kinds() {
        let mut c = container();
        register_physical_fields(&mut c);
        for kind in [
            FieldKind::RainRate,
            FieldKind::Lwc,
            FieldKind::D0,
            FieldKind::Dm,
            FieldKind::Nt,
            FieldKind::Nw,
            FieldKind::Dmax,
        ] {
            let seq = c.field(kind).unwrap();
            assert_eq!(seq.len(), 3, "{kind} sequence length");
        }
    }

    #[test]
    fn rain_free_sample_yields_sentinels_not_nan() {
        let mut c = container();
        register_physical_fields(&mut c);
        for kind in [FieldKind::Lwc, FieldKind::D0, FieldKind::Nw, FieldKind::Dmax] {
            let value = c.field(kind).unwrap()[1];
            assert_eq!(value, 0.0, "{kind} for rain-free sample");
            assert!(!value.is_nan());
        }
    }

    #[test]
    fn field_matches_direct_integration() {
        let mut c = container();
        register_physical_fields(&mut c);
        let direct = integrate::lwc(&c.spectra()[0].clone(), c.bin_table());
        let via_field = c.field(FieldKind::Lwc).unwrap()[0];
        assert_relative_eq!(via_field, direct, epsilon = 1e-15);
    }

    #[test]
    #[should_panic(expected = "not a physical field")]
    fn radar_kind_rejected() {
        let _ = PhysicalField::new(FieldKind::Zh);
    }
}
