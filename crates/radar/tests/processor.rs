//! Integration tests: radar moments against Rayleigh-regime expectations.

use std::sync::Arc;

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use num_complex::Complex64;
use pluvio_bins::{BinTable, VelocityLaw};
use pluvio_dsd::DsdSpectrum;
use pluvio_moments::moment;
use pluvio_radar::{
    RadarConfig, RadarProcessor, ScatteringRow, TabulatedScattering,
};

/// Rayleigh-like table: backscatter amplitude ∝ D³, equal polarizations.
///
/// With S = c·D³ the processor's integral reduces to a pure sixth-moment
/// sum, which `pluvio_moments::moment` computes independently.
fn rayleigh_table(wavelength: f64, c: f64, d_max: f64) -> TabulatedScattering {
    let n = 64;
    let rows = (1..=n)
        .map(|i| {
            let d = d_max * i as f64 / n as f64;
            let s = Complex64::new(c * d.powi(3), 0.0);
            ScatteringRow {
                diameter: d,
                back_h: s,
                back_v: s,
                fwd_h: s,
                fwd_v: s,
            }
        })
        .collect();
    TabulatedScattering::build(wavelength, 10.0, rows).unwrap()
}

fn exponential_spectrum(bins: &BinTable) -> DsdSpectrum {
    let t = Utc.with_ymd_and_hms(2022, 9, 3, 15, 0, 0).unwrap();
    let nd = bins
        .bins()
        .iter()
        .map(|b| 8000.0 * (-2.1 * b.center).exp())
        .collect();
    DsdSpectrum::new(t, nd)
}

#[test]
fn rayleigh_reflectivity_tracks_sixth_moment() {
    let lambda = 111.0;
    let c = 1e-4;
    // Bin centers sit exactly on table grid points, so interpolation is
    // exact and the comparison is closed-form.
    let bins = BinTable::build(
        (1..=32).map(|i| i as f64 * 0.25).collect(),
        vec![0.25; 32],
        VelocityLaw::atlas_ulbrich(),
    )
    .unwrap();
    let table = rayleigh_table(lambda, c, 16.0);
    let processor =
        RadarProcessor::new(RadarConfig::s_band(), Arc::new(table)).unwrap();

    let s = exponential_spectrum(&bins);
    let zh = processor.zh_linear(&s, &bins).unwrap();

    let pi = std::f64::consts::PI;
    let expected =
        lambda.powi(4) / (pi.powi(5) * 0.93) * 4.0 * pi * c * c * moment(&s, &bins, 6.0);
    assert_relative_eq!(zh, expected, max_relative = 1e-9);
}

#[test]
fn equal_polarizations_give_zero_zdr_and_kdp() {
    let bins = BinTable::build(
        (1..=32).map(|i| i as f64 * 0.25).collect(),
        vec![0.25; 32],
        VelocityLaw::atlas_ulbrich(),
    )
    .unwrap();
    let table = rayleigh_table(111.0, 1e-4, 16.0);
    let processor =
        RadarProcessor::new(RadarConfig::s_band(), Arc::new(table)).unwrap();
    let s = exponential_spectrum(&bins);

    assert_relative_eq!(
        processor.differential_reflectivity(&s, &bins).unwrap(),
        0.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        processor.specific_differential_phase(&s, &bins).unwrap(),
        0.0,
        epsilon = 1e-12
    );
}

#[test]
fn reflectivity_scales_with_concentration() {
    // Zh is linear in N(D): doubling every concentration adds 10·log10(2)
    // ≈ 3.01 dBZ.
    let bins = BinTable::build(
        (1..=32).map(|i| i as f64 * 0.25).collect(),
        vec![0.25; 32],
        VelocityLaw::atlas_ulbrich(),
    )
    .unwrap();
    let table = rayleigh_table(111.0, 1e-4, 16.0);
    let processor =
        RadarProcessor::new(RadarConfig::s_band(), Arc::new(table)).unwrap();

    let s = exponential_spectrum(&bins);
    let doubled = DsdSpectrum::new(
        s.timestamp(),
        s.nd().iter().map(|v| v * 2.0).collect(),
    );

    let dbz = processor.reflectivity(&s, &bins).unwrap();
    let dbz_doubled = processor.reflectivity(&doubled, &bins).unwrap();
    assert_relative_eq!(dbz_doubled - dbz, 10.0 * 2.0_f64.log10(), epsilon = 1e-9);
}
