//! # pluvio-moments
//!
//! Physically interpretable scalars computed from drop-concentration
//! spectra: raw DSD moments, liquid water content, rain rate, median volume
//! diameter, mass-weighted mean diameter, total concentration, normalized
//! intercept, and maximum observed diameter — plus power-law relationship
//! fits between rain rate and the radar moments.
//!
//! All integrals share one discretized-bin summation convention
//! (`Σ_i N_i · (…) · ΔD_i` over the table's own widths) so the estimator's
//! moment ratios and the physical moments stay mutually consistent.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pluvio_bins::{BinTable, VelocityLaw};
//! use pluvio_dsd::DsdSpectrum;
//! use pluvio_moments::{lwc, rain_rate};
//!
//! let bins = BinTable::build(vec![2.0], vec![0.1], VelocityLaw::atlas_ulbrich()).unwrap();
//! let t = Utc.with_ymd_and_hms(2020, 7, 15, 0, 0, 0).unwrap();
//! let s = DsdSpectrum::new(t, vec![100.0]);
//! assert!(lwc(&s, &bins) > 0.0);
//! assert!(rain_rate(&s, &bins) > 0.0);
//! ```

mod fields;
mod integrate;
mod powerlaw;

pub use fields::{register_physical_fields, PhysicalField};
pub use integrate::{
    lwc, mass_weighted_mean_diameter, max_diameter, median_volume_diameter, moment,
    normalized_intercept, rain_rate, total_concentration,
};
pub use powerlaw::{power_law_fit, r_kdp_relation, r_zh_relation, PowerLawFit};
