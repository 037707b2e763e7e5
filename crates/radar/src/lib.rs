//! # pluvio-radar
//!
//! Polarimetric radar moments — horizontal/vertical reflectivity,
//! differential reflectivity, specific differential phase, and specific
//! attenuation — computed by integrating a drop-size distribution against
//! complex scattering amplitudes.
//!
//! Amplitudes come from an external electromagnetic model (Mie/T-matrix)
//! through the [`ScatteringSource`] capability; this crate never computes
//! scattering itself. A lookup with no entry for a required diameter fails
//! with an error naming the missing key — zero is never silently
//! substituted into a reflectivity integral.

mod config;
mod error;
mod fields;
mod processor;
mod scattering;

pub use config::RadarConfig;
pub use error::{RadarError, ScatteringError};
pub use fields::{register_radar_fields, RadarField};
pub use processor::RadarProcessor;
pub use scattering::{
    Direction, Polarization, ScatteringRow, ScatteringSource, TabulatedScattering,
};
