//! # pluvio-gamma
//!
//! Fits the three-parameter gamma model N(D) = N0·D^μ·exp(−ΛD) to observed
//! drop-concentration spectra.
//!
//! Three interchangeable strategies produce the same [`GammaFit`] shape:
//!
//! | Strategy | Approach |
//! |----------|----------|
//! | [`FitMethod::Moments`] | Exact closed form from a configured moment triple (default) |
//! | [`FitMethod::Mle`] | Nelder-Mead over the Poisson likelihood, seeded from the moments fit |
//! | [`FitMethod::Constrained`] | Empirical μ–Λ relation + bisection, two free parameters |
//!
//! Degenerate spectra (rain-free, fewer than 3 occupied bins, unsolvable
//! moment ratio) produce a designated *undefined* fit rather than an error;
//! rain-free samples are expected input.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pluvio_bins::{BinTable, VelocityLaw};
//! use pluvio_dsd::DsdSpectrum;
//! use pluvio_gamma::{estimator_for, FitMethod, GammaConfig};
//!
//! let bins = BinTable::build(
//!     (1..=40).map(|i| i as f64 * 0.2).collect(),
//!     vec![0.2; 40],
//!     VelocityLaw::atlas_ulbrich(),
//! ).unwrap();
//! let t = Utc.with_ymd_and_hms(2020, 5, 20, 0, 0, 0).unwrap();
//! let nd: Vec<f64> = bins.bins().iter()
//!     .map(|b| 8000.0 * (-2.0 * b.center).exp())
//!     .collect();
//! let spectrum = DsdSpectrum::new(t, nd);
//!
//! let strategy = estimator_for(FitMethod::Moments, &GammaConfig::new()).unwrap();
//! let fit = strategy.fit(&spectrum, &bins);
//! assert!(!fit.is_undefined());
//! ```

mod config;
mod constrained;
mod error;
mod fit;
mod mle;
mod moments_fit;
mod strategy;

pub use config::{GammaConfig, MomentOrders, MuLambdaRelation};
pub use constrained::ConstrainedEstimator;
pub use error::GammaError;
pub use fit::{FitMethod, GammaFit, GammaParams};
pub use mle::MleEstimator;
pub use moments_fit::MomentEstimator;
pub use strategy::{estimator_for, fit_container, GammaEstimationStrategy};
