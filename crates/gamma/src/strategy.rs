//! The estimation-strategy capability interface.

use pluvio_bins::BinTable;
use pluvio_dsd::{DsdContainer, DsdSpectrum};
use rayon::prelude::*;

use crate::config::GammaConfig;
use crate::constrained::ConstrainedEstimator;
use crate::error::GammaError;
use crate::fit::{FitMethod, GammaFit};
use crate::mle::MleEstimator;
use crate::moments_fit::MomentEstimator;

/// A gamma-estimation strategy.
///
/// All strategies produce the same [`GammaFit`] shape so callers stay
/// strategy-agnostic; selection happens by configuration through
/// [`estimator_for`], not by subclassing.
pub trait GammaEstimationStrategy: Send + Sync {
    /// Fits the gamma model to one spectrum. Never fails: degenerate
    /// spectra produce the undefined fit.
    fn fit(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> GammaFit;
}

/// Builds the strategy for a fit method from a validated configuration.
///
/// # Errors
///
/// Returns [`GammaError::InvalidConfig`] when the configuration fails
/// validation.
pub fn estimator_for(
    method: FitMethod,
    config: &GammaConfig,
) -> Result<Box<dyn GammaEstimationStrategy>, GammaError> {
    config.validate()?;
    Ok(match method {
        FitMethod::Moments => Box::new(MomentEstimator::new(config.clone())),
        FitMethod::Mle => Box::new(MleEstimator::new(config.clone())),
        FitMethod::Constrained => Box::new(ConstrainedEstimator::new(config.clone())),
    })
}

/// Fits every spectrum in a container, one result per spectrum.
///
/// Spectra are independent, so the sweep is a rayon parallel map over
/// read-only state.
pub fn fit_container(
    container: &DsdContainer,
    strategy: &dyn GammaEstimationStrategy,
) -> Vec<GammaFit> {
    let bins = container.bin_table();
    container
        .spectra()
        .par_iter()
        .map(|s| strategy.fit(s, bins))
        .collect()
}
