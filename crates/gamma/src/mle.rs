//! Maximum-likelihood estimation via Nelder-Mead.
//!
//! Minimizes the Poisson negative log-likelihood of per-bin expected
//! counts N(D_i)·ΔD_i over (ln N0, μ, ln Λ), seeded from the closed-form
//! moments fit.
//!
//! **Not part of the public API** beyond [`MleEstimator`].

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use pluvio_bins::BinTable;
use pluvio_dsd::DsdSpectrum;
use tracing::debug;

use crate::config::GammaConfig;
use crate::fit::{goodness_of_fit, FitMethod, GammaFit, GammaParams};
use crate::moments_fit::MomentEstimator;
use crate::strategy::GammaEstimationStrategy;

/// Maximum-likelihood gamma estimator.
///
/// Falls back to the undefined fit when the spectrum is degenerate or the
/// optimizer cannot improve on the seed; sparse data is an expected
/// outcome, not an error.
pub struct MleEstimator {
    config: GammaConfig,
}

impl MleEstimator {
    /// Creates an estimator from a validated configuration.
    pub fn new(config: GammaConfig) -> Self {
        Self { config }
    }

    fn optimize(&self, seed: &GammaParams, spectrum: &DsdSpectrum, bins: &BinTable) -> Option<GammaParams> {
        // Parameterize as (ln N0, μ, ln Λ) so positivity is structural.
        let start = vec![seed.n0.ln(), seed.mu, seed.lambda.ln()];

        // Simplex: the seed plus one vertex per dimension offset by 0.5.
        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(4);
        simplex.push(start.clone());
        for i in 0..3 {
            let mut vertex = start.clone();
            vertex[i] += 0.5;
            simplex.push(vertex);
        }

        let cost = PoissonCost {
            spectrum,
            bins,
            mu_min: self.config.mu_min(),
            mu_max: self.config.mu_max(),
        };

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(self.config.sd_tolerance())
            .ok()?;
        let result = Executor::new(cost, solver)
            .configure(|state| state.max_iters(self.config.max_iters()))
            .run()
            .ok()?;

        let best = result.state().best_param.as_ref()?;
        let params = GammaParams {
            n0: best[0].exp(),
            mu: best[1],
            lambda: best[2].exp(),
        };
        (params.n0.is_finite() && params.lambda.is_finite()).then_some(params)
    }
}

impl GammaEstimationStrategy for MleEstimator {
    fn fit(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> GammaFit {
        if spectrum.nonzero_bins() < 3 {
            return GammaFit::undefined(FitMethod::Mle);
        }

        // Seed from the closed-form moments solution.
        let seed_fit = MomentEstimator::new(self.config.clone()).fit(spectrum, bins);
        let Some(seed) = seed_fit.params() else {
            return GammaFit::undefined(FitMethod::Mle);
        };

        match self.optimize(seed, spectrum, bins) {
            Some(params) => {
                let gof = goodness_of_fit(&params, spectrum, bins);
                GammaFit::defined(params, FitMethod::Mle, gof)
            }
            None => {
                debug!("Nelder-Mead failed to converge, reporting undefined fit");
                GammaFit::undefined(FitMethod::Mle)
            }
        }
    }
}

/// Cost function for argmin: Poisson negative log-likelihood of expected
/// per-bin counts, with an effective infinite wall outside the plausible
/// μ range.
struct PoissonCost<'a> {
    spectrum: &'a DsdSpectrum,
    bins: &'a BinTable,
    mu_min: f64,
    mu_max: f64,
}

impl CostFunction for PoissonCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (ln_n0, mu, ln_lambda) = (p[0], p[1], p[2]);
        if !(ln_n0.is_finite() && mu.is_finite() && ln_lambda.is_finite())
            || mu < self.mu_min
            || mu > self.mu_max
        {
            return Ok(f64::MAX);
        }
        let params = GammaParams {
            n0: ln_n0.exp(),
            mu,
            lambda: ln_lambda.exp(),
        };

        let mut nll = 0.0;
        for (&nd, bin) in self.spectrum.nd().iter().zip(self.bins.bins()) {
            let expected = params.evaluate(bin.center) * bin.width;
            if expected <= 0.0 || !expected.is_finite() {
                return Ok(f64::MAX);
            }
            let observed = nd * bin.width;
            nll += expected - observed * expected.ln();
        }

        if nll.is_finite() { Ok(nll) } else { Ok(f64::MAX) }
    }
}
