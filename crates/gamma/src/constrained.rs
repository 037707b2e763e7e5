//! Constrained-gamma estimation with an empirical μ–Λ relation.

use pluvio_bins::BinTable;
use pluvio_dsd::DsdSpectrum;
use pluvio_moments::moment;
use statrs::function::gamma::ln_gamma;

use crate::config::GammaConfig;
use crate::fit::{goodness_of_fit, FitMethod, GammaFit, GammaParams};
use crate::strategy::GammaEstimationStrategy;

/// Bisection iterations: more than enough for f64 resolution over the
/// plausible μ interval.
const BISECT_ITERS: usize = 80;

/// Constrained gamma estimator.
///
/// The empirical relation Λ(μ) removes one degree of freedom: the moment
/// ratio M₃/M₄ = Λ/(μ+4) becomes a single equation in μ,
/// `Λ(μ) − (μ+4)·M₃/M₄ = 0`, solved by bisection over the plausible μ
/// range. N0 then follows from M₃. A root outside the bracket is the
/// undefined outcome, not an error.
pub struct ConstrainedEstimator {
    config: GammaConfig,
}

impl ConstrainedEstimator {
    /// Creates an estimator from a validated configuration.
    pub fn new(config: GammaConfig) -> Self {
        Self { config }
    }

    fn solve(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> Option<GammaParams> {
        let m3 = moment(spectrum, bins, 3.0);
        let m4 = moment(spectrum, bins, 4.0);
        if m3 <= 0.0 || m4 <= 0.0 {
            return None;
        }
        let ratio = m3 / m4; // Λ/(μ+4), in mm⁻¹

        let relation = *self.config.mu_lambda();
        let objective = |mu: f64| relation.evaluate(mu) - (mu + 4.0) * ratio;

        let mut lo = self.config.mu_min();
        let mut hi = self.config.mu_max();
        let (f_lo, f_hi) = (objective(lo), objective(hi));
        if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo * f_hi > 0.0 {
            // No sign change: the relation cannot meet this spectrum's
            // moment ratio inside the plausible range.
            return None;
        }

        for _ in 0..BISECT_ITERS {
            let mid = 0.5 * (lo + hi);
            let f_mid = objective(mid);
            if f_mid == 0.0 {
                lo = mid;
                hi = mid;
                break;
            }
            if f_lo * f_mid < 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        let mu = 0.5 * (lo + hi);

        let lambda = relation.evaluate(mu);
        if !(lambda.is_finite() && lambda > 0.0) {
            return None;
        }

        let a = mu + 4.0;
        let n0 = (m3.ln() + a * lambda.ln() - ln_gamma(a)).exp();
        if !(n0.is_finite() && n0 > 0.0) {
            return None;
        }

        Some(GammaParams { n0, mu, lambda })
    }
}

impl GammaEstimationStrategy for ConstrainedEstimator {
    fn fit(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> GammaFit {
        // Two free parameters still need enough occupied bins to carry a
        // shape; keep the same sparse-data threshold as the other
        // strategies so callers see uniform behavior.
        if spectrum.nonzero_bins() < 3 {
            return GammaFit::undefined(FitMethod::Constrained);
        }
        match self.solve(spectrum, bins) {
            Some(params) => {
                let gof = goodness_of_fit(&params, spectrum, bins);
                GammaFit::defined(params, FitMethod::Constrained, gof)
            }
            None => GammaFit::undefined(FitMethod::Constrained),
        }
    }
}
