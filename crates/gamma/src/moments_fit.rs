//! Closed-form method-of-moments estimation.

use pluvio_bins::BinTable;
use pluvio_dsd::DsdSpectrum;
use pluvio_moments::moment;
use statrs::function::gamma::ln_gamma;
use tracing::trace;

use crate::config::{GammaConfig, MomentOrders};
use crate::fit::{goodness_of_fit, FitMethod, GammaFit, GammaParams};
use crate::strategy::GammaEstimationStrategy;

/// Method-of-moments gamma estimator.
///
/// Solves (N0, μ, Λ) exactly from a configured moment triple. The moment
/// ratio is validated against the domain of the μ equation; an unsolvable
/// ratio yields the undefined fit, and a solvable μ outside the plausible
/// range is clamped with the distortion reflected in the goodness-of-fit
/// score — physically implausible fits are a valid poor outcome, not an
/// error.
pub struct MomentEstimator {
    config: GammaConfig,
}

impl MomentEstimator {
    /// Creates an estimator from a validated configuration.
    pub fn new(config: GammaConfig) -> Self {
        Self { config }
    }

    /// Solves μ from the dimensionless moment ratio, or `None` when the
    /// ratio is outside the solvable domain (0, 1).
    fn solve_mu(&self, g: f64) -> Option<f64> {
        if !(g > 0.0 && g < 1.0) {
            return None;
        }
        let mu = match self.config.moment_orders() {
            // G = M₄²/(M₂·M₆) = (μ+3)(μ+4)/((μ+5)(μ+6))
            MomentOrders::M246 => {
                ((7.0 - 11.0 * g) - (g * g + 14.0 * g + 1.0).sqrt()) / (2.0 * (g - 1.0))
            }
            // G = M₃²/(M₂·M₄) = (μ+3)/(μ+4)
            MomentOrders::M234 => (3.0 - 4.0 * g) / (g - 1.0),
        };
        mu.is_finite().then_some(mu)
    }

    fn solve(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> Option<GammaParams> {
        let m2 = moment(spectrum, bins, 2.0);
        let (g, anchor_moment, anchor_order) = match self.config.moment_orders() {
            MomentOrders::M246 => {
                let m4 = moment(spectrum, bins, 4.0);
                let m6 = moment(spectrum, bins, 6.0);
                if m2 <= 0.0 || m4 <= 0.0 || m6 <= 0.0 {
                    return None;
                }
                (m4 * m4 / (m2 * m6), m4, 4.0)
            }
            MomentOrders::M234 => {
                let m3 = moment(spectrum, bins, 3.0);
                let m4 = moment(spectrum, bins, 4.0);
                if m2 <= 0.0 || m3 <= 0.0 || m4 <= 0.0 {
                    return None;
                }
                (m3 * m3 / (m2 * m4), m3, 3.0)
            }
        };

        let mu_raw = self.solve_mu(g)?;
        let mu = mu_raw.clamp(self.config.mu_min(), self.config.mu_max());
        if mu != mu_raw {
            trace!(mu_raw, mu, "clamped shape parameter into plausible range");
        }

        let lambda = match self.config.moment_orders() {
            // M₂/M₄ = Λ²/((μ+3)(μ+4))
            MomentOrders::M246 => {
                let m4 = anchor_moment;
                ((mu + 3.0) * (mu + 4.0) * m2 / m4).sqrt()
            }
            // M₂/M₃ = Λ/(μ+3)
            MomentOrders::M234 => (mu + 3.0) * m2 / anchor_moment,
        };
        if !(lambda.is_finite() && lambda > 0.0) {
            return None;
        }

        // N0 from the anchor moment in log space: the exponent μ+k+1 can
        // push Λ^(μ+k+1) past f64 range for steep spectra.
        let a = mu + anchor_order + 1.0;
        let n0 = (anchor_moment.ln() + a * lambda.ln() - ln_gamma(a)).exp();
        if !(n0.is_finite() && n0 > 0.0) {
            return None;
        }

        Some(GammaParams { n0, mu, lambda })
    }
}

impl GammaEstimationStrategy for MomentEstimator {
    fn fit(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> GammaFit {
        // Three free parameters need at least three occupied bins; sparser
        // spectra are expected input and fit as undefined.
        if spectrum.nonzero_bins() < 3 {
            return GammaFit::undefined(FitMethod::Moments);
        }
        match self.solve(spectrum, bins) {
            Some(params) => {
                let gof = goodness_of_fit(&params, spectrum, bins);
                GammaFit::defined(params, FitMethod::Moments, gof)
            }
            None => GammaFit::undefined(FitMethod::Moments),
        }
    }
}
