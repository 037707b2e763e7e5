//! Gamma fit result types.

use std::fmt;
use std::str::FromStr;

use pluvio_bins::BinTable;
use pluvio_dsd::DsdSpectrum;
use statrs::function::gamma::ln_gamma;

use crate::error::GammaError;

/// Which estimation strategy produced a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMethod {
    /// Closed-form method of moments (default).
    #[default]
    Moments,
    /// Maximum likelihood via Nelder-Mead.
    Mle,
    /// Constrained gamma with an empirical μ–Λ relation.
    Constrained,
}

impl FitMethod {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FitMethod::Moments => "moments",
            FitMethod::Mle => "mle",
            FitMethod::Constrained => "constrained",
        }
    }
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMethod {
    type Err = GammaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moments" => Ok(FitMethod::Moments),
            "mle" => Ok(FitMethod::Mle),
            "constrained" => Ok(FitMethod::Constrained),
            other => Err(GammaError::UnknownMethod {
                name: other.to_string(),
            }),
        }
    }
}

/// Parameters of the gamma model N(D) = N0·D^μ·exp(−ΛD).
///
/// Units: N0 in mm⁻¹⁻μ·m⁻³, Λ in mm⁻¹, μ dimensionless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaParams {
    /// Intercept parameter N0.
    pub n0: f64,
    /// Shape parameter μ.
    pub mu: f64,
    /// Slope parameter Λ.
    pub lambda: f64,
}

impl GammaParams {
    /// Evaluates the model concentration N(D) at diameter `d_mm`.
    pub fn evaluate(&self, d_mm: f64) -> f64 {
        self.n0 * d_mm.powf(self.mu) * (-self.lambda * d_mm).exp()
    }

    /// Analytic k-th moment of the model over D ∈ (0, ∞):
    /// M_k = N0·Γ(μ+k+1)/Λ^(μ+k+1).
    pub fn analytic_moment(&self, order: f64) -> f64 {
        let a = self.mu + order + 1.0;
        (self.n0.ln() + ln_gamma(a) - a * self.lambda.ln()).exp()
    }
}

/// Result of fitting the gamma model to one spectrum.
///
/// `params` is `None` for the designated "undefined" outcome: a rain-free
/// spectrum, fewer than 3 nonzero bins, or a moment ratio outside the
/// solvable domain. An undefined fit is distinguishable from a defined fit
/// with small parameters; it is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaFit {
    params: Option<GammaParams>,
    method: FitMethod,
    gof: f64,
}

impl GammaFit {
    /// A defined fit with its goodness-of-fit score.
    pub fn defined(params: GammaParams, method: FitMethod, gof: f64) -> Self {
        Self {
            params: Some(params),
            method,
            gof,
        }
    }

    /// The undefined marker for degenerate spectra (gof = 0).
    pub fn undefined(method: FitMethod) -> Self {
        Self {
            params: None,
            method,
            gof: 0.0,
        }
    }

    /// Fitted parameters, or `None` for an undefined fit.
    pub fn params(&self) -> Option<&GammaParams> {
        self.params.as_ref()
    }

    /// Returns `true` if this is the undefined marker.
    pub fn is_undefined(&self) -> bool {
        self.params.is_none()
    }

    /// The strategy that produced this fit.
    pub fn method(&self) -> FitMethod {
        self.method
    }

    /// Goodness of fit in [0, 1]; 0 for undefined fits, and degraded for
    /// fits whose μ had to be clamped into the plausible range.
    pub fn gof(&self) -> f64 {
        self.gof
    }
}

/// Coefficient of determination between observed and modeled
/// concentrations, floored at 0.
pub(crate) fn goodness_of_fit(
    params: &GammaParams,
    spectrum: &DsdSpectrum,
    bins: &BinTable,
) -> f64 {
    let observed = spectrum.nd();
    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&obs, bin) in observed.iter().zip(bins.bins()) {
        let model = params.evaluate(bin.center);
        ss_res += (obs - model) * (obs - model);
        ss_tot += (obs - mean) * (obs - mean);
    }

    if ss_tot <= 0.0 {
        return if ss_res <= 1e-12 { 1.0 } else { 0.0 };
    }
    (1.0 - ss_res / ss_tot).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use pluvio_bins::VelocityLaw;

    #[test]
    fn method_name_round_trip() {
        for m in [FitMethod::Moments, FitMethod::Mle, FitMethod::Constrained] {
            assert_eq!(m.as_str().parse::<FitMethod>().unwrap(), m);
        }
        assert!(matches!(
            "bayes".parse::<FitMethod>(),
            Err(GammaError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn evaluate_exponential_special_case() {
        // μ = 0 reduces to N(D) = N0·exp(−ΛD).
        let p = GammaParams {
            n0: 8000.0,
            mu: 0.0,
            lambda: 2.0,
        };
        assert_relative_eq!(p.evaluate(1.0), 8000.0 * (-2.0_f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn analytic_moment_exponential() {
        // For μ = 0: M_k = N0·k!/Λ^(k+1). With N0 = 1, Λ = 1: M_3 = 6.
        let p = GammaParams {
            n0: 1.0,
            mu: 0.0,
            lambda: 1.0,
        };
        assert_relative_eq!(p.analytic_moment(3.0), 6.0, max_relative = 1e-10);
    }

    #[test]
    fn undefined_fit_is_distinguishable() {
        let undefined = GammaFit::undefined(FitMethod::Moments);
        let near_zero = GammaFit::defined(
            GammaParams {
                n0: 1e-12,
                mu: 0.0,
                lambda: 1e-6,
            },
            FitMethod::Moments,
            0.1,
        );
        assert!(undefined.is_undefined());
        assert!(!near_zero.is_undefined());
        assert_eq!(undefined.gof(), 0.0);
    }

    #[test]
    fn gof_perfect_for_exact_model() {
        let bins = BinTable::build(
            (1..=20).map(|i| i as f64 * 0.25).collect(),
            vec![0.25; 20],
            VelocityLaw::atlas_ulbrich(),
        )
        .unwrap();
        let p = GammaParams {
            n0: 8000.0,
            mu: 2.0,
            lambda: 3.0,
        };
        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let nd: Vec<f64> = bins.bins().iter().map(|b| p.evaluate(b.center)).collect();
        let s = DsdSpectrum::new(t, nd);
        assert_relative_eq!(goodness_of_fit(&p, &s, &bins), 1.0, epsilon = 1e-9);
    }
}
