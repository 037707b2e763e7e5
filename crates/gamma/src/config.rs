//! Configuration for gamma DSD estimation.

use crate::error::GammaError;

/// Which moment triple the method-of-moments strategy solves from.
///
/// Both choices have exact closed forms; 2-4-6 is the common radar
/// literature default, 2-3-4 weights the small-drop end more heavily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MomentOrders {
    /// Moments M₂, M₃, M₄.
    M234,
    /// Moments M₂, M₄, M₆ (default).
    #[default]
    M246,
}

/// Empirical μ–Λ relation used by the constrained strategy,
/// Λ(μ) = c2·μ² + c1·μ + c0 with Λ in mm⁻¹.
///
/// Defaults to the Zhang et al. (2003) coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuLambdaRelation {
    /// Quadratic coefficient.
    pub c2: f64,
    /// Linear coefficient.
    pub c1: f64,
    /// Constant term.
    pub c0: f64,
}

impl MuLambdaRelation {
    /// Evaluates Λ(μ) in mm⁻¹.
    pub fn evaluate(&self, mu: f64) -> f64 {
        self.c2 * mu * mu + self.c1 * mu + self.c0
    }
}

impl Default for MuLambdaRelation {
    fn default() -> Self {
        Self {
            c2: 0.0365,
            c1: 0.735,
            c0: 1.935,
        }
    }
}

/// Configuration shared by all gamma-estimation strategies.
///
/// # Example
///
/// ```
/// use pluvio_gamma::{GammaConfig, MomentOrders};
///
/// let config = GammaConfig::new()
///     .with_moment_orders(MomentOrders::M234)
///     .with_mu_bounds(-2.0, 15.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GammaConfig {
    moment_orders: MomentOrders,
    mu_min: f64,
    mu_max: f64,
    max_iters: u64,
    sd_tolerance: f64,
    mu_lambda: MuLambdaRelation,
}

impl GammaConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `moment_orders = M246`, `mu_min = -2.99` (just inside the
    /// μ = −3 pole of the moment relations), `mu_max = 20.0`,
    /// `max_iters = 1000`, `sd_tolerance = 1e-8`, Zhang et al. (2003)
    /// μ–Λ coefficients.
    pub fn new() -> Self {
        Self {
            moment_orders: MomentOrders::M246,
            mu_min: -2.99,
            mu_max: 20.0,
            max_iters: 1000,
            sd_tolerance: 1e-8,
            mu_lambda: MuLambdaRelation::default(),
        }
    }

    // --- Builder methods ---

    /// Sets the moment triple for the moments strategy.
    pub fn with_moment_orders(mut self, orders: MomentOrders) -> Self {
        self.moment_orders = orders;
        self
    }

    /// Sets the plausible shape-parameter range `[mu_min, mu_max]`.
    pub fn with_mu_bounds(mut self, mu_min: f64, mu_max: f64) -> Self {
        self.mu_min = mu_min;
        self.mu_max = mu_max;
        self
    }

    /// Sets the maximum Nelder-Mead iterations for the MLE strategy.
    pub fn with_max_iters(mut self, n: u64) -> Self {
        self.max_iters = n;
        self
    }

    /// Sets the Nelder-Mead standard-deviation convergence tolerance.
    pub fn with_sd_tolerance(mut self, tol: f64) -> Self {
        self.sd_tolerance = tol;
        self
    }

    /// Sets the μ–Λ relation for the constrained strategy.
    pub fn with_mu_lambda(mut self, relation: MuLambdaRelation) -> Self {
        self.mu_lambda = relation;
        self
    }

    // --- Accessors ---

    /// The moment triple for the moments strategy.
    pub fn moment_orders(&self) -> MomentOrders {
        self.moment_orders
    }

    /// Lower plausibility bound on μ.
    pub fn mu_min(&self) -> f64 {
        self.mu_min
    }

    /// Upper plausibility bound on μ.
    pub fn mu_max(&self) -> f64 {
        self.mu_max
    }

    /// Maximum Nelder-Mead iterations.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Nelder-Mead convergence tolerance.
    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    /// The μ–Λ relation for the constrained strategy.
    pub fn mu_lambda(&self) -> &MuLambdaRelation {
        &self.mu_lambda
    }

    /// Validates this configuration.
    ///
    /// μ bounds must be finite with `-3 < mu_min < mu_max` (the moment
    /// relations have a pole at μ = −3); iteration and tolerance settings
    /// must be positive; μ–Λ coefficients must be finite.
    pub fn validate(&self) -> Result<(), GammaError> {
        if !self.mu_min.is_finite() || self.mu_min <= -3.0 {
            return Err(GammaError::InvalidConfig {
                reason: format!("mu_min must be finite and > -3, got {}", self.mu_min),
            });
        }
        if !self.mu_max.is_finite() || self.mu_max <= self.mu_min {
            return Err(GammaError::InvalidConfig {
                reason: format!(
                    "mu_max must be finite and > mu_min ({}), got {}",
                    self.mu_min, self.mu_max
                ),
            });
        }
        if self.max_iters == 0 {
            return Err(GammaError::InvalidConfig {
                reason: "max_iters must be >= 1".to_string(),
            });
        }
        if !self.sd_tolerance.is_finite() || self.sd_tolerance <= 0.0 {
            return Err(GammaError::InvalidConfig {
                reason: format!(
                    "sd_tolerance must be finite and > 0, got {}",
                    self.sd_tolerance
                ),
            });
        }
        if ![self.mu_lambda.c2, self.mu_lambda.c1, self.mu_lambda.c0]
            .iter()
            .all(|c| c.is_finite())
        {
            return Err(GammaError::InvalidConfig {
                reason: "mu-lambda coefficients must be finite".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self::new()
    }
}
