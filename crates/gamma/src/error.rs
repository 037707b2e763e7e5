//! Error types for the pluvio-gamma crate.

/// Error type for gamma-estimation configuration.
///
/// Degenerate spectra are never errors: fitting a rain-free or sparse
/// spectrum yields an undefined [`GammaFit`](crate::GammaFit) instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GammaError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a fit-method name does not parse.
    #[error("unknown fit method \"{name}\" (expected moments, mle, or constrained)")]
    UnknownMethod {
        /// The unrecognized method name.
        name: String,
    },
}
