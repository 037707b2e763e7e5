//! Error types for the pluvio-bins crate.

/// Error type for diameter-bin table construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinError {
    /// Returned when the bin table would have no bins.
    #[error("bin table must have at least one bin")]
    Empty,

    /// Returned when centers and widths differ in length.
    #[error("length mismatch: {centers_len} bin centers but {widths_len} bin widths")]
    LengthMismatch {
        /// Number of bin centers provided.
        centers_len: usize,
        /// Number of bin widths provided.
        widths_len: usize,
    },

    /// Returned when a bin width is zero, negative, or non-finite.
    #[error("bin {index} has non-positive width {width}")]
    NonPositiveWidth {
        /// Index of the offending bin.
        index: usize,
        /// The invalid width value.
        width: f64,
    },

    /// Returned when a bin center is non-finite or not strictly positive.
    #[error("bin {index} has invalid center diameter {center}")]
    InvalidCenter {
        /// Index of the offending bin.
        index: usize,
        /// The invalid center value.
        center: f64,
    },

    /// Returned when bin centers are not strictly increasing.
    #[error("bin centers must be strictly increasing: bin {index} has center {center} after {previous}")]
    NonIncreasingCenters {
        /// Index of the offending bin.
        index: usize,
        /// The offending center value.
        center: f64,
        /// The preceding center value.
        previous: f64,
    },
}
