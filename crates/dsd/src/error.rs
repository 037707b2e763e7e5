//! Error types for the pluvio-dsd crate.

use chrono::{DateTime, Utc};

use crate::field::{BoxError, FieldKind};

/// Error type for all fallible operations on a DSD container.
#[derive(Debug, thiserror::Error)]
pub enum DsdError {
    /// Returned when a spectrum's concentration count does not match the
    /// container's bin table.
    #[error("spectrum has {got} concentration values but the bin table has {expected} bins")]
    ShapeMismatch {
        /// Number of concentration values in the offending spectrum.
        got: usize,
        /// Number of bins in the container's table.
        expected: usize,
    },

    /// Returned in strict ordering mode when an appended timestamp is
    /// earlier than the previous one.
    #[error("out-of-order timestamp {timestamp} (last appended {last})")]
    OutOfOrder {
        /// The offending timestamp.
        timestamp: DateTime<Utc>,
        /// The most recently appended timestamp.
        last: DateTime<Utc>,
    },

    /// Returned when a field name does not parse, or no calculator is
    /// registered for the requested kind.
    #[error("unknown derived field \"{name}\"")]
    UnknownField {
        /// The unrecognized field name.
        name: String,
    },

    /// Returned when a registered calculator fails.
    #[error("failed to compute field {kind}: {source}")]
    Field {
        /// The field being computed when the failure occurred.
        kind: FieldKind,
        /// The calculator's error.
        #[source]
        source: BoxError,
    },
}
