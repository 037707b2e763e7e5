//! # pluvio-bins
//!
//! Static descriptions of disdrometer diameter bins: bin centers, bin
//! widths, and the empirical terminal fall-velocity relation the instrument
//! assumes. A [`BinTable`] is built once per instrument configuration and
//! shared read-only by every component that integrates over it.
//!
//! ## Quick Start
//!
//! ```
//! use pluvio_bins::{BinTable, VelocityLaw};
//!
//! // Custom instrument layout
//! let table = BinTable::build(
//!     vec![0.5, 1.5, 2.5],
//!     vec![1.0, 1.0, 1.0],
//!     VelocityLaw::atlas_ulbrich(),
//! )
//! .unwrap();
//! assert_eq!(table.len(), 3);
//!
//! // Named preset
//! let parsivel = BinTable::parsivel();
//! assert_eq!(parsivel.len(), 32);
//! ```

mod error;
mod table;
mod velocity;

pub use error::BinError;
pub use table::{BinTable, DiameterBin};
pub use velocity::VelocityLaw;
