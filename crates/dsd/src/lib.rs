//! # pluvio-dsd
//!
//! The central data model of the pluvio workspace: a time-ordered container
//! of drop-concentration spectra tied to a shared
//! [`BinTable`](pluvio_bins::BinTable), with derived scalar fields (rain
//! rate, D0, reflectivity, …) computed lazily through registered
//! [`FieldCalculator`]s and cached per container.
//!
//! Readers build a container by appending [`DsdSpectrum`] values; the
//! moment and radar crates plug their computations in through
//! [`DsdContainer::register`]; consumers read sequences back out by
//! [`FieldKind`] or canonical name.
//!
//! ```
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use pluvio_bins::{BinTable, VelocityLaw};
//! use pluvio_dsd::{DsdContainer, DsdSpectrum};
//!
//! let bins = Arc::new(BinTable::build(
//!     vec![0.5, 1.5, 2.5],
//!     vec![1.0, 1.0, 1.0],
//!     VelocityLaw::atlas_ulbrich(),
//! ).unwrap());
//!
//! let mut container = DsdContainer::new(bins);
//! let t = Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap();
//! container.append(DsdSpectrum::new(t, vec![120.0, 35.0, 2.0])).unwrap();
//! assert_eq!(container.len(), 1);
//! ```

mod container;
mod error;
mod field;
mod spectrum;

pub use container::{DsdContainer, Location, TimeOrdering};
pub use error::DsdError;
pub use field::{BoxError, FieldCalculator, FieldKind};
pub use spectrum::DsdSpectrum;
