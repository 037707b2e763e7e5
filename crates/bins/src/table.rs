//! Immutable diameter-bin tables.

use crate::error::BinError;
use crate::velocity::VelocityLaw;

/// One diameter class of a disdrometer.
///
/// The terminal fall velocity is evaluated once at construction from the
/// table's velocity law; bins never change after the table is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiameterBin {
    /// Position of this bin within its table.
    pub index: usize,
    /// Bin center diameter (mm).
    pub center: f64,
    /// Bin width (mm).
    pub width: f64,
    /// Terminal fall velocity at the bin center (m/s).
    pub fall_velocity: f64,
}

/// Immutable description of an instrument's diameter bins.
///
/// Shared read-only (typically behind an `Arc`) by every component that
/// integrates over the same instrument configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    bins: Vec<DiameterBin>,
    law: VelocityLaw,
}

impl BinTable {
    /// Builds a bin table from center diameters (mm), bin widths (mm), and a
    /// fall-velocity relation.
    ///
    /// # Errors
    ///
    /// Returns [`BinError`] if the inputs are empty, differ in length,
    /// contain a non-positive or non-finite width, a non-finite or
    /// non-positive center, or centers that are not strictly increasing.
    pub fn build(
        centers: Vec<f64>,
        widths: Vec<f64>,
        law: VelocityLaw,
    ) -> Result<Self, BinError> {
        if centers.len() != widths.len() {
            return Err(BinError::LengthMismatch {
                centers_len: centers.len(),
                widths_len: widths.len(),
            });
        }
        if centers.is_empty() {
            return Err(BinError::Empty);
        }

        let mut bins = Vec::with_capacity(centers.len());
        let mut previous = 0.0_f64;
        for (index, (&center, &width)) in centers.iter().zip(widths.iter()).enumerate() {
            if !center.is_finite() || center <= 0.0 {
                return Err(BinError::InvalidCenter { index, center });
            }
            if !width.is_finite() || width <= 0.0 {
                return Err(BinError::NonPositiveWidth { index, width });
            }
            if index > 0 && center <= previous {
                return Err(BinError::NonIncreasingCenters {
                    index,
                    center,
                    previous,
                });
            }
            previous = center;
            bins.push(DiameterBin {
                index,
                center,
                width,
                fall_velocity: law.evaluate(center),
            });
        }

        Ok(Self { bins, law })
    }

    /// The standard 32-class OTT Parsivel bin layout with the Atlas
    /// exponential fall-velocity relation.
    pub fn parsivel() -> Self {
        #[rustfmt::skip]
        let centers = vec![
            0.062, 0.187, 0.312, 0.437, 0.562, 0.687, 0.812, 0.937, 1.062, 1.187,
            1.375, 1.625, 1.875, 2.125, 2.375,
            2.750, 3.250, 3.750, 4.250, 4.750,
            5.500, 6.500, 7.500, 8.500, 9.500,
            11.000, 13.000, 15.000, 17.000, 19.000,
            21.500, 24.500,
        ];
        #[rustfmt::skip]
        let widths = vec![
            0.125, 0.125, 0.125, 0.125, 0.125, 0.125, 0.125, 0.125, 0.125, 0.125,
            0.250, 0.250, 0.250, 0.250, 0.250,
            0.500, 0.500, 0.500, 0.500, 0.500,
            1.000, 1.000, 1.000, 1.000, 1.000,
            2.000, 2.000, 2.000, 2.000, 2.000,
            3.000, 3.000,
        ];
        Self::build(centers, widths, VelocityLaw::AtlasExponential)
            .expect("Parsivel preset is statically valid")
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` if the table has no bins (never true for a built table).
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the bin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn bin(&self, index: usize) -> &DiameterBin {
        &self.bins[index]
    }

    /// All bins in increasing diameter order.
    pub fn bins(&self) -> &[DiameterBin] {
        &self.bins
    }

    /// Terminal fall velocity (m/s) for the bin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn fall_velocity(&self, index: usize) -> f64 {
        self.bins[index].fall_velocity
    }

    /// The velocity relation this table was built with.
    pub fn velocity_law(&self) -> &VelocityLaw {
        &self.law
    }

    /// Smallest bin-center diameter (mm).
    pub fn min_diameter(&self) -> f64 {
        self.bins[0].center
    }

    /// Largest bin-center diameter (mm).
    pub fn max_diameter(&self) -> f64 {
        self.bins[self.bins.len() - 1].center
    }
}
