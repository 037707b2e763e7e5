//! The scattering-amplitude capability.
//!
//! Amplitudes come from an external electromagnetic model (Mie or
//! T-matrix); this crate only consumes them. The [`ScatteringSource`]
//! trait is the capability boundary: a pure lookup with a bounded diameter
//! domain and explicit failure outside it.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::ScatteringError;

/// Radar polarization plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    /// Horizontal.
    Horizontal,
    /// Vertical.
    Vertical,
}

/// Scattering geometry of a tabulated amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Backscatter (180°), used for reflectivity.
    Backward,
    /// Forward scatter (0°), used for Kdp and attenuation.
    Forward,
}

/// A scattering-amplitude lookup for one (wavelength, temperature)
/// configuration.
///
/// Passed explicitly into the radar processor rather than held as global
/// state, so several wavelength/temperature configurations can run
/// concurrently without interference.
pub trait ScatteringSource: Send + Sync {
    /// Wavelength (mm) the amplitudes were computed for.
    fn wavelength_mm(&self) -> f64;

    /// Drop temperature (°C) the amplitudes were computed for.
    fn temperature_c(&self) -> f64;

    /// Inclusive diameter domain (mm) of the lookup.
    fn diameter_domain(&self) -> (f64, f64);

    /// Complex scattering amplitude (mm) at `diameter_mm`.
    ///
    /// # Errors
    ///
    /// [`ScatteringError::OutOfDomain`] naming the requested diameter when
    /// it is not covered.
    fn amplitude(
        &self,
        diameter_mm: f64,
        polarization: Polarization,
        direction: Direction,
    ) -> Result<Complex64, ScatteringError>;
}

/// One diameter grid point of a tabulated scattering model.
///
/// Amplitudes are in mm; `back_*` are backscatter, `fwd_*` forward-scatter,
/// suffixed by polarization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatteringRow {
    /// Grid diameter (mm).
    pub diameter: f64,
    /// Horizontal backscatter amplitude.
    pub back_h: Complex64,
    /// Vertical backscatter amplitude.
    pub back_v: Complex64,
    /// Horizontal forward-scatter amplitude.
    pub fwd_h: Complex64,
    /// Vertical forward-scatter amplitude.
    pub fwd_v: Complex64,
}

/// In-memory scattering table with linear interpolation between grid
/// points.
#[derive(Debug, Clone)]
pub struct TabulatedScattering {
    wavelength_mm: f64,
    temperature_c: f64,
    rows: Vec<ScatteringRow>,
}

impl TabulatedScattering {
    /// Builds a table after validating the grid.
    ///
    /// # Errors
    ///
    /// [`ScatteringError::InvalidTable`] if the grid is empty, any value is
    /// non-finite, or diameters are not strictly increasing.
    pub fn build(
        wavelength_mm: f64,
        temperature_c: f64,
        rows: Vec<ScatteringRow>,
    ) -> Result<Self, ScatteringError> {
        if rows.is_empty() {
            return Err(ScatteringError::InvalidTable {
                reason: "table has no rows".to_string(),
            });
        }
        if !wavelength_mm.is_finite() || wavelength_mm <= 0.0 {
            return Err(ScatteringError::InvalidTable {
                reason: format!("wavelength must be finite and > 0, got {wavelength_mm}"),
            });
        }
        if !temperature_c.is_finite() {
            return Err(ScatteringError::InvalidTable {
                reason: format!("temperature must be finite, got {temperature_c}"),
            });
        }

        let mut previous = f64::NEG_INFINITY;
        for (i, row) in rows.iter().enumerate() {
            if !row.diameter.is_finite() || row.diameter <= 0.0 {
                return Err(ScatteringError::InvalidTable {
                    reason: format!("row {i} has invalid diameter {}", row.diameter),
                });
            }
            if row.diameter <= previous {
                return Err(ScatteringError::InvalidTable {
                    reason: format!(
                        "diameters must be strictly increasing (row {i}: {} after {previous})",
                        row.diameter
                    ),
                });
            }
            let finite = [row.back_h, row.back_v, row.fwd_h, row.fwd_v]
                .iter()
                .all(|a| a.re.is_finite() && a.im.is_finite());
            if !finite {
                return Err(ScatteringError::InvalidTable {
                    reason: format!("row {i} has a non-finite amplitude"),
                });
            }
            previous = row.diameter;
        }

        Ok(Self {
            wavelength_mm,
            temperature_c,
            rows,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows (never true for a built
    /// table).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn pick(row: &ScatteringRow, polarization: Polarization, direction: Direction) -> Complex64 {
        match (direction, polarization) {
            (Direction::Backward, Polarization::Horizontal) => row.back_h,
            (Direction::Backward, Polarization::Vertical) => row.back_v,
            (Direction::Forward, Polarization::Horizontal) => row.fwd_h,
            (Direction::Forward, Polarization::Vertical) => row.fwd_v,
        }
    }
}

impl ScatteringSource for TabulatedScattering {
    fn wavelength_mm(&self) -> f64 {
        self.wavelength_mm
    }

    fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    fn diameter_domain(&self) -> (f64, f64) {
        (self.rows[0].diameter, self.rows[self.rows.len() - 1].diameter)
    }

    fn amplitude(
        &self,
        diameter_mm: f64,
        polarization: Polarization,
        direction: Direction,
    ) -> Result<Complex64, ScatteringError> {
        let (d_min, d_max) = self.diameter_domain();
        if !diameter_mm.is_finite() || diameter_mm < d_min || diameter_mm > d_max {
            return Err(ScatteringError::OutOfDomain {
                diameter: diameter_mm,
                d_min,
                d_max,
            });
        }

        // Index of the first grid point at or past the query.
        let hi = self
            .rows
            .partition_point(|row| row.diameter < diameter_mm);
        let upper = &self.rows[hi.min(self.rows.len() - 1)];
        if upper.diameter == diameter_mm || hi == 0 {
            return Ok(Self::pick(upper, polarization, direction));
        }

        let lower = &self.rows[hi - 1];
        let t = (diameter_mm - lower.diameter) / (upper.diameter - lower.diameter);
        let a = Self::pick(lower, polarization, direction);
        let b = Self::pick(upper, polarization, direction);
        Ok(a + (b - a) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(d: f64, re: f64) -> ScatteringRow {
        ScatteringRow {
            diameter: d,
            back_h: Complex64::new(re, 0.1 * re),
            back_v: Complex64::new(0.9 * re, 0.1 * re),
            fwd_h: Complex64::new(re, -0.2 * re),
            fwd_v: Complex64::new(0.8 * re, -0.2 * re),
        }
    }

    fn table() -> TabulatedScattering {
        TabulatedScattering::build(
            32.1,
            10.0,
            vec![row(1.0, 1.0), row(2.0, 3.0), row(4.0, 10.0)],
        )
        .unwrap()
    }

    #[test]
    fn build_rejects_empty() {
        let result = TabulatedScattering::build(32.1, 10.0, vec![]);
        assert!(matches!(result, Err(ScatteringError::InvalidTable { .. })));
    }

    #[test]
    fn build_rejects_unsorted_grid() {
        let result = TabulatedScattering::build(32.1, 10.0, vec![row(2.0, 1.0), row(1.0, 1.0)]);
        assert!(matches!(result, Err(ScatteringError::InvalidTable { .. })));
    }

    #[test]
    fn build_rejects_nan_amplitude() {
        let mut bad = row(1.0, 1.0);
        bad.back_h = Complex64::new(f64::NAN, 0.0);
        let result = TabulatedScattering::build(32.1, 10.0, vec![bad]);
        assert!(matches!(result, Err(ScatteringError::InvalidTable { .. })));
    }

    #[test]
    fn exact_grid_point_lookup() {
        let t = table();
        let a = t
            .amplitude(2.0, Polarization::Horizontal, Direction::Backward)
            .unwrap();
        assert_relative_eq!(a.re, 3.0);
        assert_relative_eq!(a.im, 0.3);
    }

    #[test]
    fn interpolated_lookup() {
        let t = table();
        // Midpoint of (1.0 → 1.0+0.1i) and (2.0 → 3.0+0.3i).
        let a = t
            .amplitude(1.5, Polarization::Horizontal, Direction::Backward)
            .unwrap();
        assert_relative_eq!(a.re, 2.0);
        assert_relative_eq!(a.im, 0.2);
    }

    #[test]
    fn polarization_and_direction_select_distinct_amplitudes() {
        let t = table();
        let bh = t.amplitude(2.0, Polarization::Horizontal, Direction::Backward).unwrap();
        let bv = t.amplitude(2.0, Polarization::Vertical, Direction::Backward).unwrap();
        let fh = t.amplitude(2.0, Polarization::Horizontal, Direction::Forward).unwrap();
        assert!(bh != bv);
        assert!(bh != fh);
    }

    #[test]
    fn out_of_domain_names_diameter() {
        let t = table();
        let err = t
            .amplitude(9.5, Polarization::Horizontal, Direction::Backward)
            .unwrap_err();
        assert!(matches!(
            err,
            ScatteringError::OutOfDomain { diameter, .. } if diameter == 9.5
        ));
        let err_low = t
            .amplitude(0.5, Polarization::Vertical, Direction::Forward)
            .unwrap_err();
        assert!(matches!(err_low, ScatteringError::OutOfDomain { .. }));
    }

    #[test]
    fn domain_endpoints_included() {
        let t = table();
        assert!(t.amplitude(1.0, Polarization::Horizontal, Direction::Backward).is_ok());
        assert!(t.amplitude(4.0, Polarization::Horizontal, Direction::Backward).is_ok());
    }
}
