//! Radar processor configuration.

use crate::error::RadarError;

/// Configuration for the radar moment processor.
///
/// # Example
///
/// ```
/// use pluvio_radar::RadarConfig;
///
/// let config = RadarConfig::x_band().with_temperature_c(20.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarConfig {
    wavelength_mm: f64,
    dielectric_factor: f64,
    temperature_c: f64,
}

impl RadarConfig {
    /// Creates a configuration for an arbitrary wavelength (mm).
    ///
    /// Defaults: `dielectric_factor = 0.93` (|K_w|² for liquid water),
    /// `temperature_c = 10.0`.
    pub fn new(wavelength_mm: f64) -> Self {
        Self {
            wavelength_mm,
            dielectric_factor: 0.93,
            temperature_c: 10.0,
        }
    }

    /// S band (111.0 mm).
    pub fn s_band() -> Self {
        Self::new(111.0)
    }

    /// C band (53.5 mm).
    pub fn c_band() -> Self {
        Self::new(53.5)
    }

    /// X band (32.1 mm).
    pub fn x_band() -> Self {
        Self::new(32.1)
    }

    // --- Builder methods ---

    /// Sets the dielectric factor |K_w|².
    pub fn with_dielectric_factor(mut self, k2: f64) -> Self {
        self.dielectric_factor = k2;
        self
    }

    /// Sets the assumed drop temperature (°C).
    pub fn with_temperature_c(mut self, t: f64) -> Self {
        self.temperature_c = t;
        self
    }

    // --- Accessors ---

    /// Radar wavelength (mm).
    pub fn wavelength_mm(&self) -> f64 {
        self.wavelength_mm
    }

    /// Dielectric factor |K_w|².
    pub fn dielectric_factor(&self) -> f64 {
        self.dielectric_factor
    }

    /// Assumed drop temperature (°C).
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), RadarError> {
        if !self.wavelength_mm.is_finite() || self.wavelength_mm <= 0.0 {
            return Err(RadarError::InvalidConfig {
                reason: format!(
                    "wavelength_mm must be finite and > 0, got {}",
                    self.wavelength_mm
                ),
            });
        }
        if !self.dielectric_factor.is_finite() || self.dielectric_factor <= 0.0 {
            return Err(RadarError::InvalidConfig {
                reason: format!(
                    "dielectric_factor must be finite and > 0, got {}",
                    self.dielectric_factor
                ),
            });
        }
        if !self.temperature_c.is_finite() {
            return Err(RadarError::InvalidConfig {
                reason: format!("temperature_c must be finite, got {}", self.temperature_c),
            });
        }
        Ok(())
    }
}
