//! Error types for the pluvio-radar crate.

/// Error type for scattering-table construction and lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScatteringError {
    /// Returned when a scattering table is malformed.
    #[error("invalid scattering table: {reason}")]
    InvalidTable {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a lookup falls outside the table's diameter domain.
    ///
    /// The missing key is named so a corrupted reflectivity integral can
    /// never pass silently.
    #[error(
        "no scattering entry for diameter {diameter} mm (table covers {d_min}..={d_max} mm)"
    )]
    OutOfDomain {
        /// The requested diameter (mm).
        diameter: f64,
        /// Smallest tabulated diameter (mm).
        d_min: f64,
        /// Largest tabulated diameter (mm).
        d_max: f64,
    },
}

/// Error type for the radar moment processor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadarError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the scattering source was computed for a different
    /// wavelength than the processor is configured for.
    #[error("wavelength mismatch: config {config} mm but scattering table {table} mm")]
    WavelengthMismatch {
        /// Configured radar wavelength (mm).
        config: f64,
        /// The scattering source's wavelength (mm).
        table: f64,
    },

    /// A scattering lookup failed.
    #[error(transparent)]
    Scattering(#[from] ScatteringError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_out_of_domain_names_the_key() {
        let e = ScatteringError::OutOfDomain {
            diameter: 9.5,
            d_min: 0.1,
            d_max: 8.0,
        };
        assert_eq!(
            e.to_string(),
            "no scattering entry for diameter 9.5 mm (table covers 0.1..=8 mm)"
        );
    }

    #[test]
    fn error_invalid_table() {
        let e = ScatteringError::InvalidTable {
            reason: "diameters must be strictly increasing".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid scattering table: diameters must be strictly increasing"
        );
    }

    #[test]
    fn error_wavelength_mismatch() {
        let e = RadarError::WavelengthMismatch {
            config: 32.1,
            table: 111.0,
        };
        assert_eq!(
            e.to_string(),
            "wavelength mismatch: config 32.1 mm but scattering table 111 mm"
        );
    }

    #[test]
    fn scattering_error_converts() {
        let e: RadarError = ScatteringError::OutOfDomain {
            diameter: 11.0,
            d_min: 0.1,
            d_max: 8.0,
        }
        .into();
        assert!(matches!(e, RadarError::Scattering(_)));
        assert!(e.to_string().contains("11 mm"));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ScatteringError>();
        assert_impl::<RadarError>();
    }
}
