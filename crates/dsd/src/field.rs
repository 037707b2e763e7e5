//! Derived-field kinds and the calculator registration trait.

use std::fmt;
use std::str::FromStr;

use pluvio_bins::BinTable;

use crate::error::DsdError;
use crate::spectrum::DsdSpectrum;

/// Boxed error type carried by failed field computations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The fixed set of derived scalar fields a container can carry.
///
/// One value per spectrum. The set is closed at the type level but open at
/// the registry level: new computations plug in by registering a
/// [`FieldCalculator`] for a kind, and consumers address fields either by
/// variant or by canonical name (see [`FieldKind::as_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Rain rate (mm/h).
    RainRate,
    /// Liquid water content (g/m³).
    Lwc,
    /// Median volume diameter D0 (mm).
    D0,
    /// Mass-weighted mean diameter Dm (mm).
    Dm,
    /// Total drop concentration Nt (m⁻³).
    Nt,
    /// Normalized intercept parameter Nw (mm⁻¹·m⁻³).
    Nw,
    /// Largest observed drop diameter (mm).
    Dmax,
    /// Horizontal reflectivity (dBZ).
    Zh,
    /// Vertical reflectivity (dBZ).
    Zv,
    /// Differential reflectivity (dB).
    Zdr,
    /// Specific differential phase (°/km).
    Kdp,
    /// Specific attenuation (dB/km).
    Ai,
}

impl FieldKind {
    /// All field kinds, in registry order.
    pub const ALL: [FieldKind; 12] = [
        FieldKind::RainRate,
        FieldKind::Lwc,
        FieldKind::D0,
        FieldKind::Dm,
        FieldKind::Nt,
        FieldKind::Nw,
        FieldKind::Dmax,
        FieldKind::Zh,
        FieldKind::Zv,
        FieldKind::Zdr,
        FieldKind::Kdp,
        FieldKind::Ai,
    ];

    /// Canonical lowercase name used in CLI arguments and JSON documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::RainRate => "rain_rate",
            FieldKind::Lwc => "lwc",
            FieldKind::D0 => "d0",
            FieldKind::Dm => "dm",
            FieldKind::Nt => "nt",
            FieldKind::Nw => "nw",
            FieldKind::Dmax => "dmax",
            FieldKind::Zh => "zh",
            FieldKind::Zv => "zv",
            FieldKind::Zdr => "zdr",
            FieldKind::Kdp => "kdp",
            FieldKind::Ai => "ai",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| DsdError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// A derived-field computation that can be registered with a container.
///
/// Implementations receive the full spectrum sequence and the shared bin
/// table, and must return exactly one value per spectrum. Spectra are
/// independent, so implementations are free to (and in this workspace do)
/// parallelize over them; the trait is `Send + Sync` so registered
/// calculators can be shared across threads.
pub trait FieldCalculator: Send + Sync {
    /// Computes the field sequence, one value per spectrum.
    fn compute(&self, spectra: &[DsdSpectrum], bins: &BinTable) -> Result<Vec<f64>, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trip() {
        for kind in FieldKind::ALL {
            let parsed: FieldKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "reflectivity_factor".parse::<FieldKind>().unwrap_err();
        assert!(matches!(err, DsdError::UnknownField { name } if name == "reflectivity_factor"));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(FieldKind::RainRate.to_string(), "rain_rate");
        assert_eq!(FieldKind::Zdr.to_string(), "zdr");
    }

    #[test]
    fn all_names_distinct() {
        let mut names: Vec<&str> = FieldKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FieldKind::ALL.len());
    }
}
