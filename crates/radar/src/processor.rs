//! The radar moment processor.

use std::f64::consts::PI;
use std::sync::Arc;

use pluvio_bins::BinTable;
use pluvio_dsd::DsdSpectrum;

use crate::config::RadarConfig;
use crate::error::RadarError;
use crate::scattering::{Direction, Polarization, ScatteringSource};

/// Relative tolerance between the configured wavelength and the scattering
/// source's declared wavelength.
const WAVELENGTH_TOL: f64 = 0.01;

/// Σ Re(f_h − f_v)·N·ΔD (mm·mm⁻¹·m⁻³·mm) → °/km for λ in mm.
const KDP_SCALE: f64 = 180.0 / PI * 1e-3;

/// Σ Im(f_h)·N·ΔD → one-way dB/km for λ in mm (optical theorem,
/// σ_ext = 2λ·Im f, Np→dB).
const ATTENUATION_SCALE: f64 = 2.0 * 8.686 * 1e-3;

/// Computes polarimetric radar moments from spectra and a scattering
/// capability.
///
/// The scattering source is an explicit constructor argument, never global
/// state, so several wavelength/temperature configurations can run side by
/// side.
pub struct RadarProcessor {
    config: RadarConfig,
    source: Arc<dyn ScatteringSource>,
}

impl RadarProcessor {
    /// Creates a processor after validating the configuration against the
    /// scattering source.
    ///
    /// # Errors
    ///
    /// [`RadarError::InvalidConfig`] for a bad configuration,
    /// [`RadarError::WavelengthMismatch`] when the source was computed for
    /// a different wavelength (beyond 1% relative).
    pub fn new(
        config: RadarConfig,
        source: Arc<dyn ScatteringSource>,
    ) -> Result<Self, RadarError> {
        config.validate()?;
        let table_wl = source.wavelength_mm();
        if ((table_wl - config.wavelength_mm()) / config.wavelength_mm()).abs() > WAVELENGTH_TOL
        {
            return Err(RadarError::WavelengthMismatch {
                config: config.wavelength_mm(),
                table: table_wl,
            });
        }
        Ok(Self { config, source })
    }

    /// The processor configuration.
    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Integrates `N_i · f(amplitudes at D_i) · ΔD_i` over occupied bins.
    ///
    /// Rain-free bins are skipped, so diameters the instrument never
    /// observed in this spectrum cannot force a lookup outside the table
    /// domain; an occupied bin outside the domain fails loudly.
    fn integrate<F>(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
        mut term: F,
    ) -> Result<f64, RadarError>
    where
        F: FnMut(&Self, f64) -> Result<f64, RadarError>,
    {
        let mut sum = 0.0;
        for (&n, bin) in spectrum.nd().iter().zip(bins.bins()) {
            if n <= 0.0 {
                continue;
            }
            sum += n * term(self, bin.center)? * bin.width;
        }
        Ok(sum)
    }

    /// Linear reflectivity (mm⁶/m³) for one polarization:
    /// λ⁴/(π⁵·|K_w|²)·Σ N_i·σ_p(D_i)·ΔD_i with σ_p = 4π·|S_p|².
    fn z_linear(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
        polarization: Polarization,
    ) -> Result<f64, RadarError> {
        let lambda = self.config.wavelength_mm();
        let prefactor = lambda.powi(4) / (PI.powi(5) * self.config.dielectric_factor());
        let integral = self.integrate(spectrum, bins, |p, d| {
            let s = p.source.amplitude(d, polarization, Direction::Backward)?;
            Ok(4.0 * PI * s.norm_sqr())
        })?;
        Ok(prefactor * integral)
    }

    /// Horizontal linear reflectivity (mm⁶/m³).
    pub fn zh_linear(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> Result<f64, RadarError> {
        self.z_linear(spectrum, bins, Polarization::Horizontal)
    }

    /// Vertical linear reflectivity (mm⁶/m³).
    pub fn zv_linear(&self, spectrum: &DsdSpectrum, bins: &BinTable) -> Result<f64, RadarError> {
        self.z_linear(spectrum, bins, Polarization::Vertical)
    }

    /// Horizontal reflectivity in dBZ.
    ///
    /// A rain-free spectrum integrates to 0 and reports −∞ dBZ — the
    /// representable no-signal floor, never NaN.
    pub fn reflectivity(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
    ) -> Result<f64, RadarError> {
        Ok(10.0 * self.zh_linear(spectrum, bins)?.log10())
    }

    /// Vertical reflectivity in dBZ, with the same no-signal floor.
    pub fn reflectivity_v(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
    ) -> Result<f64, RadarError> {
        Ok(10.0 * self.zv_linear(spectrum, bins)?.log10())
    }

    /// Differential reflectivity Zdr (dB) = 10·log10(Zh/Zv).
    ///
    /// 0.0 dB when either linear integral is zero (no signal to compare).
    pub fn differential_reflectivity(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
    ) -> Result<f64, RadarError> {
        let zh = self.zh_linear(spectrum, bins)?;
        let zv = self.zv_linear(spectrum, bins)?;
        if zh <= 0.0 || zv <= 0.0 {
            return Ok(0.0);
        }
        Ok(10.0 * (zh / zv).log10())
    }

    /// Specific differential phase Kdp (°/km):
    /// (180/π)·λ·Σ N_i·Re(f_h(D_i) − f_v(D_i))·ΔD_i.
    pub fn specific_differential_phase(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
    ) -> Result<f64, RadarError> {
        let integral = self.integrate(spectrum, bins, |p, d| {
            let fh = p.source.amplitude(d, Polarization::Horizontal, Direction::Forward)?;
            let fv = p.source.amplitude(d, Polarization::Vertical, Direction::Forward)?;
            Ok((fh - fv).re)
        })?;
        Ok(KDP_SCALE * self.config.wavelength_mm() * integral)
    }

    /// One-way specific attenuation Ai (dB/km) at horizontal polarization,
    /// from the forward-scattering optical theorem.
    pub fn specific_attenuation(
        &self,
        spectrum: &DsdSpectrum,
        bins: &BinTable,
    ) -> Result<f64, RadarError> {
        let integral = self.integrate(spectrum, bins, |p, d| {
            let fh = p.source.amplitude(d, Polarization::Horizontal, Direction::Forward)?;
            Ok(fh.im)
        })?;
        Ok(ATTENUATION_SCALE * self.config.wavelength_mm() * integral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use num_complex::Complex64;
    use pluvio_bins::VelocityLaw;

    use crate::scattering::{ScatteringRow, TabulatedScattering};

    fn bins() -> BinTable {
        BinTable::build(
            vec![1.0, 2.0, 3.0],
            vec![1.0, 1.0, 1.0],
            VelocityLaw::atlas_ulbrich(),
        )
        .unwrap()
    }

    /// Table where |S_back|² is easy to integrate by hand and the
    /// forward amplitudes have known real/imaginary parts.
    fn source() -> Arc<dyn ScatteringSource> {
        let rows = (1..=3)
            .map(|i| {
                let d = i as f64;
                ScatteringRow {
                    diameter: d,
                    back_h: Complex64::new(2.0 * d, 0.0),
                    back_v: Complex64::new(d, 0.0),
                    fwd_h: Complex64::new(3.0 * d, 0.5 * d),
                    fwd_v: Complex64::new(2.0 * d, 0.25 * d),
                }
            })
            .collect();
        Arc::new(TabulatedScattering::build(32.1, 10.0, rows).unwrap())
    }

    fn processor() -> RadarProcessor {
        RadarProcessor::new(RadarConfig::x_band(), source()).unwrap()
    }

    fn spectrum(nd: Vec<f64>) -> DsdSpectrum {
        let t = Utc.with_ymd_and_hms(2022, 9, 3, 15, 0, 0).unwrap();
        DsdSpectrum::new(t, nd)
    }

    #[test]
    fn wavelength_mismatch_rejected() {
        let result = RadarProcessor::new(RadarConfig::s_band(), source());
        assert!(matches!(result, Err(RadarError::WavelengthMismatch { .. })));
    }

    #[test]
    fn zh_linear_hand_computed() {
        // nd = [10, 0, 0]: only D = 1 contributes.
        // σ_h = 4π·|2·1|² = 16π; integral = 10·16π·1.
        let p = processor();
        let z = p.zh_linear(&spectrum(vec![10.0, 0.0, 0.0]), &bins()).unwrap();
        let lambda: f64 = 32.1;
        let expected = lambda.powi(4) / (PI.powi(5) * 0.93) * 10.0 * 16.0 * PI;
        assert_relative_eq!(z, expected, max_relative = 1e-12);
    }

    #[test]
    fn zdr_positive_for_oblate_response() {
        // back_h = 2·back_v everywhere → Zh/Zv = 4 → Zdr ≈ 6.02 dB.
        let p = processor();
        let zdr = p
            .differential_reflectivity(&spectrum(vec![10.0, 5.0, 1.0]), &bins())
            .unwrap();
        assert_relative_eq!(zdr, 10.0 * 4.0_f64.log10(), max_relative = 1e-12);
    }

    #[test]
    fn kdp_hand_computed() {
        // Re(f_h − f_v) = d at each grid point.
        // nd = [0, 7, 0]: integral = 7·2·1 = 14.
        let p = processor();
        let kdp = p
            .specific_differential_phase(&spectrum(vec![0.0, 7.0, 0.0]), &bins())
            .unwrap();
        assert_relative_eq!(
            kdp,
            180.0 / PI * 1e-3 * 32.1 * 14.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn attenuation_hand_computed() {
        // Im(f_h) = 0.5·d; nd = [4, 0, 0] → integral = 4·0.5 = 2.
        let p = processor();
        let ai = p
            .specific_attenuation(&spectrum(vec![4.0, 0.0, 0.0]), &bins())
            .unwrap();
        assert_relative_eq!(ai, 2.0 * 8.686 * 1e-3 * 32.1 * 2.0, max_relative = 1e-12);
    }

    #[test]
    fn rain_free_spectrum_floors_not_nan() {
        let p = processor();
        let dry = spectrum(vec![0.0, 0.0, 0.0]);
        let dbz = p.reflectivity(&dry, &bins()).unwrap();
        assert!(dbz.is_infinite() && dbz < 0.0, "dBZ = {dbz}");
        let zdr = p.differential_reflectivity(&dry, &bins()).unwrap();
        assert_eq!(zdr, 0.0);
        assert!(!zdr.is_nan());
    }

    #[test]
    fn occupied_bin_outside_domain_fails_loudly() {
        // Table covers 1..=3 mm but the bin table reaches 5 mm.
        let wide = BinTable::build(
            vec![1.0, 3.0, 5.0],
            vec![1.0, 1.0, 1.0],
            VelocityLaw::atlas_ulbrich(),
        )
        .unwrap();
        let p = processor();
        let err = p
            .zh_linear(&spectrum(vec![1.0, 1.0, 1.0]), &wide)
            .unwrap_err();
        assert!(matches!(
            err,
            RadarError::Scattering(crate::error::ScatteringError::OutOfDomain { diameter, .. })
                if diameter == 5.0
        ));

        // The same spectrum with the 5 mm bin empty is fine.
        assert!(p.zh_linear(&spectrum(vec![1.0, 1.0, 0.0]), &wide).is_ok());
    }
}
