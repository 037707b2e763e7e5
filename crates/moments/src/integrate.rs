//! Discretized-bin DSD integrals.
//!
//! Every integral here is the same summation `Σ_i N_i · (…) · ΔD_i` over
//! the table's own bin widths. The estimator crate consumes [`moment`] and
//! the physical quantities below share the identical convention, so moment
//! ratios stay mutually consistent.
//!
//! Units: D in mm, ΔD in mm, N(D) in mm⁻¹·m⁻³, v in m/s, water density
//! 1 g/cm³.

use pluvio_bins::BinTable;
use pluvio_dsd::DsdSpectrum;
use std::f64::consts::PI;

/// mm³ of water per m³ of air → g/m³ (ρ_water = 1 g/cm³ = 10⁻³ g/mm³).
const MM3_TO_G: f64 = 1e-3;

/// Volume-flux integral → mm/h (3600 s/h · 10⁻⁶ m/mm² collapses to
/// 0.6π·10⁻³ against the π/6 volume factor).
const RAIN_RATE_SCALE: f64 = 0.6 * PI * 1e-3;

/// Raw k-th moment M_k = Σ N_i·D_i^k·ΔD_i (mm^k·m⁻³).
pub fn moment(spectrum: &DsdSpectrum, bins: &BinTable, order: f64) -> f64 {
    spectrum
        .nd()
        .iter()
        .zip(bins.bins())
        .map(|(&n, bin)| n * bin.center.powf(order) * bin.width)
        .sum()
}

/// Liquid water content (g/m³): (π/6)·ρ_w·Σ N_i·D_i³·ΔD_i.
///
/// Non-negative always; zero exactly when every concentration is zero.
pub fn lwc(spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
    PI / 6.0 * MM3_TO_G * moment(spectrum, bins, 3.0)
}

/// Rain rate (mm/h): (π/6)·Σ N_i·D_i³·v(D_i)·ΔD_i with the table's
/// fall-velocity relation, converted by a single fixed factor.
pub fn rain_rate(spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
    let flux: f64 = spectrum
        .nd()
        .iter()
        .zip(bins.bins())
        .map(|(&n, bin)| n * bin.center.powi(3) * bin.fall_velocity * bin.width)
        .sum();
    RAIN_RATE_SCALE * flux
}

/// Median volume diameter D0 (mm): the diameter at which the cumulative
/// third-moment curve crosses 50% of its total, interpolated linearly
/// across the straddling bin. Returns 0.0 for a rain-free spectrum.
pub fn median_volume_diameter(spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
    let contributions: Vec<f64> = spectrum
        .nd()
        .iter()
        .zip(bins.bins())
        .map(|(&n, bin)| n * bin.center.powi(3) * bin.width)
        .collect();
    let total: f64 = contributions.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let half = 0.5 * total;

    let mut cum = 0.0;
    for (bin, &c) in bins.bins().iter().zip(contributions.iter()) {
        if c > 0.0 && cum + c >= half {
            let left_edge = bin.center - 0.5 * bin.width;
            return left_edge + bin.width * (half - cum) / c;
        }
        cum += c;
    }

    // Accumulated rounding can leave the crossing past the last nonzero
    // contribution; the right edge of the largest occupied bin is the answer.
    let last = bins
        .bins()
        .iter()
        .zip(contributions.iter())
        .rev()
        .find(|(_, &c)| c > 0.0)
        .map(|(bin, _)| bin)
        .expect("total > 0 implies a nonzero contribution");
    last.center + 0.5 * last.width
}

/// Mass-weighted mean diameter Dm = M₄/M₃ (mm); 0.0 for a rain-free
/// spectrum.
pub fn mass_weighted_mean_diameter(spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
    let m3 = moment(spectrum, bins, 3.0);
    if m3 <= 0.0 {
        return 0.0;
    }
    moment(spectrum, bins, 4.0) / m3
}

/// Total drop concentration Nt = Σ N_i·ΔD_i (m⁻³).
pub fn total_concentration(spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
    spectrum
        .nd()
        .iter()
        .zip(bins.bins())
        .map(|(&n, bin)| n * bin.width)
        .sum()
}

/// Normalized intercept parameter Nw (mm⁻¹·m⁻³) from LWC (g/m³) and D0
/// (mm): Nw = (3.67⁴/π)·10³·W/D0⁴ for ρ_w = 1 g/cm³. Returns 0.0 when
/// D0 is 0 (no signal).
pub fn normalized_intercept(lwc_g_m3: f64, d0_mm: f64) -> f64 {
    if d0_mm <= 0.0 {
        return 0.0;
    }
    3.67_f64.powi(4) / PI * 1e3 * lwc_g_m3 / d0_mm.powi(4)
}

/// Center diameter of the largest bin with nonzero concentration (mm);
/// 0.0 for a rain-free spectrum.
pub fn max_diameter(spectrum: &DsdSpectrum, bins: &BinTable) -> f64 {
    spectrum
        .nd()
        .iter()
        .zip(bins.bins())
        .rev()
        .find(|(&n, _)| n > 0.0)
        .map(|(_, bin)| bin.center)
        .unwrap_or(0.0)
}
