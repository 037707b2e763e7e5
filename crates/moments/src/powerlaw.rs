//! Power-law fits between rainfall and radar moments.

/// A fitted power law y = a·x^b.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    /// Scale coefficient.
    pub a: f64,
    /// Exponent.
    pub b: f64,
    /// Coefficient of determination of the log-log regression.
    pub r_squared: f64,
}

/// Fits y = a·x^b by least squares in log-log space.
///
/// Only strictly positive, finite pairs participate; returns `None` with
/// fewer than 3 usable pairs or when x is constant (degenerate regression).
pub fn power_law_fit(x: &[f64], y: &[f64]) -> Option<PowerLawFit> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|&(&xi, &yi)| xi > 0.0 && yi > 0.0 && xi.is_finite() && yi.is_finite())
        .map(|(&xi, &yi)| (xi.ln(), yi.ln()))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let sxx: f64 = pairs.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let syy: f64 = pairs.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
    let sxy: f64 = pairs
        .iter()
        .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
        .sum();

    if sxx <= 1e-12 {
        return None;
    }

    let b = sxy / sxx;
    let a = (mean_y - b * mean_x).exp();
    let r_squared = if syy <= 1e-12 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(PowerLawFit { a, b, r_squared })
}

/// Fits R = a·Kdp^b over samples where both are strictly positive.
pub fn r_kdp_relation(rain_rate: &[f64], kdp: &[f64]) -> Option<PowerLawFit> {
    power_law_fit(kdp, rain_rate)
}

/// Fits R = a·Zh^b against *linear* reflectivity, converting the dBZ
/// sequence first. Rain-free samples (−∞ dBZ → 0 linear) drop out of the
/// fit.
pub fn r_zh_relation(rain_rate: &[f64], zh_dbz: &[f64]) -> Option<PowerLawFit> {
    let zh_linear: Vec<f64> = zh_dbz.iter().map(|&db| 10.0_f64.powf(0.1 * db)).collect();
    power_law_fit(&zh_linear, rain_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_power_law() {
        let x: Vec<f64> = (1..=20).map(|i| i as f64 * 0.25).collect();
        let y: Vec<f64> = x.iter().map(|&xi| 29.7 * xi.powf(0.85)).collect();
        let fit = power_law_fit(&x, &y).unwrap();
        assert_relative_eq!(fit.a, 29.7, max_relative = 1e-10);
        assert_relative_eq!(fit.b, 0.85, max_relative = 1e-10);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn ignores_non_positive_pairs() {
        let x = vec![0.0, -1.0, 1.0, 2.0, 4.0, f64::NAN];
        let y = vec![5.0, 5.0, 2.0, 4.0, 8.0, 5.0];
        // Only (1,2), (2,4), (4,8) participate: y = 2x.
        let fit = power_law_fit(&x, &y).unwrap();
        assert_relative_eq!(fit.a, 2.0, max_relative = 1e-10);
        assert_relative_eq!(fit.b, 1.0, max_relative = 1e-10);
    }

    #[test]
    fn too_few_pairs() {
        assert!(power_law_fit(&[1.0, 2.0], &[1.0, 2.0]).is_none());
        assert!(power_law_fit(&[], &[]).is_none());
    }

    #[test]
    fn constant_x_degenerate() {
        let x = vec![2.0, 2.0, 2.0, 2.0];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert!(power_law_fit(&x, &y).is_none());
    }

    #[test]
    fn r_zh_converts_from_dbz() {
        // R = 0.017·Zh_linear^0.714 at a few synthetic points.
        let zh_linear: [f64; 4] = [200.0, 1000.0, 5000.0, 20000.0];
        let zh_dbz: Vec<f64> = zh_linear.iter().map(|z| 10.0 * z.log10()).collect();
        let r: Vec<f64> = zh_linear.iter().map(|z| 0.017 * z.powf(0.714)).collect();
        let fit = r_zh_relation(&r, &zh_dbz).unwrap();
        assert_relative_eq!(fit.a, 0.017, max_relative = 1e-8);
        assert_relative_eq!(fit.b, 0.714, max_relative = 1e-8);
    }

    #[test]
    fn rain_free_samples_drop_out() {
        let zh_dbz = [f64::NEG_INFINITY, 23.0, 30.0, 36.0, 41.0];
        let r = [0.0, 1.1, 3.2, 8.9, 20.1];
        let fit = r_zh_relation(&r, &zh_dbz).unwrap();
        assert!(fit.a > 0.0 && fit.b > 0.0);
    }
}
