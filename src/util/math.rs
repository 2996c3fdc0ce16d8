//! Numeric helpers shared by kernel generation and normalization.

/// Returns `(min, max)` over the finite values of a slice, or `None` when it
/// has no finite value. NaN and infinities are skipped wherever they sit.
pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Laplacian-of-Gaussian response at integer offset `(x, y)` from the center.
///
/// `1 / (2 pi sigma^4) * (1 - r2 / (2 sigma^2)) * exp(-r2 / (2 sigma^2))`
/// with `r2 = x^2 + y^2`.
pub(crate) fn log_response(x: f64, y: f64, sigma: f64) -> f64 {
    let two_sigma2 = 2.0 * sigma * sigma;
    let r2 = (x * x + y * y) / two_sigma2;
    let scale = 1.0 / (2.0 * std::f64::consts::PI * sigma.powi(4));
    scale * (1.0 - r2) * (-r2).exp()
}

#[cfg(test)]
mod tests {
    use super::{log_response, min_max};

    #[test]
    fn min_max_handles_empty_and_mixed() {
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[3.0]), Some((3.0, 3.0)));
        assert_eq!(min_max(&[2.0, -1.5, 7.0, 0.0]), Some((-1.5, 7.0)));
    }

    #[test]
    fn min_max_skips_non_finite_in_any_position() {
        assert_eq!(min_max(&[f64::NAN, 0.0, 10.0]), Some((0.0, 10.0)));
        assert_eq!(min_max(&[0.0, f64::NAN, 10.0]), Some((0.0, 10.0)));
        assert_eq!(
            min_max(&[f64::INFINITY, 3.0, f64::NEG_INFINITY]),
            Some((3.0, 3.0))
        );
        assert_eq!(min_max(&[f64::NAN, f64::INFINITY]), None);
    }

    #[test]
    fn log_response_center_matches_scale() {
        let sigma = 2.0;
        let expected = 1.0 / (2.0 * std::f64::consts::PI * 16.0);
        assert!((log_response(0.0, 0.0, sigma) - expected).abs() < 1e-15);
    }

    #[test]
    fn log_response_changes_sign_at_zero_crossing() {
        // r^2 = 2 sigma^2 is the zero crossing.
        let sigma = 1.0;
        let at_crossing = log_response(2f64.sqrt(), 0.0, sigma);
        assert!(at_crossing.abs() < 1e-15);
        assert!(log_response(3.0, 0.0, sigma) < 0.0);
        assert!(log_response(0.5, 0.5, sigma) > 0.0);
    }

    #[test]
    fn log_response_is_radially_symmetric() {
        let a = log_response(2.0, 1.0, 1.7);
        let b = log_response(-1.0, 2.0, 1.7);
        assert!((a - b).abs() < 1e-15);
    }
}
