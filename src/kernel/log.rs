//! Laplacian-of-Gaussian kernel generation.

use super::{checked_area, Kernel};
use crate::util::math::log_response;
use crate::util::{LogConvError, LogConvResult};

impl Kernel {
    /// Builds an L1-normalized Laplacian-of-Gaussian kernel.
    ///
    /// Cell `(i, j)` (row `i`, column `j`) holds the LoG response at offset
    /// `(i - size / 2, j - size / 2)`. Every weight is divided by the sum of
    /// absolute responses, so `abs_sum() == 1` while the kernel keeps both
    /// signs.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
    pub fn laplacian_of_gaussian(size: usize, sigma: f64) -> LogConvResult<Self> {
        let area = checked_area(size)?;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(LogConvError::InvalidSigma { sigma });
        }
        let half = (size / 2) as f64;
        let mut weights = Vec::with_capacity(area);
        let mut sum_abs = 0.0f64;
        for i in 0..size {
            for j in 0..size {
                let value = log_response(i as f64 - half, j as f64 - half, sigma);
                sum_abs += value.abs();
                weights.push(value);
            }
        }

        // exp underflow for tiny sigma on a large grid leaves only the center.
        if !(sum_abs.is_finite() && sum_abs > 0.0) {
            return Err(LogConvError::InvalidSigma { sigma });
        }
        for w in weights.iter_mut() {
            *w /= sum_abs;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(sum_abs, "log kernel normalized");
        Ok(Self { size, weights })
    }
}

#[cfg(test)]
mod tests {
    use crate::kernel::Kernel;
    use crate::util::LogConvError;

    #[test]
    fn weights_have_unit_l1_norm() {
        let k = Kernel::laplacian_of_gaussian(17, 2.0).unwrap();
        assert_eq!(k.size(), 17);
        assert_eq!(k.weights().len(), 17 * 17);
        assert!((k.abs_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn center_is_positive_and_rim_is_negative() {
        let k = Kernel::laplacian_of_gaussian(9, 1.0).unwrap();
        let center = k.get(4, 4).unwrap();
        assert!(center > 0.0);
        assert!(k.weights().iter().all(|&w| w <= center));
        assert!(k.get(0, 4).unwrap() < 0.0);
    }

    #[test]
    fn size_one_is_a_unit_tap() {
        let k = Kernel::laplacian_of_gaussian(1, 0.5).unwrap();
        assert_eq!(k.weights(), &[1.0]);
    }

    #[test]
    fn rejects_bad_sigma() {
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Kernel::laplacian_of_gaussian(5, sigma).unwrap_err();
            assert!(matches!(err, LogConvError::InvalidSigma { .. }));
        }
    }

    #[test]
    fn rejects_even_size() {
        assert_eq!(
            Kernel::laplacian_of_gaussian(16, 2.0).unwrap_err(),
            LogConvError::InvalidKernelSize { size: 16 }
        );
    }
}
