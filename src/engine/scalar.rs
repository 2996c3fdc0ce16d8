//! Scalar reference convolution.
//!
//! Direct double-precision accumulation with implicit zero padding. This is
//! the correctness reference for every other engine.

use crate::engine::Convolver;
use crate::image::{ImageView, OutputBuffer};
use crate::kernel::Kernel;
use crate::util::LogConvResult;

/// Kernel indices `k` in `[start, end)` whose tap `pos + k - half` lands
/// inside `[0, extent)`. Requires `pos < extent`.
#[inline]
pub(crate) fn tap_range(pos: usize, half: usize, size: usize, extent: usize) -> (usize, usize) {
    let start = half.saturating_sub(pos);
    let end = size.min(extent + half - pos);
    (start, end)
}

/// Filter response at output pixel `(x, y)`.
///
/// Taps are visited row by row, left to right; out-of-bounds taps are
/// skipped, which is the same as multiplying them by a zero pad.
#[inline]
pub(crate) fn convolve_at(image: ImageView<'_, f64>, kernel: &Kernel, x: usize, y: usize) -> f64 {
    let size = kernel.size();
    let half = kernel.half();
    let weights = kernel.weights();
    let (ky0, ky1) = tap_range(y, half, size, image.height());
    let (kx0, kx1) = tap_range(x, half, size, image.width());
    let px0 = x + kx0 - half;
    let span = kx1 - kx0;

    let mut sum = 0.0f64;
    for ky in ky0..ky1 {
        let Some(img_row) = image.row(y + ky - half) else {
            continue;
        };
        let taps = &weights[ky * size + kx0..ky * size + kx1];
        for (value, weight) in img_row[px0..px0 + span].iter().zip(taps) {
            sum += value * weight;
        }
    }
    sum
}

/// Single-threaded reference engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarConvolver;

impl Convolver for ScalarConvolver {
    fn name(&self) -> &'static str {
        "scalar"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "convolve_scalar",
            level = "info",
            skip_all,
            fields(width = image.width(), height = image.height(), kernel = kernel.size())
        )
    )]
    fn apply(&self, image: ImageView<'_, f64>, kernel: &Kernel) -> LogConvResult<OutputBuffer> {
        let width = image.width();
        let height = image.height();

        let mut output = OutputBuffer::zeros(width, height)?;
        let out = output.data_mut();
        for y in 0..height {
            for x in 0..width {
                out[y * width + x] = convolve_at(image, kernel, x, y);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!(pixels = width * height, "scalar convolution done");
        Ok(output)
    }
}
