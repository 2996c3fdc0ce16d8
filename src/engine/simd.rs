//! SIMD tap accumulation using the `wide` crate.
//!
//! Same visiting order over kernel rows as the scalar engine, but the
//! in-bounds span of each row is reduced four taps at a time with `f64x4`.
//! Lane-wise partial sums reassociate the additions, so results differ from
//! the scalar engine only by rounding.

use crate::engine::scalar::tap_range;
use crate::image::ImageView;
use crate::kernel::Kernel;
use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

#[inline]
fn dot(values: &[f64], taps: &[f64]) -> f64 {
    let n = values.len().min(taps.len());
    let simd_end = n / LANES * LANES;

    let mut acc = f64x4::ZERO;
    let mut i = 0;
    while i < simd_end {
        acc += load_f64x4(&values[i..]) * load_f64x4(&taps[i..]);
        i += LANES;
    }

    let mut sum = hsum(acc);
    while i < n {
        sum += values[i] * taps[i];
        i += 1;
    }
    sum
}

/// Filter response at `(x, y)` with vectorized row reductions.
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
        sum += dot(
            &img_row[px0..px0 + span],
            &weights[ky * size + kx0..ky * size + kx1],
        );
    }
    sum
}
