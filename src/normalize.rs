//! Display normalization of filter responses.
//!
//! Values are mapped linearly so the smallest finite sample becomes 0 and the
//! largest finite sample becomes 255: `v' = (v - min) / (max - min) * 255`.
//! A buffer without a finite range to stretch (constant, or no finite values
//! at all) is mapped to all zeros. Non-finite samples (NaN, which the engines
//! produce from `inf - inf` on extreme inputs, and infinities) are mapped to
//! zero as well, so the output always lies in `[0, 255]`.

use crate::image::OutputBuffer;
use crate::util::math::min_max;

/// Upper bound of the display range.
pub const DISPLAY_MAX: f64 = 255.0;

/// Value assigned to constant buffers and to non-finite samples.
pub const CONSTANT_FILL: f64 = 0.0;

/// Rescales a buffer into `[0, 255]` in place.
pub fn normalize(buffer: &mut OutputBuffer) {
    normalize_slice(buffer.data_mut());
}

/// Rescales a slice into `[0, 255]` in place. Empty slices are left alone.
pub fn normalize_slice(values: &mut [f64]) {
    let Some((min, max)) = min_max(values) else {
        values.fill(CONSTANT_FILL);
        return;
    };
    #[cfg(feature = "tracing")]
    tracing::debug!(min, max, "normalize extrema");

    if max <= min {
        values.fill(CONSTANT_FILL);
        return;
    }
    // Extrema near f64::MAX overflow `max - min`; halve everything first.
    let (shrink, offset, range) = if (max - min).is_finite() {
        (1.0, min, max - min)
    } else {
        (0.5, min * 0.5, max * 0.5 - min * 0.5)
    };
    for v in values.iter_mut() {
        *v = if v.is_finite() {
            ((*v * shrink - offset) / range * DISPLAY_MAX).clamp(0.0, DISPLAY_MAX)
        } else {
            CONSTANT_FILL
        };
    }
}
