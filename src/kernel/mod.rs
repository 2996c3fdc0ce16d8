//! Square convolution kernels.
//!
//! A [`Kernel`] is a flat row-major `size * size` buffer with an odd side
//! length, so the center tap sits at `(size / 2, size / 2)`. The side length
//! is carried by the value; nothing in the engines assumes a fixed size.

use crate::util::{LogConvError, LogConvResult};

mod log;

/// Side length used by the reference configuration.
pub const DEFAULT_KERNEL_SIZE: usize = 17;

/// Spread used by the reference configuration.
pub const DEFAULT_SIGMA: f64 = 2.0;

/// Square filter kernel with odd side length.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

/// Number of taps in a `size x size` kernel; rejects even, zero and
/// overflowing sizes.
fn checked_area(size: usize) -> LogConvResult<usize> {
    if size == 0 || size % 2 == 0 {
        return Err(LogConvError::InvalidKernelSize { size });
    }
    size
        .checked_mul(size)
        .ok_or(LogConvError::InvalidKernelSize { size })
}

impl Kernel {
    /// Creates a kernel from `size * size` row-major weights.
    pub fn from_vec(size: usize, weights: Vec<f64>) -> LogConvResult<Self> {
        let expected = checked_area(size)?;
        if weights.len() != expected {
            return Err(LogConvError::BufferSizeMismatch {
                expected,
                got: weights.len(),
            });
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(LogConvError::NonFiniteValue { index });
        }
        Ok(Self { size, weights })
    }

    /// Kernel with a single unit weight at the center.
    pub fn identity(size: usize) -> LogConvResult<Self> {
        let area = checked_area(size)?;
        let mut weights = vec![0.0; area];
        let half = size / 2;
        weights[half * size + half] = 1.0;
        Ok(Self { size, weights })
    }

    /// Side length in taps.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Offset of the center tap along each axis.
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at column `kx`, row `ky`.
    pub fn get(&self, kx: usize, ky: usize) -> Option<f64> {
        if kx >= self.size || ky >= self.size {
            return None;
        }
        self.weights.get(ky * self.size + kx).copied()
    }

    /// Weights of row `ky`.
    pub fn row(&self, ky: usize) -> Option<&[f64]> {
        if ky >= self.size {
            return None;
        }
        let start = ky * self.size;
        self.weights.get(start..start + self.size)
    }

    /// Signed sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Sum of absolute weights.
    pub fn abs_sum(&self) -> f64 {
        self.weights.iter().map(|w| w.abs()).sum()
    }
}
