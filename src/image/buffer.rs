//! Filter response buffers produced by the convolution engines.

use crate::image::pixel_count;
use crate::util::{LogConvError, LogConvResult};

/// Raw or normalized filter response with the same shape as its source image.
///
/// Each engine call returns a fresh buffer, so two execution paths can never
/// write into the same instance.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputBuffer {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl OutputBuffer {
    /// Creates a zero-filled buffer.
    pub fn zeros(width: usize, height: usize) -> LogConvResult<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            data: vec![0.0; len],
            width,
            height,
        })
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> LogConvResult<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(LogConvError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the row-major values mutably.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns the value at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns row `y` as a slice.
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Rescales the values into `[0, 255]` in place.
    ///
    /// See [`crate::normalize::normalize`] for the constant-buffer rule.
    pub fn normalize(&mut self) {
        crate::normalize::normalize(self);
    }

    /// Quantizes to 8-bit samples by truncation.
    ///
    /// Values below 0 saturate to 0, values above 255 saturate to 255 and NaN
    /// maps to 0, matching Rust's float-to-int `as` cast.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| v as u8).collect()
    }

    /// Largest absolute per-pixel difference against another buffer.
    pub fn max_abs_diff(&self, other: &OutputBuffer) -> LogConvResult<f64> {
        if self.width != other.width || self.height != other.height {
            return Err(LogConvError::ShapeMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: other.width,
                height: other.height,
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    /// Consumes the buffer and returns its values.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
