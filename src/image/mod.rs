//! Grayscale image storage and views.
//!
//! `GrayImage` owns a contiguous row-major `f64` intensity buffer; engines
//! read it through the borrowed `ImageView`.

use crate::util::{LogConvError, LogConvResult};

mod buffer;
pub mod color;
#[cfg(feature = "image-io")]
pub mod io;

pub use buffer::OutputBuffer;

/// Borrowed row-major image with `width * height` samples.
///
/// The engines take images through this view so callers can filter a slice
/// they already own without building a [`GrayImage`].
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Wraps a slice holding exactly `width * height` samples.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> LogConvResult<Self> {
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

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Row `y` as a slice of `width` samples.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }
}

/// Computes `width * height`, rejecting empty or overflowing shapes.
pub(crate) fn pixel_count(width: usize, height: usize) -> LogConvResult<usize> {
    if width == 0 || height == 0 {
        return Err(LogConvError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(LogConvError::InvalidDimensions { width, height })
}

/// Owned single-channel intensity image in contiguous row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayImage {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl GrayImage {
    /// Creates an image from a row-major buffer of `width * height` finite values.
    pub fn new(data: Vec<f64>, width: usize, height: usize) -> LogConvResult<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(LogConvError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(LogConvError::NonFiniteValue { index });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> LogConvResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let len = pixel_count(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major intensity buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the intensity at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, f64> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }

    /// Consumes the image and returns its buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
