//! Conversions from 8-bit pixel layouts to single-channel intensity.
//!
//! Intensity is the unweighted mean of the red, green and blue samples, kept
//! as `f64` (no rounding). Alpha is ignored.

use crate::image::{pixel_count, GrayImage};
use crate::util::{LogConvError, LogConvResult};

fn check_len(data: &[u8], width: usize, height: usize, channels: usize) -> LogConvResult<()> {
    let expected = pixel_count(width, height)?
        .checked_mul(channels)
        .ok_or(LogConvError::InvalidDimensions { width, height })?;
    if data.len() != expected {
        return Err(LogConvError::BufferSizeMismatch {
            expected,
            got: data.len(),
        });
    }
    Ok(())
}

fn gray_from_interleaved(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> LogConvResult<GrayImage> {
    check_len(data, width, height, channels)?;
    let gray = data
        .chunks_exact(channels)
        .map(|px| (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0)
        .collect();
    GrayImage::new(gray, width, height)
}

/// Converts packed RGB8 pixels to intensity.
pub fn gray_from_rgb8(data: &[u8], width: usize, height: usize) -> LogConvResult<GrayImage> {
    gray_from_interleaved(data, width, height, 3)
}

/// Converts packed RGBA8 pixels to intensity, ignoring alpha.
pub fn gray_from_rgba8(data: &[u8], width: usize, height: usize) -> LogConvResult<GrayImage> {
    gray_from_interleaved(data, width, height, 4)
}

/// Converts 8-bit luma samples to intensity (gray level is used as-is).
pub fn gray_from_luma8(data: &[u8], width: usize, height: usize) -> LogConvResult<GrayImage> {
    check_len(data, width, height, 1)?;
    GrayImage::new(data.iter().map(|&v| f64::from(v)).collect(), width, height)
}

#[cfg(test)]
mod tests {
    use super::{gray_from_luma8, gray_from_rgb8, gray_from_rgba8};
    use crate::util::LogConvError;

    #[test]
    fn rgb_mean_of_channels() {
        let data = [255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 255, 0];
        let gray = gray_from_rgb8(&data, 2, 2).unwrap();
        assert_eq!(gray.data(), &[255.0, 0.0, 85.0, 85.0]);
    }

    #[test]
    fn rgba_ignores_alpha() {
        let data = [30, 60, 90, 0, 30, 60, 90, 255];
        let gray = gray_from_rgba8(&data, 2, 1).unwrap();
        assert_eq!(gray.data(), &[60.0, 60.0]);
    }

    #[test]
    fn rgb_keeps_fractional_mean() {
        let gray = gray_from_rgb8(&[1, 1, 0], 1, 1).unwrap();
        assert!((gray.data()[0] - 2.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn luma_is_identity() {
        let gray = gray_from_luma8(&[7, 200], 1, 2).unwrap();
        assert_eq!(gray.data(), &[7.0, 200.0]);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = gray_from_rgb8(&[0; 11], 2, 2).unwrap_err();
        assert_eq!(
            err,
            LogConvError::BufferSizeMismatch {
                expected: 12,
                got: 11
            }
        );
    }
}
