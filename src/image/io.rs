//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::color::gray_from_rgb8;
use crate::image::{GrayImage, OutputBuffer};
use crate::util::{LogConvError, LogConvResult};
use std::path::Path;

/// Input formats accepted by [`load_gray_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Png,
    Jpeg,
}

impl InputFormat {
    /// Picks the format from the path extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> LogConvResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| LogConvError::MissingExtension {
                path: path.display().to_string(),
            })?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(LogConvError::UnsupportedFormat {
                extension: ext.to_string(),
            }),
        }
    }
}

fn io_error(err: image::ImageError) -> LogConvError {
    LogConvError::ImageIo {
        reason: err.to_string(),
    }
}

/// Creates an intensity image from a decoded dynamic image.
///
/// Gray and palette sources are expanded to RGB first, so a gray level `g`
/// yields intensity `g`; 16-bit sources are reduced to 8 bits.
pub fn gray_from_dynamic_image(img: &image::DynamicImage) -> LogConvResult<GrayImage> {
    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    gray_from_rgb8(rgb.as_raw(), width, height)
}

/// Loads a PNG or JPEG file from disk and converts it to intensity.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> LogConvResult<GrayImage> {
    let path = path.as_ref();
    InputFormat::from_path(path)?;
    let img = image::open(path).map_err(io_error)?;
    gray_from_dynamic_image(&img)
}

/// Writes a buffer as an 8-bit single-channel PNG.
///
/// Samples are quantized with [`OutputBuffer::to_u8`], so the buffer should
/// already be normalized.
pub fn save_png<P: AsRef<Path>>(path: P, buffer: &OutputBuffer) -> LogConvResult<()> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| LogConvError::InvalidInput("image width exceeds u32"))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| LogConvError::InvalidInput("image height exceeds u32"))?;
    let img = image::GrayImage::from_raw(width, height, buffer.to_u8())
        .ok_or(LogConvError::InvalidInput("buffer does not match image shape"))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(io_error)
}
