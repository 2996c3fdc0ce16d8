//! Error types for logconv.

use thiserror::Error;

/// Result alias for logconv operations.
pub type LogConvResult<T> = std::result::Result<T, LogConvError>;

/// Errors that can occur when building kernels, filtering or doing image I/O.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LogConvError {
    /// Image or buffer dimensions are zero or overflow `usize`.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer length does not match the declared shape.
    #[error("buffer size mismatch: expected {expected} elements, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// Two buffers that must share a shape do not.
    #[error("shape mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    /// A sample is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFiniteValue { index: usize },
    /// Kernel side length must be odd and positive.
    #[error("invalid kernel size {size}: must be odd and positive")]
    InvalidKernelSize { size: usize },
    /// Kernel spread must be a positive finite number.
    #[error("invalid sigma {sigma}: must be positive and finite")]
    InvalidSigma { sigma: f64 },
    /// Tile side length for the parallel engine must be at least 1.
    #[error("invalid tile size {tile_size}: must be at least 1")]
    InvalidTileSize { tile_size: usize },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The accelerated execution environment cannot be used.
    #[error("accelerated execution unavailable: {reason}")]
    ExecutionUnavailable { reason: String },
    /// The input path has no file extension.
    #[error("no file extension found in {path}")]
    MissingExtension { path: String },
    /// The input path has an extension other than png/jpg/jpeg.
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },
    /// Decoding or encoding failed in the image backend.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}
