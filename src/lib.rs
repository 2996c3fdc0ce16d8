//! logconv filters grayscale images with a Laplacian-of-Gaussian kernel.
//!
//! The crate provides a scalar reference engine and a tile-parallel engine
//! (via the `rayon` feature) behind one [`Convolver`] trait, display
//! normalization of the signed response, and optional PNG/JPEG I/O through
//! the `image-io` feature.

pub mod config;
pub mod engine;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod normalize;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use config::FilterConfig;
pub use engine::{
    apply_accelerated, apply_reference, Convolver, ParallelConvolver, ScalarConvolver,
    DEFAULT_TILE_SIZE,
};
pub use crate::image::{GrayImage, ImageView, OutputBuffer};
pub use kernel::{Kernel, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA};
pub use normalize::normalize;
pub use util::{LogConvError, LogConvResult};
