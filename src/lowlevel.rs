//! Low-level building blocks for custom filtering pipelines.
//!
//! Pixel-layout conversions and slice-level normalization for callers that
//! manage their own buffers. Most users should prefer [`crate::GrayImage`],
//! [`crate::Convolver`] and [`crate::normalize`].

pub use crate::image::color::{gray_from_luma8, gray_from_rgb8, gray_from_rgba8};
pub use crate::normalize::{normalize_slice, CONSTANT_FILL, DISPLAY_MAX};
