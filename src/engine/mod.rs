//! Convolution engines.
//!
//! Both engines compute the same zero-padded correlation of an image with a
//! square kernel: output `(x, y)` accumulates `image[y + ky - h][x + kx - h] *
//! kernel[ky][kx]` over all in-bounds taps, with `h = size / 2`. They differ
//! only in how output pixels are scheduled, so callers can swap them through
//! the [`Convolver`] trait.

use crate::image::{ImageView, OutputBuffer};
use crate::kernel::Kernel;
use crate::util::{LogConvError, LogConvResult};

pub mod scalar;

#[cfg(feature = "simd")]
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
pub(crate) mod simd;

#[cfg(feature = "rayon")]
mod rayon;

pub use scalar::ScalarConvolver;

/// Default tile side length for the parallel engine.
pub const DEFAULT_TILE_SIZE: usize = 32;

/// Capability shared by all engines.
pub trait Convolver: Send + Sync {
    /// Short engine name for logs and reports.
    fn name(&self) -> &'static str;

    /// Filters `image` with `kernel` and returns the raw response.
    fn apply(&self, image: ImageView<'_, f64>, kernel: &Kernel) -> LogConvResult<OutputBuffer>;
}

/// Rectangle of output pixels handled by one parallel job.
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tile {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
impl Tile {
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
}

/// Splits a `width x height` image into square tiles of side `tile_size`,
/// clipping the last row and column of tiles at the image border.
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
pub(crate) fn tile_grid(
    width: usize,
    height: usize,
    tile_size: usize,
) -> LogConvResult<Vec<Tile>> {
    if tile_size == 0 {
        return Err(LogConvError::InvalidTileSize { tile_size });
    }
    let mut tiles = Vec::with_capacity(width.div_ceil(tile_size) * height.div_ceil(tile_size));
    for y0 in (0..height).step_by(tile_size) {
        for x0 in (0..width).step_by(tile_size) {
            tiles.push(Tile {
                x0,
                y0,
                x1: (x0 + tile_size).min(width),
                y1: (y0 + tile_size).min(height),
            });
        }
    }
    Ok(tiles)
}

/// Data-parallel engine over square tiles of output pixels.
///
/// Requires the `rayon` feature; without it every call fails with
/// [`LogConvError::ExecutionUnavailable`].
#[derive(Clone, Copy, Debug)]
pub struct ParallelConvolver {
    tile_size: usize,
    threads: Option<usize>,
}

impl Default for ParallelConvolver {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl ParallelConvolver {
    /// Creates an engine that runs on the global rayon pool.
    pub fn new(tile_size: usize) -> Self {
        Self {
            tile_size,
            threads: None,
        }
    }

    /// Runs on a dedicated pool with `threads` workers instead.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Tile side length in pixels.
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Dedicated worker count, if any.
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

impl Convolver for ParallelConvolver {
    fn name(&self) -> &'static str {
        "parallel"
    }

    #[cfg(feature = "rayon")]
    fn apply(&self, image: ImageView<'_, f64>, kernel: &Kernel) -> LogConvResult<OutputBuffer> {
        if self.tile_size == 0 {
            return Err(LogConvError::InvalidTileSize { tile_size: 0 });
        }
        match self.threads {
            Some(threads) => {
                self::rayon::convolve_tiled_on_pool(image, kernel, self.tile_size, threads)
            }
            None => self::rayon::convolve_tiled(image, kernel, self.tile_size),
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn apply(&self, _image: ImageView<'_, f64>, _kernel: &Kernel) -> LogConvResult<OutputBuffer> {
        if self.tile_size == 0 {
            return Err(LogConvError::InvalidTileSize { tile_size: 0 });
        }
        Err(LogConvError::ExecutionUnavailable {
            reason: "built without the `rayon` feature".to_string(),
        })
    }
}

/// Filters with the scalar reference engine.
pub fn apply_reference(image: ImageView<'_, f64>, kernel: &Kernel) -> LogConvResult<OutputBuffer> {
    ScalarConvolver.apply(image, kernel)
}

/// Filters with the tile-parallel engine on the global pool.
pub fn apply_accelerated(
    image: ImageView<'_, f64>,
    kernel: &Kernel,
    tile_size: usize,
) -> LogConvResult<OutputBuffer> {
    ParallelConvolver::new(tile_size).apply(image, kernel)
}

#[cfg(test)]
mod tests {
    use super::{tile_grid, Tile};
    use crate::util::LogConvError;

    #[test]
    fn tiles_cover_image_once() {
        let tiles = tile_grid(10, 7, 4).unwrap();
        assert_eq!(tiles.len(), 3 * 2);
        let mut hits = vec![0u8; 10 * 7];
        for tile in &tiles {
            for y in tile.y0..tile.y1 {
                for x in tile.x0..tile.x1 {
                    hits[y * 10 + x] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&h| h == 1));
        assert_eq!(
            tiles.last().copied(),
            Some(Tile {
                x0: 8,
                y0: 4,
                x1: 10,
                y1: 7
            })
        );
    }

    #[test]
    fn oversized_tile_is_whole_image() {
        let tiles = tile_grid(3, 2, 64).unwrap();
        assert_eq!(
            tiles,
            vec![Tile {
                x0: 0,
                y0: 0,
                x1: 3,
                y1: 2
            }]
        );
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        assert_eq!(
            tile_grid(3, 3, 0).unwrap_err(),
            LogConvError::InvalidTileSize { tile_size: 0 }
        );
    }

    #[cfg(not(feature = "rayon"))]
    #[test]
    fn parallel_engine_unavailable_without_rayon() {
        use super::{Convolver, ParallelConvolver};
        use crate::image::GrayImage;
        use crate::kernel::Kernel;

        let image = GrayImage::new(vec![0.0; 4], 2, 2).unwrap();
        let kernel = Kernel::identity(3).unwrap();
        let err = ParallelConvolver::new(2).apply(image.view(), &kernel).unwrap_err();
        assert!(matches!(err, LogConvError::ExecutionUnavailable { .. }));
    }
}
