//! Rayon tile-parallel convolution (feature-gated).
//!
//! Output pixels are split into square tiles; every tile is an independent
//! job on the rayon pool. Jobs only read the shared image and kernel and
//! return their own values, which are copied into the output buffer once
//! `collect` has joined all of them.

use crate::engine::{tile_grid, Tile};
use crate::image::{ImageView, OutputBuffer};
use crate::kernel::Kernel;
use crate::util::{LogConvError, LogConvResult};
use rayon::prelude::*;

#[cfg(feature = "simd")]
use crate::engine::simd::convolve_at;
#[cfg(not(feature = "simd"))]
use crate::engine::scalar::convolve_at;

fn convolve_tile(image: ImageView<'_, f64>, kernel: &Kernel, tile: Tile) -> Vec<f64> {
    let mut values = Vec::with_capacity(tile.width() * tile.height());
    for y in tile.y0..tile.y1 {
        for x in tile.x0..tile.x1 {
            values.push(convolve_at(image, kernel, x, y));
        }
    }
    values
}

/// Tile-parallel convolution on the current rayon pool.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "convolve_tiled",
        level = "info",
        skip_all,
        fields(width = image.width(), height = image.height(), tile_size = tile_size)
    )
)]
pub(crate) fn convolve_tiled(
    image: ImageView<'_, f64>,
    kernel: &Kernel,
    tile_size: usize,
) -> LogConvResult<OutputBuffer> {
    let width = image.width();
    let height = image.height();
    let tiles = tile_grid(width, height, tile_size)?;
    #[cfg(feature = "tracing")]
    tracing::debug!(tiles = tiles.len(), "tile grid built");

    let tile_results: Vec<(Tile, Vec<f64>)> = tiles
        .into_par_iter()
        .map(|tile| (tile, convolve_tile(image, kernel, tile)))
        .collect();

    // Merge tiles into the output
    let mut output = OutputBuffer::zeros(width, height)?;
    let out = output.data_mut();
    for (tile, values) in tile_results {
        for (y, chunk) in (tile.y0..tile.y1).zip(values.chunks_exact(tile.width())) {
            let start = y * width + tile.x0;
            out[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::info!(pixels = width * height, "tiled convolution done");
    Ok(output)
}

/// Tile-parallel convolution on a dedicated pool with `threads` workers.
pub(crate) fn convolve_tiled_on_pool(
    image: ImageView<'_, f64>,
    kernel: &Kernel,
    tile_size: usize,
    threads: usize,
) -> LogConvResult<OutputBuffer> {
    if threads == 0 {
        return Err(LogConvError::InvalidInput("thread count must be at least 1"));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| LogConvError::ExecutionUnavailable {
            reason: err.to_string(),
        })?;
    pool.install(|| convolve_tiled(image, kernel, tile_size))
}
