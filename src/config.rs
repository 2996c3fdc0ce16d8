//! Run parameters shared by the library entry points and the CLI.

use crate::engine::{ParallelConvolver, DEFAULT_TILE_SIZE};
use crate::kernel::{Kernel, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA};
use crate::util::{LogConvError, LogConvResult};

/// Kernel and scheduling parameters for one filtering run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    /// Odd kernel side length.
    pub kernel_size: usize,
    /// Laplacian-of-Gaussian spread.
    pub sigma: f64,
    /// Tile side length for the parallel engine.
    pub tile_size: usize,
    /// Dedicated worker count for the parallel engine; `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            sigma: DEFAULT_SIGMA,
            tile_size: DEFAULT_TILE_SIZE,
            threads: None,
        }
    }
}

impl FilterConfig {
    /// Checks every parameter without building anything.
    pub fn validate(&self) -> LogConvResult<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(LogConvError::InvalidKernelSize {
                size: self.kernel_size,
            });
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(LogConvError::InvalidSigma { sigma: self.sigma });
        }
        if self.tile_size == 0 {
            return Err(LogConvError::InvalidTileSize { tile_size: 0 });
        }
        if self.threads == Some(0) {
            return Err(LogConvError::InvalidInput("thread count must be at least 1"));
        }
        Ok(())
    }

    /// Builds the Laplacian-of-Gaussian kernel for this run.
    pub fn kernel(&self) -> LogConvResult<Kernel> {
        Kernel::laplacian_of_gaussian(self.kernel_size, self.sigma)
    }

    /// Builds the parallel engine for this run.
    pub fn parallel_engine(&self) -> ParallelConvolver {
        let engine = ParallelConvolver::new(self.tile_size);
        match self.threads {
            Some(threads) => engine.with_threads(threads),
            None => engine,
        }
    }
}
