use clap::Parser;
use logconv::io::{load_gray_image, save_png};
use logconv::{
    Convolver, FilterConfig, GrayImage, Kernel, LogConvError, OutputBuffer, ScalarConvolver,
    DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA, DEFAULT_TILE_SIZE,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const REFERENCE_OUTPUT: &str = "cpu_output.png";
const PARALLEL_OUTPUT: &str = "parallel_output.png";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Laplacian-of-Gaussian filter with scalar and parallel engines"
)]
struct Cli {
    /// Input image (.png, .jpg or .jpeg).
    input: PathBuf,
    /// Odd kernel side length.
    #[arg(long, default_value_t = DEFAULT_KERNEL_SIZE)]
    kernel_size: usize,
    /// Laplacian-of-Gaussian spread.
    #[arg(long, default_value_t = DEFAULT_SIGMA)]
    sigma: f64,
    /// Tile side length for the parallel engine.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: usize,
    /// Worker threads for the parallel engine (default: rayon global pool).
    #[arg(long)]
    threads: Option<usize>,
    /// Directory receiving the output PNGs.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
    /// Print a JSON run report instead of progress lines.
    #[arg(long)]
    json: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct EngineReport {
    engine: &'static str,
    seconds: f64,
    output_path: String,
}

#[derive(Debug, Serialize)]
struct RunReport {
    input: String,
    width: usize,
    height: usize,
    kernel_size: usize,
    sigma: f64,
    tile_size: usize,
    reference: EngineReport,
    parallel: EngineReport,
    parallel_fallback: bool,
    max_abs_diff: f64,
}

struct EngineRun {
    engine: &'static str,
    output: OutputBuffer,
    seconds: f64,
}

fn run_engine(
    engine: &dyn Convolver,
    image: &GrayImage,
    kernel: &Kernel,
) -> Result<EngineRun, LogConvError> {
    let start = Instant::now();
    let output = engine.apply(image.view(), kernel)?;
    Ok(EngineRun {
        engine: engine.name(),
        output,
        seconds: start.elapsed().as_secs_f64(),
    })
}

/// Runs `engine`, substituting the scalar engine when it reports
/// `ExecutionUnavailable`. The flag is true when the substitution happened.
fn run_with_fallback(
    engine: &dyn Convolver,
    image: &GrayImage,
    kernel: &Kernel,
) -> Result<(EngineRun, bool), LogConvError> {
    match run_engine(engine, image, kernel) {
        Ok(run) => Ok((run, false)),
        Err(LogConvError::ExecutionUnavailable { reason }) => {
            eprintln!(
                "warning: {} engine unavailable ({reason}), using scalar engine",
                engine.name()
            );
            tracing::warn!(%reason, engine = engine.name(), "falling back to scalar engine");
            Ok((run_engine(&ScalarConvolver, image, kernel)?, true))
        }
        Err(err) => Err(err),
    }
}

fn finish(mut run: EngineRun, path: &Path) -> Result<EngineReport, LogConvError> {
    run.output.normalize();
    save_png(path, &run.output)?;
    Ok(EngineReport {
        engine: run.engine,
        seconds: run.seconds,
        output_path: path.display().to_string(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("logconv=info".parse()?))
            .with_target(false)
            .init();
    }

    let config = FilterConfig {
        kernel_size: cli.kernel_size,
        sigma: cli.sigma,
        tile_size: cli.tile_size,
        threads: cli.threads,
    };
    config.validate()?;
    let progress = !cli.json;

    if progress {
        println!("Reading image {}", cli.input.display());
    }
    let image = load_gray_image(&cli.input)?;
    let kernel = config.kernel()?;

    if progress {
        println!("Applying kernel to image");
    }
    let reference = run_engine(&ScalarConvolver, &image, &kernel)?;
    if progress {
        println!("CPU execution time: {:.6} seconds", reference.seconds);
    }

    let parallel_engine = config.parallel_engine();
    let (parallel, parallel_fallback) = run_with_fallback(&parallel_engine, &image, &kernel)?;
    if progress {
        println!("Parallel execution time: {:.6} seconds", parallel.seconds);
    }

    let max_abs_diff = reference.output.max_abs_diff(&parallel.output)?;
    if progress {
        println!("Max absolute difference between engines: {max_abs_diff:e}");
    }

    let reference_path = cli.out_dir.join(REFERENCE_OUTPUT);
    let parallel_path = cli.out_dir.join(PARALLEL_OUTPUT);
    if progress {
        println!("Writing CPU image to {}", reference_path.display());
    }
    let reference = finish(reference, &reference_path)?;
    if progress {
        println!("Writing parallel image to {}", parallel_path.display());
    }
    let parallel = finish(parallel, &parallel_path)?;

    if cli.json {
        let report = RunReport {
            input: cli.input.display().to_string(),
            width: image.width(),
            height: image.height(),
            kernel_size: kernel.size(),
            sigma: config.sigma,
            tile_size: config.tile_size,
            reference,
            parallel,
            parallel_fallback,
            max_abs_diff,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
