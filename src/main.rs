// THEORY:
// `unshred` is the thin command-line glue around the library: it checks the
// input path, decodes the image, runs one of the pipelines, composes the strips
// in the recovered order and writes the result next to the working directory.
// Everything that decides the order lives in the library.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use unshredder::core_modules::utils::image_helper::image_helper;
use unshredder::{
    CoveragePolicy, ParallelPipeline, PipelineConfig, UnshredPipeline, compose,
};

/// Reassemble an image that was cut into equal-width vertical strips and shuffled.
#[derive(Parser, Debug)]
#[command(name = "unshred", version)]
struct Args {
    /// Shredded input image (any format the `image` crate decodes)
    input: PathBuf,

    /// Output path; defaults to `<stem>_unshredded.<ext>` in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip width detection and use this strip width
    #[arg(short = 'w', long)]
    strip_width: Option<u32>,

    /// Boundaries combined by the width estimator beyond the strongest one
    #[arg(short = 'k', long, default_value_t = 3)]
    boundary_candidates: usize,

    /// Fail if the width is not a multiple of the strip width
    #[arg(long)]
    strict: bool,

    /// Give up on the scan after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Run the single-threaded pipeline
    #[arg(long)]
    sequential: bool,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            boundary_candidates: self.boundary_candidates,
            strip_width: self.strip_width,
            coverage: if self.strict {
                CoveragePolicy::Strict
            } else {
                CoveragePolicy::Lenient
            },
            deadline: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if !args.input.exists() {
        bail!("input image {} does not exist", args.input.display());
    }

    let image = image_helper::load(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let source = Arc::new(image);
    let config = args.pipeline_config();

    let report = if args.sequential {
        UnshredPipeline::new(config).run(&*source)?
    } else {
        let pipeline = ParallelPipeline::new(config);
        debug!(workers = pipeline.workers(), "running parallel pipeline");
        pipeline.run(Arc::clone(&source)).await?
    };
    debug!(
        rounds = report.rounds,
        chains = report.chains,
        seam_cost = report.seam_cost,
        "reconstruction finished"
    );

    let output = compose(&*source, &report.order)?;
    let path = args
        .output
        .unwrap_or_else(|| image_helper::unshredded_path(&args.input));
    image_helper::save(&path, &output)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote unshredded image");
    Ok(())
}
