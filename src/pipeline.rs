// THEORY:
// The `pipeline` module is the top-level API of the unshredder. It runs the
// whole reconstruction stack on one image and returns a single `Report`:
//
//   boundary profile -> width estimate -> partition -> adjacency ranking
//   -> chain resolution -> sequencing
//
// This is the synchronous reference behaviour. `parallel_pipeline` fans the
// two scan stages out across worker threads and then hands over to the same
// `partition_checked` and `finish` steps defined here, so both produce the same
// order for the same image.

use crate::core_modules::adjacency_ranker::rank_strips;
use crate::core_modules::chain_resolver::resolve;
use crate::core_modules::compositor::seam_cost;
use crate::core_modules::frame::PixelSource;
use crate::core_modules::scan_control::ScanControl;
use crate::core_modules::sequencer::sequence;
use crate::core_modules::strip::{Partition, StripId, StripSpan, partition};
use crate::core_modules::width_estimator::{
    DEFAULT_BOUNDARY_CANDIDATES, FixedWidth, GcdWidthEstimator, WidthEstimate, WidthEstimator,
    estimate_width,
};
use crate::error::{Result, UnshredError};
use enough::Stop;
use std::time::Duration;
use tracing::{info, instrument, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::width_estimator::Confidence;

/// What to do with trailing columns when the width is not a multiple of the strip width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoveragePolicy {
    /// Warn, order the full strips, and keep the trailing columns in place.
    #[default]
    Lenient,
    /// Fail with `PartialCoverage` before ranking.
    Strict,
}

/// Configuration for the pipelines, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many boundaries, beyond the strongest, the GCD estimator combines.
    pub boundary_candidates: usize,
    /// Skip estimation and use this strip width.
    pub strip_width: Option<u32>,
    pub coverage: CoveragePolicy,
    /// Time budget for the two scan stages.
    pub deadline: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            boundary_candidates: DEFAULT_BOUNDARY_CANDIDATES,
            strip_width: None,
            coverage: CoveragePolicy::default(),
            deadline: None,
        }
    }
}

impl PipelineConfig {
    pub fn width_estimator(&self) -> Box<dyn WidthEstimator> {
        match self.strip_width {
            Some(width) => Box::new(FixedWidth(width)),
            None => Box::new(GcdWidthEstimator::new(self.boundary_candidates)),
        }
    }

    pub fn scan_control(&self) -> ScanControl {
        match self.deadline {
            Some(budget) => ScanControl::with_budget(budget),
            None => ScanControl::new(),
        }
    }
}

/// The outcome of one reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub strip_width: u32,
    pub width_confidence: Confidence,
    /// Boundaries the width was derived from, strongest first. Empty when overridden.
    pub boundaries: Vec<u32>,
    pub num_strips: usize,
    pub uncovered_columns: u32,
    /// Escalation rounds the chain resolver ran.
    pub rounds: usize,
    /// Strips left without a right neighbour.
    pub unresolved: Vec<StripId>,
    /// Separate chains the sequencer had to splice.
    pub chains: usize,
    /// Sum of seam distances along `order`.
    pub seam_cost: u64,
    /// Strip column ranges, left to right.
    pub order: Vec<StripSpan>,
}

/// The synchronous, single-threaded reconstruction pipeline.
pub struct UnshredPipeline {
    config: PipelineConfig,
}

impl UnshredPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run<B>(&self, source: &B) -> Result<Report>
    where
        B: PixelSource + ?Sized,
    {
        let control = self.config.scan_control();
        self.run_with_stop(source, &control)
    }

    #[instrument(skip_all)]
    pub fn run_with_stop<B>(&self, source: &B, stop: &dyn Stop) -> Result<Report>
    where
        B: PixelSource + ?Sized,
    {
        // Stage 1: Strip Width
        let estimator = self.config.width_estimator();
        let estimate = estimate_width(estimator.as_ref(), source, stop)?;

        // Stage 2: Partition
        let mut partition = partition_checked(&self.config, source.width(), &estimate)?;

        // Stage 3: Adjacency Ranking
        rank_strips(source, &mut partition.strips, stop)?;

        // Stage 4: Resolution and Sequencing
        finish(source, estimate, partition)
    }
}

/// Partitions `width` columns, applying the coverage policy.
pub(crate) fn partition_checked(
    config: &PipelineConfig,
    width: u32,
    estimate: &WidthEstimate,
) -> Result<Partition> {
    let partition = partition(width, estimate.strip_width)?;
    info!(strip_width = estimate.strip_width, "detected strip width");
    info!(num_strips = partition.strips.len(), "detected number of strips");

    if estimate.confidence == Confidence::Low {
        warn!(
            strip_width = estimate.strip_width,
            boundaries = ?estimate.boundaries,
            "strip width estimate is low confidence"
        );
    }

    if partition.uncovered_columns > 0 {
        if config.coverage == CoveragePolicy::Strict {
            return Err(UnshredError::PartialCoverage {
                uncovered: partition.uncovered_columns,
                width,
                strip_width: estimate.strip_width,
            });
        }
        warn!(
            uncovered = partition.uncovered_columns,
            "trailing columns are not covered by any strip and stay in place"
        );
    }
    Ok(partition)
}

/// Resolves neighbours on ranked strips and builds the report.
pub(crate) fn finish<B>(source: &B, estimate: WidthEstimate, mut partition: Partition) -> Result<Report>
where
    B: PixelSource + ?Sized,
{
    let resolution = resolve(&mut partition.strips);
    let sequence = sequence(&partition.strips);
    let order: Vec<StripSpan> = sequence
        .order
        .iter()
        .map(|&id| partition.strips[id].span())
        .collect();
    let seam_cost = seam_cost(source, &order)?;

    Ok(Report {
        strip_width: estimate.strip_width,
        width_confidence: estimate.confidence,
        boundaries: estimate.boundaries,
        num_strips: partition.strips.len(),
        uncovered_columns: partition.uncovered_columns,
        rounds: resolution.rounds,
        unresolved: resolution.unresolved,
        chains: sequence.chains,
        seam_cost,
        order,
    })
}
