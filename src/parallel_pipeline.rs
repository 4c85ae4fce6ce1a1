// THEORY:
// The `parallel_pipeline` runs the same reconstruction as `pipeline`, but fans
// the two expensive scan stages out across a pool of blocking workers:
// 1.  **Boundary Profile**: the adjacent column pairs are split into one
//     contiguous range per worker.
// 2.  **Adjacency Ranking**: the strips are split the same way; each worker
//     ranks its strips against all others.
//
// Workers share the decoded image and the `ScanControl` through `Arc`s and
// only read from them, except that the first worker to fail cancels the
// control so the rest stop at their next check. Their results are joined in range order, so the profile
// and the rankings are identical to the single-threaded ones and the final
// order matches `UnshredPipeline` exactly. Resolution and sequencing are cheap
// and stay on the calling task.

use crate::core_modules::adjacency_ranker::{assign, rank_range};
use crate::core_modules::frame::PixelSource;
use crate::core_modules::scan_control::ScanControl;
use crate::core_modules::strip::{Candidate, Strip, StripSpan};
use crate::core_modules::width_estimator::{BoundaryDiff, scan_boundaries};
use crate::error::{Result, UnshredError};
use crate::pipeline::{PipelineConfig, Report, finish, partition_checked};
use futures::future::try_join_all;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct ParallelPipeline {
    config: PipelineConfig,
    workers: usize,
}

impl ParallelPipeline {
    /// One worker per logical CPU.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_workers(config, num_cpus::get())
    }

    pub fn with_workers(config: PipelineConfig, workers: usize) -> Self {
        Self {
            config,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run<B>(&self, source: Arc<B>) -> Result<Report>
    where
        B: PixelSource + Send + Sync + 'static,
    {
        let control = Arc::new(self.config.scan_control());
        self.run_with_control(source, control).await
    }

    /// Runs with a caller-owned control, so the scan can be cancelled from elsewhere.
    #[instrument(skip_all, fields(workers = self.workers))]
    pub async fn run_with_control<B>(&self, source: Arc<B>, control: Arc<ScanControl>) -> Result<Report>
    where
        B: PixelSource + Send + Sync + 'static,
    {
        let estimator = self.config.width_estimator();
        let profile = if estimator.needs_profile() {
            self.boundary_profile(&source, &control).await?
        } else {
            Vec::new()
        };
        let estimate = estimator.estimate_from_profile(source.width(), &profile)?;

        let mut partition = partition_checked(&self.config, source.width(), &estimate)?;
        let rankings = self.rank(&source, &partition.strips, &control).await?;
        assign(&mut partition.strips, rankings);

        finish(&*source, estimate, partition)
    }

    async fn boundary_profile<B>(&self, source: &Arc<B>, control: &Arc<ScanControl>) -> Result<Vec<BoundaryDiff>>
    where
        B: PixelSource + Send + Sync + 'static,
    {
        let width = source.width();
        if width < 2 {
            return Err(UnshredError::InsufficientWidth { width });
        }

        let ranges = split(0..(width - 1) as usize, self.workers);
        debug!(pairs = width - 1, ranges = ranges.len(), "scanning boundaries");
        let tasks = ranges.into_iter().map(|range| {
            let source = Arc::clone(source);
            let control = Arc::clone(control);
            let columns = range.start as u32..range.end as u32;
            tokio::task::spawn_blocking(move || {
                cancel_on_error(&control, scan_boundaries(&*source, columns, &*control))
            })
        });

        let parts = try_join_all(tasks)
            .await
            .map_err(|err| UnshredError::Worker(err.to_string()))?;
        let mut profile = Vec::with_capacity((width - 1) as usize);
        for part in parts {
            profile.extend(part?);
        }
        Ok(profile)
    }

    async fn rank<B>(&self, source: &Arc<B>, strips: &[Strip], control: &Arc<ScanControl>) -> Result<Vec<Vec<Candidate>>>
    where
        B: PixelSource + Send + Sync + 'static,
    {
        let spans: Arc<Vec<StripSpan>> = Arc::new(strips.iter().map(Strip::span).collect());
        let ranges = split(0..spans.len(), self.workers);
        debug!(strips = spans.len(), ranges = ranges.len(), "ranking strips");
        let tasks = ranges.into_iter().map(|range| {
            let source = Arc::clone(source);
            let spans = Arc::clone(&spans);
            let control = Arc::clone(control);
            tokio::task::spawn_blocking(move || {
                cancel_on_error(&control, rank_range(&*source, &spans, range, &*control))
            })
        });

        let parts = try_join_all(tasks)
            .await
            .map_err(|err| UnshredError::Worker(err.to_string()))?;
        let mut rankings = Vec::with_capacity(spans.len());
        for part in parts {
            rankings.extend(part?);
        }
        Ok(rankings)
    }
}

fn cancel_on_error<T>(control: &ScanControl, result: Result<T>) -> Result<T> {
    if result.is_err() {
        control.cancel();
    }
    result
}

/// Splits `range` into at most `parts` contiguous, non-empty, ordered ranges.
fn split(range: Range<usize>, parts: usize) -> Vec<Range<usize>> {
    let len = range.len();
    if len == 0 {
        return Vec::new();
    }
    let step = len.div_ceil(parts.max(1));
    (range.start..range.end)
        .step_by(step)
        .map(|start| start..(start + step).min(range.end))
        .collect()
}
