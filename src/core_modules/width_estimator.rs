// THEORY:
// The `WidthEstimator` infers the unknown strip width from the image alone.
//
// Shredding juxtaposes columns that were never neighbours, so every cut shows
// up as a spike in the distance between adjacent columns. The estimator works
// in two steps:
// 1.  **Boundary profile**: scan every adjacent column pair `(x, x + 1)` and
//     record `(boundary = x + 1, diff)`. This is the expensive, parallelisable
//     part and is shared by every estimator.
// 2.  **Estimation**: the GCD heuristic takes the `k + 1` strongest boundaries
//     and returns the greatest common divisor of their indices, on the premise
//     that every cut sits at a multiple of the strip width.
//
// When the strongest set also contains a seam that is not a cut, the GCD
// collapses to 1. The weakest member is then dropped and the GCD retried, down
// to two boundaries. Anything short of the full `k + 1` set is reported as a
// low-confidence estimate rather than an error.

use crate::core_modules::column_scanner::{ColumnDistance, column_distance};
use crate::core_modules::frame::PixelSource;
use crate::error::{Result, UnshredError};
use enough::Stop;
use std::ops::Range;
use tracing::debug;

pub const DEFAULT_BOUNDARY_CANDIDATES: usize = 3;
const MIN_GCD_BOUNDARIES: usize = 2;

/// Distance between column `boundary - 1` and column `boundary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryDiff {
    pub boundary: u32,
    pub diff: ColumnDistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthEstimate {
    pub strip_width: u32,
    /// Boundary indices the estimate was derived from, strongest first.
    pub boundaries: Vec<u32>,
    pub confidence: Confidence,
}

/// Turns a boundary profile into a strip width.
pub trait WidthEstimator: Send + Sync {
    /// Whether `estimate_from_profile` reads the profile at all. Lets callers
    /// skip the scan for estimators that don't.
    fn needs_profile(&self) -> bool {
        true
    }

    fn estimate_from_profile(&self, width: u32, profile: &[BoundaryDiff]) -> Result<WidthEstimate>;
}

/// Scans the boundaries `columns.start + 1 ..= columns.end`.
pub fn scan_boundaries<B>(source: &B, columns: Range<u32>, stop: &dyn Stop) -> Result<Vec<BoundaryDiff>>
where
    B: PixelSource + ?Sized,
{
    let mut profile = Vec::with_capacity(columns.len());
    for x in columns {
        stop.check()?;
        profile.push(BoundaryDiff {
            boundary: x + 1,
            diff: column_distance(source, x, x + 1)?,
        });
    }
    Ok(profile)
}

/// Full boundary profile of `source`, in column order.
pub fn boundary_profile<B>(source: &B, stop: &dyn Stop) -> Result<Vec<BoundaryDiff>>
where
    B: PixelSource + ?Sized,
{
    let width = source.width();
    if width < 2 {
        return Err(UnshredError::InsufficientWidth { width });
    }
    scan_boundaries(source, 0..width - 1, stop)
}

/// Runs `estimator` against `source`, scanning only when it needs a profile.
pub fn estimate_width<B>(
    estimator: &dyn WidthEstimator,
    source: &B,
    stop: &dyn Stop,
) -> Result<WidthEstimate>
where
    B: PixelSource + ?Sized,
{
    let profile = if estimator.needs_profile() {
        boundary_profile(source, stop)?
    } else {
        Vec::new()
    };
    estimator.estimate_from_profile(source.width(), &profile)
}

/// The greatest-common-divisor heuristic.
#[derive(Debug, Clone, Copy)]
pub struct GcdWidthEstimator {
    /// Number of extra boundaries combined with the strongest one (`k`).
    pub boundary_candidates: usize,
}

impl Default for GcdWidthEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY_CANDIDATES)
    }
}

impl GcdWidthEstimator {
    pub fn new(boundary_candidates: usize) -> Self {
        Self {
            boundary_candidates,
        }
    }
}

impl WidthEstimator for GcdWidthEstimator {
    fn estimate_from_profile(&self, width: u32, profile: &[BoundaryDiff]) -> Result<WidthEstimate> {
        if profile.is_empty() {
            return Err(UnshredError::InsufficientWidth { width });
        }

        let mut ranked = profile.to_vec();
        ranked.sort_by_key(|record| record.diff);

        let wanted = self.boundary_candidates + 1;
        let strongest: Vec<u32> = ranked
            .iter()
            .rev()
            .take(wanted)
            .map(|record| record.boundary)
            .collect();

        let mut used = strongest.len();
        let mut strip_width = gcd_all(&strongest[..used]);
        while strip_width == 1 && used > MIN_GCD_BOUNDARIES {
            used -= 1;
            strip_width = gcd_all(&strongest[..used]);
        }

        let confidence = if strip_width > 1 && used == wanted {
            Confidence::High
        } else {
            Confidence::Low
        };
        debug!(
            strip_width,
            used,
            wanted,
            boundaries = ?&strongest[..used],
            "gcd width estimate"
        );

        Ok(WidthEstimate {
            strip_width,
            boundaries: strongest[..used].to_vec(),
            confidence,
        })
    }
}

/// Uses a width supplied by the caller and never scans.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidth(pub u32);

impl WidthEstimator for FixedWidth {
    fn needs_profile(&self) -> bool {
        false
    }

    fn estimate_from_profile(&self, _width: u32, _profile: &[BoundaryDiff]) -> Result<WidthEstimate> {
        Ok(WidthEstimate {
            strip_width: self.0,
            boundaries: Vec::new(),
            confidence: Confidence::High,
        })
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn gcd_all(values: &[u32]) -> u32 {
    values.iter().copied().fold(0, gcd)
}
