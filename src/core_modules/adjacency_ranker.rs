// THEORY:
// The `AdjacencyRanker` turns raw column distances into per-strip preference
// lists. For a strip `S` and every other strip `O` it measures
// `column_distance(S.left, O.right)`: how well `O`'s right edge runs into `S`'s
// left edge. Sorted ascending, that list is `S.left_candidates`, and rank 0 is
// the strip most likely to sit immediately left of `S`.
//
// Ranking a strip only reads the immutable buffer and the fixed column ranges,
// so `rank_strips` can be split across workers with `rank_range` and the
// results stitched back in strip order.

use crate::core_modules::column_scanner::column_distance;
use crate::core_modules::frame::PixelSource;
use crate::core_modules::strip::{Candidate, Strip, StripId, StripSpan};
use crate::error::{Result, UnshredError};
use enough::Stop;
use std::ops::Range;

/// Left-neighbour candidates of `target`, best first.
pub fn rank_strip<B>(source: &B, spans: &[StripSpan], target: StripId, stop: &dyn Stop) -> Result<Vec<Candidate>>
where
    B: PixelSource + ?Sized,
{
    let left_edge = spans
        .get(target)
        .ok_or(UnshredError::StripOutOfRange {
            index: target,
            strips: spans.len(),
        })?
        .left;
    let mut candidates = Vec::with_capacity(spans.len().saturating_sub(1));
    for (other, span) in spans.iter().enumerate() {
        if other == target {
            continue;
        }
        stop.check()?;
        candidates.push(Candidate {
            strip: other,
            score: column_distance(source, left_edge, span.right)?,
        });
    }
    // Stable, so equal scores stay in strip order.
    candidates.sort_by_key(|candidate| candidate.score);
    Ok(candidates)
}

/// Candidate lists for the strips in `targets`, in order.
pub fn rank_range<B>(
    source: &B,
    spans: &[StripSpan],
    targets: Range<StripId>,
    stop: &dyn Stop,
) -> Result<Vec<Vec<Candidate>>>
where
    B: PixelSource + ?Sized,
{
    targets
        .map(|target| rank_strip(source, spans, target, stop))
        .collect()
}

/// Fills `left_candidates` for every strip.
pub fn rank_strips<B>(source: &B, strips: &mut [Strip], stop: &dyn Stop) -> Result<()>
where
    B: PixelSource + ?Sized,
{
    let spans: Vec<StripSpan> = strips.iter().map(Strip::span).collect();
    let rankings = rank_range(source, &spans, 0..spans.len(), stop)?;
    assign(strips, rankings);
    Ok(())
}

/// Stores precomputed rankings, one list per strip in strip order.
pub fn assign(strips: &mut [Strip], rankings: Vec<Vec<Candidate>>) {
    for (strip, candidates) in strips.iter_mut().zip(rankings) {
        strip.left_candidates = candidates;
    }
}
