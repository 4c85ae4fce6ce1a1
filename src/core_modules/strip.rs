// THEORY:
// The `Strip` module represents one vertical slice of the shredded image. It is
// the unit every later stage reasons about, and the bridge between raw columns
// and the ordering problem.
//
// Key architectural principles:
// 1.  **Index Addressing**: Strips live in one fixed `Vec`, created in column
//     order. Every reference between strips (`left_candidates`,
//     `right_neighbor`) is a plain index into that vector, so there are no
//     owning cycles and lookups are O(1).
// 2.  **Staged State**: A strip is born with only its column range. The
//     `AdjacencyRanker` fills `left_candidates` exactly once; the
//     `ChainResolver` rewrites `right_neighbor` once per escalation round; the
//     `Sequencer` only reads.
// 3.  **Partitioning**: `partition` slices `[0, num_strips * strip_width)` into
//     contiguous, disjoint ranges. Columns past the last full strip are
//     reported back, never silently dropped.

use crate::core_modules::column_scanner::ColumnDistance;
use crate::error::{Result, UnshredError};

/// Index of a strip within the partition.
pub type StripId = usize;

/// A ranked guess at which strip sits immediately left of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub strip: StripId,
    /// Distance between this strip's left edge and `strip`'s right edge.
    pub score: ColumnDistance,
}

/// The column range of a strip, the shape handed to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StripSpan {
    /// First column, inclusive.
    pub left: u32,
    /// Last column, inclusive.
    pub right: u32,
}

impl StripSpan {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// First column of the strip, inclusive.
    pub left: u32,
    /// Last column of the strip, inclusive.
    pub right: u32,
    /// Every other strip, best left-neighbour match first.
    pub left_candidates: Vec<Candidate>,
    /// The strip believed to follow this one; `None` means provisionally rightmost.
    pub right_neighbor: Option<StripId>,
}

impl Strip {
    pub fn new(left: u32, right: u32) -> Self {
        Self {
            left,
            right,
            left_candidates: Vec::new(),
            right_neighbor: None,
        }
    }

    pub fn span(&self) -> StripSpan {
        StripSpan {
            left: self.left,
            right: self.right,
        }
    }
}

/// The result of slicing an image into equal-width strips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub strip_width: u32,
    pub strips: Vec<Strip>,
    /// Trailing columns (`width mod strip_width`) that belong to no strip.
    pub uncovered_columns: u32,
}

/// Slices an image `width` columns wide into `width / strip_width` strips.
pub fn partition(width: u32, strip_width: u32) -> Result<Partition> {
    if strip_width == 0 || strip_width > width {
        return Err(UnshredError::InvalidStripWidth { strip_width, width });
    }

    let num_strips = width / strip_width;
    let strips = (0..num_strips)
        .map(|i| Strip::new(i * strip_width, (i + 1) * strip_width - 1))
        .collect();

    Ok(Partition {
        strip_width,
        strips,
        uncovered_columns: width % strip_width,
    })
}
