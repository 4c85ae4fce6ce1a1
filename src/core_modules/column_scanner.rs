// THEORY:
// The `ColumnScanner` is the cost primitive everything else is built on. It
// walks two full columns of the source top to bottom and sums the pixel
// distances row by row. A low sum means the two columns could sit side by side
// in the original picture; a high sum is a visible seam.
//
// It is a pure function of an immutable buffer, so callers are free to fan
// many scans out across threads.

use crate::core_modules::frame::PixelSource;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::smart_pixel::smart_pixel::distance;
use crate::error::{Result, UnshredError};

/// Aggregate dissimilarity between two whole columns.
pub type ColumnDistance = u64;

/// Sums `distance(pixel(x1, y), pixel(x2, y))` over every row.
pub fn column_distance<B>(source: &B, x1: u32, x2: u32) -> Result<ColumnDistance>
where
    B: PixelSource + ?Sized,
{
    let width = source.width();
    for index in [x1, x2] {
        if index >= width {
            return Err(UnshredError::ColumnOutOfRange { index, width });
        }
    }

    let mut total: ColumnDistance = 0;
    for y in 0..source.height() {
        let a = fetch(source, x1, y)?;
        let b = fetch(source, x2, y)?;
        total += distance(&a, &b) as ColumnDistance;
    }
    Ok(total)
}

fn fetch<B: PixelSource + ?Sized>(source: &B, x: u32, y: u32) -> Result<Pixel> {
    source.pixel_at(x, y).ok_or(UnshredError::RowOutOfRange {
        index: y,
        height: source.height(),
    })
}
