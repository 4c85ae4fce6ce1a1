// THEORY:
// The `compositor` turns an ordered list of strip spans back into a picture.
// The i-th span is copied, column for column, to `[i * strip_width,
// (i + 1) * strip_width)` of a destination the same size as the source.
//
// Columns past the last full strip were never part of the ordering problem.
// They are copied to the same trailing position so the output has no blank
// band on the right.

use crate::core_modules::column_scanner::column_distance;
use crate::core_modules::frame::PixelSource;
use crate::core_modules::strip::StripSpan;
use crate::error::{Result, UnshredError};
use image::{Rgba, RgbaImage};

/// Builds the unshredded image from `order`.
pub fn compose<B>(source: &B, order: &[StripSpan]) -> Result<RgbaImage>
where
    B: PixelSource + ?Sized,
{
    let width = source.width();
    let height = source.height();
    let mut output = RgbaImage::new(width, height);

    let mut dst_x = 0;
    for span in order {
        for src_x in span.left..=span.right {
            copy_column(source, &mut output, src_x, dst_x)?;
            dst_x += 1;
        }
    }
    // Trailing columns no strip covered.
    for x in dst_x..width {
        copy_column(source, &mut output, x, x)?;
    }
    Ok(output)
}

/// Sum of seam distances across every joint of `order`; lower is smoother.
pub fn seam_cost<B>(source: &B, order: &[StripSpan]) -> Result<u64>
where
    B: PixelSource + ?Sized,
{
    let mut total = 0;
    for pair in order.windows(2) {
        total += column_distance(source, pair[0].right, pair[1].left)?;
    }
    Ok(total)
}

fn copy_column<B>(source: &B, output: &mut RgbaImage, src_x: u32, dst_x: u32) -> Result<()>
where
    B: PixelSource + ?Sized,
{
    if dst_x >= output.width() {
        return Err(UnshredError::ColumnOutOfRange {
            index: dst_x,
            width: output.width(),
        });
    }
    for y in 0..source.height() {
        let pixel = source.pixel_at(src_x, y).ok_or(UnshredError::ColumnOutOfRange {
            index: src_x,
            width: source.width(),
        })?;
        output.put_pixel(dst_x, y, Rgba(pixel.channels()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(values: &[u8]) -> RgbaImage {
        let mut img = RgbaImage::new(values.len() as u32, 2);
        for (x, &v) in values.iter().enumerate() {
            for y in 0..2 {
                img.put_pixel(x as u32, y, Rgba([v, v, v, 255]));
            }
        }
        img
    }

    fn first_row(img: &RgbaImage) -> Vec<u8> {
        (0..img.width()).map(|x| img.get_pixel(x, 0)[0]).collect()
    }

    #[test]
    fn copies_spans_in_order() {
        let img = columns(&[3, 4, 1, 2]);
        let order = [
            StripSpan { left: 2, right: 3 },
            StripSpan { left: 0, right: 1 },
        ];
        let output = compose(&img, &order).expect("compose");
        assert_eq!(first_row(&output), vec![1, 2, 3, 4]);
    }

    #[test]
    fn keeps_trailing_columns_in_place() {
        let img = columns(&[3, 4, 1, 2, 9]);
        let order = [
            StripSpan { left: 2, right: 3 },
            StripSpan { left: 0, right: 1 },
        ];
        let output = compose(&img, &order).expect("compose");
        assert_eq!(first_row(&output), vec![1, 2, 3, 4, 9]);
    }

    #[test]
    fn seam_cost_prefers_the_true_order() {
        let img = columns(&[30, 40, 10, 20]);
        let right = [
            StripSpan { left: 2, right: 3 },
            StripSpan { left: 0, right: 1 },
        ];
        let wrong = [
            StripSpan { left: 0, right: 1 },
            StripSpan { left: 2, right: 3 },
        ];
        let good = seam_cost(&img, &right).expect("cost");
        let bad = seam_cost(&img, &wrong).expect("cost");
        assert!(good < bad);
        assert_eq!(seam_cost(&img, &right[..1]).expect("cost"), 0);
    }

    #[test]
    fn too_many_columns_is_an_error() {
        let img = columns(&[1, 2]);
        let order = [
            StripSpan { left: 0, right: 1 },
            StripSpan { left: 0, right: 1 },
        ];
        assert!(compose(&img, &order).is_err());
    }
}
