#![allow(dead_code)]

use image::{Rgba, RgbaImage};

pub const SCENARIO_STRIP_WIDTH: u32 = 10;
pub const SCENARIO_STRIPS: u32 = 4;

/// Four 10-column strips whose shared edges match exactly. Inside a strip each
/// step changes red and green by 5; across a seam nothing changes.
pub fn scenario_original(height: u32) -> RgbaImage {
    let width = SCENARIO_STRIP_WIDTH * SCENARIO_STRIPS;
    RgbaImage::from_fn(width, height, |x, y| {
        let v = ((x - x / SCENARIO_STRIP_WIDTH) * 5) as u8;
        Rgba([v, 255 - v, v + 3 * y as u8, 255])
    })
}

/// Places original strip `layout[slot]` at `slot`.
pub fn shred(original: &RgbaImage, strip_width: u32, layout: &[u32]) -> RgbaImage {
    let mut shredded = RgbaImage::new(original.width(), original.height());
    for (slot, &strip) in layout.iter().enumerate() {
        for dx in 0..strip_width {
            let src_x = strip * strip_width + dx;
            let dst_x = slot as u32 * strip_width + dx;
            for y in 0..original.height() {
                shredded.put_pixel(dst_x, y, *original.get_pixel(src_x, y));
            }
        }
    }
    shredded
}

/// Grey columns with the given values, `height` rows tall.
pub fn grey_columns(values: &[u8], height: u32) -> RgbaImage {
    RgbaImage::from_fn(values.len() as u32, height, |x, _| {
        let v = values[x as usize];
        Rgba([v, v, v, 255])
    })
}

/// Column positions in order, as `(left, right)` pairs.
pub fn spans(report: &unshredder::Report) -> Vec<(u32, u32)> {
    report.order.iter().map(|span| (span.left, span.right)).collect()
}
