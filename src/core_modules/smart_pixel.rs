// THEORY:
// The `SmartPixel` module is the comparative half of the pixel layer. `Pixel` is
// a dumb container; this module quantifies how different two of them are.
//
// The unshredder needs exactly one lens: the L1 distance over all four
// channels. It is cheap, symmetric and integer valued, so column sums built
// on top of it are exact and sort deterministically.

pub mod smart_pixel {
    use crate::core_modules::pixel::pixel::Pixel;

    /// Dissimilarity between two pixels. At most 4 * 255.
    pub type PixelDistance = u32;

    /// Sum of the absolute per-channel differences of `a` and `b`.
    pub fn distance(a: &Pixel, b: &Pixel) -> PixelDistance {
        a.channels()
            .iter()
            .zip(b.channels().iter())
            .map(|(&x, &y)| x.abs_diff(y) as PixelDistance)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::smart_pixel::distance;
    use crate::core_modules::pixel::pixel::Pixel;

    #[test]
    fn identical_pixels_have_zero_distance() {
        let p = Pixel::new(12, 200, 7, 255);
        assert_eq!(distance(&p, &p), 0);
    }

    #[test]
    fn sums_every_channel_including_alpha() {
        let a = Pixel::new(10, 20, 30, 255);
        let b = Pixel::new(15, 10, 30, 0);
        assert_eq!(distance(&a, &b), 5 + 10 + 0 + 255);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn maximum_distance_fits() {
        let black = Pixel::new(0, 0, 0, 0);
        let white = Pixel::new(255, 255, 255, 255);
        assert_eq!(distance(&black, &white), 1020);
    }
}
