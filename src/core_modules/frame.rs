// THEORY:
// The `frame` module defines the single capability the reconstruction core
// consumes from the outside world: a read-only grid of RGBA pixels with a known
// width and height. Decoding files, parsing arguments and writing results all
// happen elsewhere; the core only ever calls `PixelSource`.
//
// Two sources ship with the crate:
// - `Frame`, a borrowed, tightly packed RGBA byte buffer (the same layout the
//   capture side hands around as a raw frame), and
// - `image::RgbaImage`, which is what the binary decodes files into.

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::{Result, UnshredError};

/// Read-only access to the pixels of the shredded image.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Returns `None` when `(x, y)` lies outside the buffer.
    fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel>;
}

/// A borrowed RGBA8 buffer with rows packed back to back.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(UnshredError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl PixelSource for Frame<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte_index = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let bytes = self.data.get(byte_index..byte_index + CHANNELS)?;
        Some(Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
    }
}

impl PixelSource for image::RgbaImage {
    fn width(&self) -> u32 {
        image::ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        image::ImageBuffer::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        self.get_pixel_checked(x, y).map(|rgba| Pixel::from(rgba.0))
    }
}
