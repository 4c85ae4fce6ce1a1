// THEORY:
// The `Pixel` module is the most fundamental unit of the unshredder. It is a
// "dumb" data container for a single RGBA sample read out of the shredded image.
// It knows nothing about columns, strips or neighbours; comparing two pixels is
// the job of `smart_pixel`.
//
// All four channels share the 8-bit domain of the decoded source buffer. Sixteen
// bit inputs are reduced to 8 bits at decode time, so every distance computed
// downstream lives in one comparable range.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;

    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (opacity) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        pub fn channels(&self) -> [Channel; CHANNELS] {
            [self.red, self.green, self.blue, self.alpha]
        }
    }

    impl From<[Byte; CHANNELS]> for Pixel {
        fn from(bytes: [Byte; CHANNELS]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }
}
