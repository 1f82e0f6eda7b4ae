//! Pixel formats and color encoding
//!
//! This module defines the interface pixel formats of the GC9106 and the
//! [`ColorEncoder`] bound to the active format.
//!
//! ## Color Representation
//!
//! Only the 16-bit format has an encoder. The panel shows every channel
//! inverted, so the encoder inverts before packing:
//!
//! | Step   | Red           | Green         | Blue          |
//! |--------|---------------|---------------|---------------|
//! | invert | `0xFF - r`    | `0xFF - g`    | `0xFF - b`    |
//! | mask   | `& 0xF8`      | `& 0xFC`      | `& 0xF8`      |
//! | pack   | `<< 8`        | `<< 3`        | `>> 3`        |
//!
//! ## Example
//!
//! ```
//! use gc9106::{encode_rgb565, PixelFormat};
//!
//! // Black on the wire is all ones
//! assert_eq!(encode_rgb565(0x00, 0x00, 0x00), 0xFFFF);
//! assert_eq!(encode_rgb565(0xFF, 0xFF, 0xFF), 0x0000);
//!
//! let encoder = PixelFormat::Rgb565.encoder();
//! assert!(encoder.is_some());
//! assert!(PixelFormat::Rgb666.encoder().is_none());
//! ```

/// Interface pixel formats of the GC9106
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 12 bits per pixel, 4k colors
    Rgb444,
    /// 16 bits per pixel, 65k colors
    #[default]
    Rgb565,
    /// 18 bits per pixel, 262k colors
    Rgb666,
}

impl PixelFormat {
    /// Register value for [`PIXEL_FORMAT_SET`](crate::command::PIXEL_FORMAT_SET)
    pub fn code(self) -> u8 {
        match self {
            Self::Rgb444 => 0b001,
            Self::Rgb565 => 0b101,
            Self::Rgb666 => 0b110,
        }
    }

    /// Format for a register value as reported by the status read
    pub fn from_code(code: u8) -> Option<Self> {
        match code & 0b111 {
            0b001 => Some(Self::Rgb444),
            0b101 => Some(Self::Rgb565),
            0b110 => Some(Self::Rgb666),
            _ => None,
        }
    }

    /// Encoder for this format, if implemented
    pub fn encoder(self) -> Option<ColorEncoder> {
        match self {
            Self::Rgb565 => Some(ColorEncoder {
                format: self,
                encode: encode_rgb565,
                bytes_per_pixel: 2,
            }),
            Self::Rgb444 | Self::Rgb666 => None,
        }
    }
}

/// Color conversion bound to a [`PixelFormat`]
///
/// Converts 8-bit red/green/blue channels into the wire value and knows
/// how many bytes one pixel takes on the bus.
#[derive(Clone, Copy, Debug)]
pub struct ColorEncoder {
    format: PixelFormat,
    encode: fn(u8, u8, u8) -> u16,
    bytes_per_pixel: usize,
}

impl ColorEncoder {
    /// Encode an 8-bit-per-channel color
    pub fn encode(&self, red: u8, green: u8, blue: u8) -> u16 {
        (self.encode)(red, green, blue)
    }

    /// Bytes per pixel on the bus
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// The format this encoder belongs to
    pub fn format(&self) -> PixelFormat {
        self.format
    }
}

impl PartialEq for ColorEncoder {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format && self.bytes_per_pixel == other.bytes_per_pixel
    }
}

impl Eq for ColorEncoder {}

impl Default for ColorEncoder {
    fn default() -> Self {
        ColorEncoder {
            format: PixelFormat::Rgb565,
            encode: encode_rgb565,
            bytes_per_pixel: 2,
        }
    }
}

/// Encode a color for the 16-bit interface format
///
/// Bit exact with content produced by the image conversion tools: every
/// channel is inverted, reduced to 5/6/5 bits and packed big end first.
pub fn encode_rgb565(red: u8, green: u8, blue: u8) -> u16 {
    let red = u16::from(!red & 0xF8);
    let green = u16::from(!green & 0xFC);
    let blue = u16::from(!blue & 0xF8);
    red << 8 | green << 3 | blue >> 3
}

#[cfg(feature = "graphics")]
mod graphics_color {
    use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};

    use super::ColorEncoder;

    impl ColorEncoder {
        /// Encode an embedded-graphics color
        ///
        /// The 5/6/5 channels are widened to 8 bits first, so the result
        /// matches what a decoded image with the same color produces.
        pub fn encode_rgb(&self, color: Rgb565) -> u16 {
            let red = color.r() << 3 | color.r() >> 2;
            let green = color.g() << 2 | color.g() >> 4;
            let blue = color.b() << 3 | color.b() >> 2;
            self.encode(red, green, blue)
        }
    }
}
