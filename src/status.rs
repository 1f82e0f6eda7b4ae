//! Display status register (0x09) decoding

use crate::color::PixelFormat;

/// Booster voltage status, byte 0
pub const BOOSTER_ON: (usize, u8) = (0, 7);
/// Row address order, byte 0
pub const ROW_ORDER: (usize, u8) = (0, 6);
/// Column address order, byte 0
pub const COLUMN_ORDER: (usize, u8) = (0, 5);
/// Row / column exchange, byte 0
pub const EXCHANGE: (usize, u8) = (0, 4);
/// Vertical refresh order, byte 0
pub const VERTICAL_REFRESH: (usize, u8) = (0, 3);
/// RGB / BGR order, byte 0
pub const BGR: (usize, u8) = (0, 2);
/// Interface pixel format field (3 bits) lowest bit, byte 1
pub const PIXEL_FORMAT_SHIFT: u8 = 4;
/// Idle mode on, byte 1
pub const IDLE_ON: (usize, u8) = (1, 3);
/// Partial mode on, byte 1
pub const PARTIAL_ON: (usize, u8) = (1, 2);
/// Sleep out, byte 1
pub const SLEEP_OUT: (usize, u8) = (1, 1);
/// Normal display mode on, byte 1
pub const NORMAL_ON: (usize, u8) = (1, 0);
/// Inversion on, byte 2
pub const INVERSION_ON: (usize, u8) = (2, 5);
/// Display on, byte 2
pub const DISPLAY_ON: (usize, u8) = (2, 2);
/// Tearing effect line on, byte 2
pub const TEARING_ON: (usize, u8) = (2, 1);
/// Tearing effect line mode, byte 3
pub const TEARING_MODE: (usize, u8) = (3, 5);

/// Decoded display status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayStatus {
    /// Booster voltage on
    pub booster_on: bool,
    /// MY as currently applied
    pub row_order: bool,
    /// MX as currently applied
    pub column_order: bool,
    /// MV as currently applied
    pub exchange: bool,
    /// ML as currently applied
    pub vertical_refresh: bool,
    /// Pixels are sent in BGR order
    pub bgr: bool,
    /// Raw 3-bit interface pixel format
    pub pixel_format_code: u8,
    /// Idle mode on
    pub idle: bool,
    /// Partial mode on
    pub partial: bool,
    /// Out of sleep
    pub sleep_out: bool,
    /// Normal display mode on
    pub normal: bool,
    /// Display inversion on
    pub inverted: bool,
    /// Display on
    pub display_on: bool,
    /// Tearing effect output on
    pub tearing_on: bool,
    /// Tearing effect mode 2 (V- and H-blanking)
    pub tearing_mode: bool,
}

impl DisplayStatus {
    /// Unpack the four status bytes
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let bit = |(byte, n): (usize, u8)| bytes[byte] & (1 << n) != 0;
        Self {
            booster_on: bit(BOOSTER_ON),
            row_order: bit(ROW_ORDER),
            column_order: bit(COLUMN_ORDER),
            exchange: bit(EXCHANGE),
            vertical_refresh: bit(VERTICAL_REFRESH),
            bgr: bit(BGR),
            pixel_format_code: (bytes[1] >> PIXEL_FORMAT_SHIFT) & 0b111,
            idle: bit(IDLE_ON),
            partial: bit(PARTIAL_ON),
            sleep_out: bit(SLEEP_OUT),
            normal: bit(NORMAL_ON),
            inverted: bit(INVERSION_ON),
            display_on: bit(DISPLAY_ON),
            tearing_on: bit(TEARING_ON),
            tearing_mode: bit(TEARING_MODE),
        }
    }

    /// The reported pixel format, if it is a known one
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::from_code(self.pixel_format_code)
    }
}
