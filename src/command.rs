//! GC9106 command definitions
//!
//! This module defines the opcodes used to control the GC9106 TFT controller.
//! Every opcode is clocked over the parallel bus with DC low; its parameters
//! follow with DC high.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Assert CS (Chip Select, active low)
//! 2. Set DC low (command mode)
//! 3. Put the opcode on D[7..0] and pulse WR
//! 4. Set DC high (data mode)
//! 5. Put each parameter on D[7..0] and pulse WR
//! 6. Deassert CS
//!
//! Register reads replace step 5 with RD pulses, the first of which is a
//! dummy cycle.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gc9106::{command, DisplayInterface};
//! # fn demo<I: DisplayInterface>(interface: &mut I) {
//! // Software reset
//! let _ = interface.write_command(command::SOFTWARE_RESET, &[]);
//!
//! // 16 bits per pixel
//! let _ = interface.write_command(command::PIXEL_FORMAT_SET, &[0b101]);
//! # }
//! ```

// System control commands

/// No operation / read display identification (0x00)
///
/// Read returns 3 bytes: manufacturer, version and module ID.
pub const READ_DISPLAY_ID: u8 = 0x00;

/// Software reset (0x01)
///
/// Wait 5ms before sending the next command.
pub const SOFTWARE_RESET: u8 = 0x01;

/// Read manufacturer programming identification (0x04)
///
/// Read returns 3 bytes.
pub const READ_MANUFACTURER_ID: u8 = 0x04;

/// Read display status (0x09)
///
/// Read returns 4 bytes, see [`crate::status::DisplayStatus`].
pub const READ_DISPLAY_STATUS: u8 = 0x09;

/// Read ID1 (0xDA)
pub const READ_ID1: u8 = 0xDA;

/// Read ID2 (0xDB)
pub const READ_ID2: u8 = 0xDB;

/// Read ID3 (0xDC)
pub const READ_ID3: u8 = 0xDC;

// Power and mode commands

/// Sleep in (0x10)
pub const SLEEP_IN: u8 = 0x10;

/// Sleep out (0x11)
///
/// The panel runs its self-diagnostics afterwards; wait 120ms.
pub const SLEEP_OUT: u8 = 0x11;

/// Partial mode on (0x12)
///
/// Left through [`NORMAL_MODE_ON`].
pub const PARTIAL_MODE_ON: u8 = 0x12;

/// Normal display mode on (0x13)
///
/// Left through [`PARTIAL_MODE_ON`].
pub const NORMAL_MODE_ON: u8 = 0x13;

/// Display inversion off (0x20)
pub const INVERSION_OFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVERSION_ON: u8 = 0x21;

/// Display off (0x28)
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPLAY_ON: u8 = 0x29;

/// Idle mode off (0x38)
pub const IDLE_OFF: u8 = 0x38;

/// Idle mode on (0x39)
///
/// Reduced color set: only the MSB of each channel is shown.
pub const IDLE_ON: u8 = 0x39;

// Memory commands

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Row address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const ROW_ADDRESS_SET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Followed by pixel data for the current address window. Sent without
/// parameters it acts as a NOP.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Partial area (0x30)
///
/// Requires 4 bytes: [start_row_MSB, start_row_LSB, end_row_MSB, end_row_LSB]
pub const PARTIAL_AREA: u8 = 0x30;

/// Memory access control (0x36)
///
/// Requires 1 byte, see [`crate::orientation::MemoryAccess`]. Has no effect
/// while tearing effect output is on.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Interface pixel format set (0x3A)
///
/// Requires 1 byte, see [`crate::color::PixelFormat`].
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

// Manufacturer commands, only accepted after the unlock sequence

/// Frame rate set (0xA3)
///
/// Requires 1 byte, 7 significant bits.
pub const FRAME_RATE_SET: u8 = 0xA3;

/// Gamma register access enable (0xB3)
///
/// Requires 1 byte: 0b11 enables both gamma tables.
pub const GAMMA_ACCESS: u8 = 0xB3;

/// Display inversion control (0xB4)
///
/// Requires 1 byte: bit 5 = color fix value, bits 2..0 = inversion type.
pub const INVERSION_CONTROL: u8 = 0xB4;

/// Positive gamma set (0xF0)
///
/// Requires 15 bytes.
pub const GAMMA_SET_1: u8 = 0xF0;

/// Negative gamma set (0xF1)
///
/// Requires 15 bytes.
pub const GAMMA_SET_2: u8 = 0xF1;

// Unlock sequence

/// Internal register enable, first step (0xFE)
pub const INTER_REGISTER_ENABLE_1: u8 = 0xFE;

/// Internal register enable, second step (0xEF)
pub const INTER_REGISTER_ENABLE_2: u8 = 0xEF;

/// Clock read enable (0xB6)
///
/// Last step of the unlock sequence, sent with [`CLOCK_READ_ENABLE_VALUE`].
pub const CLOCK_READ_ENABLE: u8 = 0xB6;

/// Parameter for [`CLOCK_READ_ENABLE`]
pub const CLOCK_READ_ENABLE_VALUE: u8 = 0b111;

/// Unlock sequence as (opcode, parameters) pairs, in transmission order
pub const UNLOCK_SEQUENCE: [(u8, &[u8]); 3] = [
    (INTER_REGISTER_ENABLE_1, &[]),
    (INTER_REGISTER_ENABLE_2, &[]),
    (CLOCK_READ_ENABLE, &[CLOCK_READ_ENABLE_VALUE]),
];

/// Whether `opcode` is one of the manufacturer commands that need the unlock sequence
pub fn is_privileged(opcode: u8) -> bool {
    matches!(
        opcode,
        FRAME_RATE_SET | GAMMA_ACCESS | INVERSION_CONTROL | GAMMA_SET_1 | GAMMA_SET_2
    )
}
