//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::color::{ColorEncoder, PixelFormat};
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_OFF, DISPLAY_ON, FRAME_RATE_SET, GAMMA_ACCESS, GAMMA_SET_1,
    GAMMA_SET_2, IDLE_OFF, IDLE_ON, INVERSION_CONTROL, INVERSION_OFF, INVERSION_ON,
    MEMORY_ACCESS_CONTROL, MEMORY_WRITE, NORMAL_MODE_ON, PARTIAL_AREA, PARTIAL_MODE_ON,
    PIXEL_FORMAT_SET, READ_DISPLAY_ID, READ_DISPLAY_STATUS, READ_ID1, READ_ID2, READ_ID3,
    READ_MANUFACTURER_ID, ROW_ADDRESS_SET, SLEEP_IN, SLEEP_OUT, UNLOCK_SEQUENCE, is_privileged,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::orientation::{MemoryAccess, Orientation};
use crate::status::DisplayStatus;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Wait after sleep in/out before the next command
pub const SLEEP_SETTLE_MS: u32 = 120;

/// Largest frame rate register value
pub const MAX_FRAME_RATE: u8 = 0x7F;

/// Largest display inversion type (4-dot)
pub const MAX_INVERSION_MODE: u8 = 4;

/// Gray levels adjusted by a gamma curve, in register order
pub const GAMMA_LEVELS: [u8; 16] = [0, 1, 2, 4, 6, 13, 20, 27, 36, 43, 50, 57, 59, 61, 62, 63];

/// Register field width in bits for each entry of [`GAMMA_LEVELS`]
pub const GAMMA_FIELD_WIDTHS: [u8; 16] = [4, 6, 6, 4, 5, 4, 7, 4, 4, 7, 4, 5, 4, 6, 6, 4];

const GAMMA_NAMES: [&str; 16] = [
    "gamma V0", "gamma V1", "gamma V2", "gamma V4", "gamma V6", "gamma V13", "gamma V20",
    "gamma V27", "gamma V36", "gamma V43", "gamma V50", "gamma V57", "gamma V59", "gamma V61",
    "gamma V62", "gamma V63",
];

/// Value for [`GAMMA_ACCESS`] enabling both gamma tables
const GAMMA_ACCESS_ENABLE: u8 = 0b11;

/// Driver lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing sent yet
    #[default]
    Uninitialized,
    /// Reset done, registers at power-on defaults
    Reset,
    /// Initialization sequence completed
    Configured,
}

/// Address window axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Column address set (0x2A)
    Column,
    /// Row address set (0x2B)
    Row,
}

/// Frame memory region targeted by memory writes, inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    /// First column
    pub start_column: u16,
    /// Last column
    pub end_column: u16,
    /// First row
    pub start_row: u16,
    /// Last row
    pub end_row: u16,
}

/// Controller registers as last written by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerState {
    /// Lifecycle phase
    pub phase: Phase,
    /// Interface pixel format
    pub format: PixelFormat,
    /// Encoder bound to `format`
    pub encoder: ColorEncoder,
    /// Memory access control register
    pub memory_access: MemoryAccess,
    /// Current address window
    pub window: AddressWindow,
    /// Sleep mode on
    pub sleeping: bool,
    /// Idle mode on
    pub idle: bool,
    /// Display output on
    pub display_on: bool,
    /// Display inversion on
    pub inverted: bool,
    /// Partial mode on
    pub partial: bool,
    /// Manufacturer commands unlocked in this power cycle
    pub unlocked: bool,
}

impl ControllerState {
    fn power_on(dimensions: Dimensions, phase: Phase) -> Self {
        Self {
            phase,
            format: PixelFormat::Rgb565,
            encoder: ColorEncoder::default(),
            memory_access: MemoryAccess::default(),
            window: AddressWindow {
                start_column: 0,
                end_column: dimensions.width - 1,
                start_row: 0,
                end_row: dimensions.height - 1,
            },
            sleeping: true,
            idle: false,
            display_on: false,
            inverted: false,
            partial: false,
            unlocked: false,
        }
    }
}

/// Gray scale voltages for both gamma tables
///
/// Each curve holds one coefficient per entry of [`GAMMA_LEVELS`]. A
/// coefficient must fit the width given in [`GAMMA_FIELD_WIDTHS`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GammaCurve {
    /// Positive polarity coefficients (0xF0)
    pub positive: [u8; 16],
    /// Negative polarity coefficients (0xF1)
    pub negative: [u8; 16],
}

impl GammaCurve {
    /// Register payload for one polarity
    ///
    /// V27 and V36 share a byte, V36 in the high nibble.
    fn pack(levels: &[u8; 16]) -> Result<[u8; 15], (&'static str, u8)> {
        for (i, (&value, &width)) in levels.iter().zip(GAMMA_FIELD_WIDTHS.iter()).enumerate() {
            if u16::from(value) >> width != 0 {
                return Err((GAMMA_NAMES[i], value));
            }
        }
        let mut payload = [0u8; 15];
        payload[..7].copy_from_slice(&levels[..7]);
        payload[7] = levels[8] << 4 | levels[7];
        payload[8..].copy_from_slice(&levels[9..]);
        Ok(payload)
    }
}

/// Identification registers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identification {
    /// Manufacturer, version and module ID (0x00)
    pub display_id: [u8; 3],
    /// Manufacturer programming ID (0x04)
    pub manufacturer_id: [u8; 3],
    /// ID1 (0xDA)
    pub id1: u8,
    /// ID2 (0xDB)
    pub id2: u8,
    /// ID3 (0xDC)
    pub id3: u8,
}

/// Core display driver for GC9106
///
/// This struct provides the controller commands and tracks the register
/// state it has written. For buffered drawing, use
/// [`Framebuffer`](crate::framebuffer::Framebuffer).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Registers as last written
    state: ControllerState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`initialize`](Self::initialize) or
    /// [`reset`](Self::reset) is called.
    pub fn new(interface: I, config: Config) -> Self {
        let state = ControllerState::power_on(config.dimensions, Phase::Uninitialized);
        Self {
            interface,
            config,
            state,
        }
    }

    /// Hardware reset followed by the full initialization sequence
    ///
    /// RGB565, normal mode, full window, default memory access, the
    /// configured frame rate, idle off, sleep out and display on.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!("initializing gc9106");
        self.reset(true, false, delay)?;

        self.set_pixel_format(PixelFormat::Rgb565)?;
        self.normal_mode_on()?;
        self.set_address_window(Axis::Column, 0, None)?;
        self.set_address_window(Axis::Row, 0, None)?;
        self.set_memory_access(MemoryAccess::default())?;
        self.set_frame_rate(self.config.frame_rate)?;
        self.set_idle(false)?;
        self.set_sleep(false, delay)?;
        self.set_display(true)?;

        self.state.phase = Phase::Configured;
        debug!("init sequence complete");
        Ok(())
    }

    /// Reset the controller
    ///
    /// The cached state returns to power-on defaults and the manufacturer
    /// commands have to be unlocked again.
    pub fn reset<D: DelayNs>(
        &mut self,
        hardware: bool,
        software: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        if !hardware && !software {
            return Ok(());
        }
        debug!("resetting gc9106 (hardware={hardware}, software={software})");
        self.interface
            .reset(hardware, software, delay)
            .map_err(Error::Interface)?;
        self.state = ControllerState::power_on(self.config.dimensions, Phase::Reset);
        Ok(())
    }

    /// Set the interface pixel format
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedFormat` for formats without a color encoder.
    pub fn set_pixel_format(&mut self, format: PixelFormat) -> DisplayResult<I> {
        let encoder = format.encoder().ok_or(Error::UnsupportedFormat(format))?;
        self.command(PIXEL_FORMAT_SET, &[format.code()])?;
        self.state.format = format;
        self.state.encoder = encoder;
        Ok(())
    }

    /// Set one axis of the address window
    ///
    /// `end == None` selects the last address for the current orientation.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAddressWindow` if `start >= end`.
    pub fn set_address_window(
        &mut self,
        axis: Axis,
        start: u16,
        end: Option<u16>,
    ) -> DisplayResult<I> {
        let exchanged = self.state.memory_access.exchange;
        let (opcode, end) = match axis {
            Axis::Column => (
                COLUMN_ADDRESS_SET,
                end.unwrap_or_else(|| self.config.max_column(exchanged)),
            ),
            Axis::Row => (
                ROW_ADDRESS_SET,
                end.unwrap_or_else(|| self.config.max_row(exchanged)),
            ),
        };
        if start >= end {
            return Err(Error::InvalidAddressWindow { start, end });
        }

        let [start_hi, start_lo] = start.to_be_bytes();
        let [end_hi, end_lo] = end.to_be_bytes();
        self.command(opcode, &[start_hi, start_lo, end_hi, end_lo])?;

        let window = &mut self.state.window;
        match axis {
            Axis::Column => {
                window.start_column = start;
                window.end_column = end;
            }
            Axis::Row => {
                window.start_row = start;
                window.end_row = end;
            }
        }
        Ok(())
    }

    /// Set the frame memory write direction
    ///
    /// The vertical refresh order and color order currently applied are
    /// read back from the controller and kept. Unless `reset_window` is
    /// false, both window axes are reset to the full extent of the new
    /// orientation.
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
        horizontal_refresh: bool,
        reset_window: bool,
    ) -> DisplayResult<I> {
        debug!("setting orientation {}", orientation.name());
        let status = self.read_status()?;
        let access = MemoryAccess {
            vertical_refresh: status.vertical_refresh,
            bgr: status.bgr,
            horizontal_refresh,
            ..MemoryAccess::from(orientation)
        };
        self.set_memory_access(access)?;
        if reset_window {
            self.set_address_window(Axis::Column, 0, None)?;
            self.set_address_window(Axis::Row, 0, None)?;
        }
        Ok(())
    }

    /// [`set_orientation`](Self::set_orientation) by datasheet name
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownOrientation` if `name` is not one of the
    /// names listed by [`Orientation::name`].
    pub fn set_orientation_by_name(
        &mut self,
        name: &str,
        horizontal_refresh: bool,
        reset_window: bool,
    ) -> DisplayResult<I> {
        let orientation = Orientation::from_name(name).ok_or(Error::UnknownOrientation)?;
        self.set_orientation(orientation, horizontal_refresh, reset_window)
    }

    /// Write the memory access control register as given
    pub fn set_memory_access(&mut self, access: MemoryAccess) -> DisplayResult<I> {
        self.command(MEMORY_ACCESS_CONTROL, &[access.to_byte()])?;
        self.state.memory_access = access;
        Ok(())
    }

    /// Set the raw frame rate register
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `value` exceeds [`MAX_FRAME_RATE`].
    pub fn set_frame_rate(&mut self, value: u8) -> DisplayResult<I> {
        if value > MAX_FRAME_RATE {
            return Err(Error::InvalidParameter {
                name: "frame rate",
                value: value.into(),
            });
        }
        self.command(FRAME_RATE_SET, &[value])
    }

    /// Load both gamma tables
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if a coefficient does not fit its
    /// register field. Nothing is sent in that case.
    pub fn set_gamma_curve(&mut self, curve: &GammaCurve) -> DisplayResult<I> {
        let invalid = |(name, value): (&'static str, u8)| -> Error<I> {
            Error::InvalidParameter {
                name,
                value: value.into(),
            }
        };
        let positive = GammaCurve::pack(&curve.positive).map_err(invalid)?;
        let negative = GammaCurve::pack(&curve.negative).map_err(invalid)?;

        self.command(GAMMA_ACCESS, &[GAMMA_ACCESS_ENABLE])?;
        self.command(GAMMA_SET_1, &positive)?;
        self.command(GAMMA_SET_2, &negative)
    }

    /// Set the display inversion type
    ///
    /// `mode` 0 is column inversion, 1 to 4 are 1-dot to 4-dot inversion.
    /// `color_fix` selects the fixed high value for the compensation.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `mode` exceeds [`MAX_INVERSION_MODE`].
    pub fn set_inversion_control(&mut self, mode: u8, color_fix: bool) -> DisplayResult<I> {
        if mode > MAX_INVERSION_MODE {
            return Err(Error::InvalidParameter {
                name: "inversion mode",
                value: mode.into(),
            });
        }
        self.command(INVERSION_CONTROL, &[u8::from(color_fix) << 5 | mode])
    }

    /// Enable the manufacturer commands
    ///
    /// Sent once per power cycle unless `force` is set. Frame rate, gamma
    /// and inversion control call this on their own.
    pub fn unlock(&mut self, force: bool) -> DisplayResult<I> {
        if self.state.unlocked && !force {
            return Ok(());
        }
        trace!("unlocking manufacturer commands");
        for (opcode, parameters) in UNLOCK_SEQUENCE {
            self.send(opcode, parameters)?;
        }
        self.state.unlocked = true;
        Ok(())
    }

    /// Read and decode the display status
    pub fn read_status(&mut self) -> Result<DisplayStatus, Error<I>> {
        let mut bytes = [0u8; 4];
        self.read(READ_DISPLAY_STATUS, &mut bytes)?;
        let status = DisplayStatus::from_bytes(bytes);
        self.state.memory_access.exchange = status.exchange;
        Ok(status)
    }

    /// Write encoded pixels into the current address window
    ///
    /// # Errors
    ///
    /// Returns `Error::MisalignedPayload` unless `bytes` holds a whole
    /// number of pixels for the active format.
    pub fn write_pixels(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        let bytes_per_pixel = self.state.encoder.bytes_per_pixel();
        if bytes.len() % bytes_per_pixel != 0 {
            return Err(Error::MisalignedPayload {
                len: bytes.len(),
                bytes_per_pixel,
            });
        }
        self.command(MEMORY_WRITE, bytes)
    }

    /// Enter or leave sleep mode
    ///
    /// Waits [`SLEEP_SETTLE_MS`] afterwards in both directions.
    pub fn set_sleep<D: DelayNs>(&mut self, sleep: bool, delay: &mut D) -> DisplayResult<I> {
        debug!("sleep {}", if sleep { "in" } else { "out" });
        self.command(if sleep { SLEEP_IN } else { SLEEP_OUT }, &[])?;
        delay.delay_ms(SLEEP_SETTLE_MS);
        self.state.sleeping = sleep;
        Ok(())
    }

    /// Turn the display output on or off
    pub fn set_display(&mut self, on: bool) -> DisplayResult<I> {
        self.command(if on { DISPLAY_ON } else { DISPLAY_OFF }, &[])?;
        self.state.display_on = on;
        Ok(())
    }

    /// Enter or leave idle (8 color) mode
    pub fn set_idle(&mut self, on: bool) -> DisplayResult<I> {
        self.command(if on { IDLE_ON } else { IDLE_OFF }, &[])?;
        self.state.idle = on;
        Ok(())
    }

    /// Turn display inversion on or off
    pub fn set_inversion(&mut self, on: bool) -> DisplayResult<I> {
        self.command(if on { INVERSION_ON } else { INVERSION_OFF }, &[])?;
        self.state.inverted = on;
        Ok(())
    }

    /// Leave partial mode
    pub fn normal_mode_on(&mut self) -> DisplayResult<I> {
        self.command(NORMAL_MODE_ON, &[])?;
        self.state.partial = false;
        Ok(())
    }

    /// Enter partial mode, see [`set_partial_area`](Self::set_partial_area)
    pub fn partial_mode_on(&mut self) -> DisplayResult<I> {
        self.command(PARTIAL_MODE_ON, &[])?;
        self.state.partial = true;
        Ok(())
    }

    /// Select the rows shown in partial mode
    ///
    /// `start_row == end_row` selects a single row.
    pub fn set_partial_area(&mut self, start_row: u16, end_row: u16) -> DisplayResult<I> {
        let [start_hi, start_lo] = start_row.to_be_bytes();
        let [end_hi, end_lo] = end_row.to_be_bytes();
        self.command(PARTIAL_AREA, &[start_hi, start_lo, end_hi, end_lo])
    }

    /// Send `n` empty memory writes
    pub fn nop(&mut self, n: usize) -> DisplayResult<I> {
        for _ in 0..n {
            self.command(MEMORY_WRITE, &[])?;
        }
        Ok(())
    }

    /// Read all identification registers
    pub fn read_identification(&mut self) -> Result<Identification, Error<I>> {
        let mut id = Identification::default();
        self.read(READ_DISPLAY_ID, &mut id.display_id)?;
        self.read(READ_MANUFACTURER_ID, &mut id.manufacturer_id)?;
        let mut byte = [0u8; 1];
        self.read(READ_ID1, &mut byte)?;
        id.id1 = byte[0];
        self.read(READ_ID2, &mut byte)?;
        id.id2 = byte[0];
        self.read(READ_ID3, &mut byte)?;
        id.id3 = byte[0];
        Ok(id)
    }

    /// Encode a color with the active pixel format
    pub fn encode_color(&self, red: u8, green: u8, blue: u8) -> u16 {
        self.state.encoder.encode(red, green, blue)
    }

    /// Encoder for the active pixel format
    pub fn encoder(&self) -> ColorEncoder {
        self.state.encoder
    }

    /// Registers as last written
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Panel dimensions as seen through the current orientation
    pub fn dimensions(&self) -> Dimensions {
        if self.state.memory_access.exchange {
            self.config.dimensions.oriented(Orientation::Exchange)
        } else {
            self.config.dimensions
        }
    }

    /// Write direction preset currently applied
    pub fn orientation(&self) -> Orientation {
        self.state.memory_access.orientation()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Send a command, unlocking the manufacturer commands first if needed
    fn command(&mut self, opcode: u8, parameters: &[u8]) -> DisplayResult<I> {
        if is_privileged(opcode) {
            self.unlock(false)?;
        }
        self.send(opcode, parameters)
    }

    fn send(&mut self, opcode: u8, parameters: &[u8]) -> DisplayResult<I> {
        trace!("command {opcode:#04x}, {} parameter bytes", parameters.len());
        self.interface
            .write_command(opcode, parameters)
            .map_err(Error::Interface)
    }

    /// Read a register from the display controller
    fn read(&mut self, opcode: u8, buffer: &mut [u8]) -> DisplayResult<I> {
        self.interface
            .read_register(opcode, buffer)
            .map_err(Error::Interface)?;
        trace!("read {opcode:#04x}: {buffer:02x?}");
        Ok(())
    }
}
