//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! bitmap parsing ([`ImageError`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`ImageError`] - Rejected bitmap files
//! - [`Error`] - Runtime errors during display operations, classified by [`ErrorKind`]
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus errors
//!
//! ## Timing
//!
//! Every settle time the controller requires (reset pulse, software reset,
//! sleep out) is waited out by the driver itself, so there is no error for a
//! timing violation. Code that drives a [`DisplayInterface`] directly must
//! respect the delays documented on the opcodes in [`crate::command`].
//!
//! ## Example
//!
//! ```
//! use gc9106::{Builder, BuilderError, Dimensions};
//!
//! // Too wide for the controller
//! let result = Dimensions::new(200, 160);
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
//!
//! // Defaults to the full 128x160 panel
//! let config = Builder::new().build();
//! assert!(matches!(config, Ok(c) if c.dimensions == Dimensions::default()));
//! ```

use crate::color::PixelFormat;
use crate::interface::DisplayInterface;

/// Column drivers of the GC9106
pub const MAX_COLUMNS: u16 = 128;

/// Row (gate) drivers of the GC9106
pub const MAX_ROWS: u16 = 160;

/// Broad classification of [`Error`] values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Pin level failure on the bus
    Interface,
    /// An argument was out of range or inconsistent
    InvalidArgument,
    /// The pixel format has no color encoder
    UnsupportedFormat,
    /// Bitmap data was rejected
    MalformedImage,
}

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (data bus or control pins)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    /// A failure in the middle of a command leaves the controller out of sync;
    /// reset it before continuing.
    Interface(I::Error),
    /// Address window start is not below its end
    InvalidAddressWindow {
        /// First address
        start: u16,
        /// Last address
        end: u16,
    },
    /// Pixel payload is not a whole number of pixels
    MisalignedPayload {
        /// Payload length in bytes
        len: usize,
        /// Bytes per pixel of the active format
        bytes_per_pixel: usize,
    },
    /// A register value does not fit its field
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: u16,
    },
    /// Buffer is too small for the display
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Orientation name not recognized
    UnknownOrientation,
    /// Pixel format without a color encoder
    UnsupportedFormat(PixelFormat),
    /// Bitmap could not be decoded
    MalformedImage(ImageError),
}

impl<I: DisplayInterface> Error<I> {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Interface(_) => ErrorKind::Interface,
            Self::InvalidAddressWindow { .. }
            | Self::MisalignedPayload { .. }
            | Self::InvalidParameter { .. }
            | Self::BufferTooSmall { .. }
            | Self::UnknownOrientation => ErrorKind::InvalidArgument,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::MalformedImage(_) => ErrorKind::MalformedImage,
        }
    }
}

impl<I: DisplayInterface> From<ImageError> for Error<I> {
    fn from(error: ImageError) -> Self {
        Self::MalformedImage(error)
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidAddressWindow { start, end } => {
                write!(f, "Invalid address window: start {start} >= end {end}")
            }
            Self::MisalignedPayload {
                len,
                bytes_per_pixel,
            } => write!(
                f,
                "Pixel payload of {len} bytes is not a multiple of {bytes_per_pixel}"
            ),
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid {name}: {value}")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::UnknownOrientation => write!(f, "Unknown orientation"),
            Self::UnsupportedFormat(format) => {
                write!(f, "Unsupported pixel format: {format:?}")
            }
            Self::MalformedImage(error) => write!(f, "Malformed image: {error}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Reasons a bitmap file is rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// File shorter than its headers or pixel data require
    Truncated,
    /// Missing `BM` signature
    BadMagic,
    /// Header fields are inconsistent
    InvalidHeader,
    /// Plane count other than 1
    UnsupportedPlanes(u16),
    /// Color depth other than 24 bits
    UnsupportedDepth(u16),
    /// Compressed pixel data
    Compressed(u32),
}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated file"),
            Self::BadMagic => write!(f, "not a BMP file"),
            Self::InvalidHeader => write!(f, "invalid header"),
            Self::UnsupportedPlanes(planes) => write!(f, "{planes} color planes"),
            Self::UnsupportedDepth(bpp) => write!(f, "{bpp} bits per pixel, expected 24"),
            Self::Compressed(method) => write!(f, "compression method {method}"),
        }
    }
}

impl core::error::Error for ImageError {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
    /// Frame rate value wider than 7 bits
    InvalidFrameRate(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
            Self::InvalidFrameRate(value) => {
                write!(f, "Invalid frame rate {value:#04x} (max 0x7f)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
