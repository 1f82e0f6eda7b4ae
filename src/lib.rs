//! GC9106 TFT Display Driver
//!
//! A driver for the GC9106 TFT display controller (128x160, 65k colors),
//! connected through a bit-banged 8080-style 8-bit parallel bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - RGB565 color encoding with the panel's channel inversion
//! - Frame memory write direction presets
//! - Gamma, frame rate and inversion control
//! - 24-bit BMP decoding straight into a frame buffer
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use gc9106::{Builder, Display, FlexPin, Orientation, ParallelInterface, PinBus};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # impl FlexPin for MockPin {
//! #     fn set_as_input(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_as_output(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let data = [MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin];
//! # let (rd, wr, dc, cs, rst) = (MockPin, MockPin, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! let bus = PinBus::new(data);
//! let interface = match ParallelInterface::new(bus, rd, wr, dc, cs, rst) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.initialize(&mut delay);
//! let _ = display.set_orientation(Orientation::ExchangeXInvert, false, true);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// 24-bit BMP decoding
pub mod bitmap;
/// Pixel formats and color encoding
pub mod color;
/// GC9106 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Buffered drawing
pub mod framebuffer;
/// Encoded pixel images
pub mod image;
/// Hardware interface abstraction
pub mod interface;
/// Frame memory write direction
pub mod orientation;
/// Display status decoding
pub mod status;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use bitmap::Bitmap;
pub use color::{ColorEncoder, PixelFormat, encode_rgb565};
pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS, MIN_SIDE};
pub use display::{AddressWindow, Axis, ControllerState, Display, GammaCurve, Identification, Phase};
pub use error::{BuilderError, Error, ErrorKind, ImageError};
pub use framebuffer::Framebuffer;
pub use image::ImageRaw;
pub use interface::{
    DataBus, DisplayInterface, FlexPin, InterfaceError, ParallelInterface, PinBus,
};
pub use orientation::{MemoryAccess, Orientation};
pub use status::DisplayStatus;

#[cfg(feature = "alloc")]
pub use image::DecodedImage;
