//! Graphics support via embedded-graphics
//!
//! This module implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! trait from the embedded-graphics ecosystem for [`Framebuffer`].
//!
//! Colors are [`Rgb565`]. Each one is widened to 8 bits per channel and run
//! through the active color encoder, so a shape drawn in a color matches a
//! decoded bitmap of the same color.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use gc9106::Framebuffer;
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use gc9106::{Builder, Display, DisplayInterface};
//! # struct MockInterface;
//! # impl DisplayInterface for MockInterface {
//! #     type Error = Infallible;
//! #     fn write_command(&mut self, _c: u8, _p: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn read_register(&mut self, _c: u8, _b: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn hardware_reset<D: DelayNs>(&mut self, _d: &mut D) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let display = Display::new(MockInterface, config);
//! let mut framebuffer = Framebuffer::new(display, [0u8; 128 * 160 * 2]);
//!
//! framebuffer.clear();
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
//!     .draw(&mut framebuffer);
//!
//! let _ = Circle::new(Point::new(60, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::RED, 2))
//!     .draw(&mut framebuffer);
//!
//! let _ = Text::new(
//!     "Hello, TFT!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
//! )
//! .draw(&mut framebuffer);
//!
//! let _ = framebuffer.flush();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::Pixel,
};

use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;

impl<I, B> DrawTarget for Framebuffer<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let encoder = self.display().encoder();

        for Pixel(Point { x, y }, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
                self.set_pixel(x, y, encoder.encode_rgb(color));
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let encoded = self.display().encoder().encode_rgb(color);
        self.fill(encoded);
        Ok(())
    }
}

impl<I, B> OriginDimensions for Framebuffer<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
