//! Buffered drawing
//!
//! [`Framebuffer`] wraps a [`Display`] together with a pixel buffer. Drawing
//! only touches the buffer; [`Framebuffer::flush`] sends all of it to the
//! panel in a single memory write.
//!
//! The buffer holds encoded 16-bit pixels as big-endian byte pairs, rows
//! top to bottom, laid out for the dimensions of the current orientation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gc9106::{Bitmap, Framebuffer};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use gc9106::{Builder, Display, DisplayInterface, Orientation};
//! # struct MockInterface;
//! # impl DisplayInterface for MockInterface {
//! #     type Error = Infallible;
//! #     fn write_command(&mut self, _c: u8, _p: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn read_register(&mut self, _c: u8, _b: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn hardware_reset<D: DelayNs>(&mut self, _d: &mut D) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let logo_file = [0u8; 54];
//! let config = match Builder::new().orientation(Orientation::ExchangeXInvert).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let display = Display::new(MockInterface, config);
//! let mut framebuffer = Framebuffer::new(display, [0u8; 128 * 160 * 2]);
//! let _ = framebuffer.init(&mut delay);
//!
//! framebuffer.clear();
//! if let Ok(logo) = Bitmap::parse(&logo_file) {
//!     framebuffer.draw_bitmap(&logo, 0, 0);
//! }
//! let _ = framebuffer.flush();
//! ```

use embedded_hal::delay::DelayNs;

use crate::bitmap::Bitmap;
use crate::display::Display;
use crate::error::Error;
use crate::image::{ImageRaw, PIXEL_BYTES};
use crate::interface::DisplayInterface;
use crate::orientation::Orientation;

type FramebufferResult<I> = core::result::Result<(), Error<I>>;
type FramebufferNewResult<I, T> = core::result::Result<T, Error<I>>;

/// Display with a frame buffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Buffer type, at least `width * height * 2` bytes
pub struct Framebuffer<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Encoded pixels
    buffer: B,
}

impl<I, B> Framebuffer<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    /// Create a new Framebuffer
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is smaller than `dimensions.buffer_size()`.
    pub fn new(display: Display<I>, buffer: B) -> Self {
        let required = display.config().dimensions.buffer_size();
        assert!(
            buffer.as_ref().len() >= required,
            "buffer too small: required {} bytes, got {}",
            required,
            buffer.as_ref().len()
        );
        Self { display, buffer }
    }

    /// Try to create a new Framebuffer, returning an error if the buffer is too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    pub fn try_new(display: Display<I>, buffer: B) -> FramebufferNewResult<I, Self> {
        let required = display.config().dimensions.buffer_size();
        if buffer.as_ref().len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.as_ref().len(),
            });
        }
        Ok(Self { display, buffer })
    }

    /// Initialize the controller and apply the configured orientation
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> FramebufferResult<I> {
        self.display.initialize(delay)?;
        let orientation = self.display.config().orientation;
        if orientation != Orientation::Normal {
            self.display.set_orientation(orientation, false, true)?;
        }
        Ok(())
    }

    /// Width in pixels for the current orientation
    pub fn width(&self) -> u16 {
        self.display.dimensions().width
    }

    /// Height in pixels for the current orientation
    pub fn height(&self) -> u16 {
        self.display.dimensions().height
    }

    /// Set every pixel to an encoded color
    pub fn fill(&mut self, color: u16) {
        let bytes = color.to_be_bytes();
        for chunk in self.pixels_mut().chunks_exact_mut(PIXEL_BYTES) {
            chunk.copy_from_slice(&bytes);
        }
    }

    /// Fill with black
    pub fn clear(&mut self) {
        let black = self.display.encode_color(0, 0, 0);
        self.fill(black);
    }

    /// Set one pixel to an encoded color
    ///
    /// Coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: u16) {
        if let Some(offset) = self.offset(x, y) {
            self.buffer.as_mut()[offset..offset + PIXEL_BYTES].copy_from_slice(&color.to_be_bytes());
        }
    }

    /// Encoded color of one pixel
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        let offset = self.offset(x, y)?;
        let buffer = self.buffer.as_ref();
        Some(u16::from_be_bytes([buffer[offset], buffer[offset + 1]]))
    }

    /// Copy an image with its top left corner at (x, y)
    ///
    /// Parts of the image outside the frame are dropped.
    pub fn blit(&mut self, image: &ImageRaw<'_>, x: i32, y: i32) {
        let width = i32::from(self.width());
        let height = i32::from(self.height());

        // visible source columns
        let first = x.saturating_neg().max(0);
        let last = width.saturating_sub(x).min(i32::from(image.width()));
        if first >= last {
            return;
        }
        let src_start = first as usize * PIXEL_BYTES;
        let src_end = last as usize * PIXEL_BYTES;
        let stride = width as usize * PIXEL_BYTES;
        let dst_column = (x + first) as usize * PIXEL_BYTES;

        for sy in 0..image.height() {
            let dy = y.saturating_add(i32::from(sy));
            if dy < 0 {
                continue;
            }
            if dy >= height {
                break;
            }
            let Some(row) = image.row(sy) else {
                break;
            };
            let dst = dy as usize * stride + dst_column;
            self.buffer.as_mut()[dst..dst + src_end - src_start]
                .copy_from_slice(&row[src_start..src_end]);
        }
    }

    /// Decode a bitmap straight into the frame at (x, y)
    ///
    /// Pixels are encoded with the active pixel format. Parts outside the
    /// frame are dropped.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap<'_>, x: i32, y: i32) {
        let encoder = self.display.encoder();
        let bitmap_width = i32::from(bitmap.width());
        let mut pixels = bitmap.pixels(encoder);
        for sy in 0..i32::from(bitmap.height()) {
            for sx in 0..bitmap_width {
                let Some(color) = pixels.next() else {
                    return;
                };
                let (dx, dy) = (x.saturating_add(sx), y.saturating_add(sy));
                if let (Ok(dx), Ok(dy)) = (u16::try_from(dx), u16::try_from(dy)) {
                    self.set_pixel(dx, dy, color);
                }
            }
        }
    }

    /// Parse BMP file contents and draw them at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedImage` if [`Bitmap::parse`] rejects the file.
    /// The frame is left untouched in that case.
    pub fn draw_bmp(&mut self, file: &[u8], x: i32, y: i32) -> FramebufferResult<I> {
        let bitmap = Bitmap::parse(file)?;
        self.draw_bitmap(&bitmap, x, y);
        Ok(())
    }

    /// Send the whole frame to the panel
    ///
    /// The address window must cover the full panel, as left by
    /// [`init`](Self::init) or an orientation change.
    pub fn flush(&mut self) -> FramebufferResult<I> {
        let len = self.display.config().dimensions.buffer_size();
        self.display.write_pixels(&self.buffer.as_ref()[..len])
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Give back the display and the buffer
    pub fn release(self) -> (Display<I>, B) {
        (self.display, self.buffer)
    }

    /// Encoded frame bytes
    pub fn buffer(&self) -> &[u8] {
        let len = self.display.config().dimensions.buffer_size();
        &self.buffer.as_ref()[..len]
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        let len = self.display.config().dimensions.buffer_size();
        &mut self.buffer.as_mut()[..len]
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        let dims = self.display.dimensions();
        if x >= dims.width || y >= dims.height {
            return None;
        }
        Some((usize::from(y) * usize::from(dims.width) + usize::from(x)) * PIXEL_BYTES)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::bitmap::tests::build_bmp;
    use crate::color::encode_rgb565;
    use crate::command::MEMORY_WRITE;
    use crate::config::{Builder, Dimensions};
    use crate::display::tests::MockInterface;
    use crate::error::{ErrorKind, ImageError};

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    pub(crate) fn small_framebuffer(width: u16, height: u16) -> Framebuffer<MockInterface, Vec<u8>> {
        let config = Builder::new()
            .dimensions(Dimensions::new(width, height).unwrap())
            .build()
            .unwrap();
        let display = Display::new(MockInterface::default(), config);
        Framebuffer::new(display, vec![0u8; usize::from(width) * usize::from(height) * 2])
    }

    #[test]
    fn test_try_new_small_buffer_returns_error() {
        let display = Display::new(MockInterface::default(), Builder::new().build().unwrap());
        let result = Framebuffer::try_new(display, vec![0u8; 100]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 40960,
                provided: 100
            })
        ));
    }

    #[test]
    #[should_panic(expected = "buffer too small")]
    fn test_new_panics_on_small_buffer() {
        let display = Display::new(MockInterface::default(), Builder::new().build().unwrap());
        let _ = Framebuffer::new(display, vec![0u8; 100]);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut fb = small_framebuffer(4, 3);
        fb.fill(0x1234);
        assert!(fb.buffer().chunks(2).all(|c| c == [0x12, 0x34]));
        fb.clear();
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut fb = small_framebuffer(4, 3);
        fb.set_pixel(3, 2, 0xABCD);
        fb.set_pixel(4, 0, 0xFFFF);
        fb.set_pixel(0, 3, 0xFFFF);
        assert_eq!(fb.pixel(3, 2), Some(0xABCD));
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(&fb.buffer()[22..], &[0xAB, 0xCD]);
        assert_eq!(fb.buffer().iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_blit_clips_right_edge() {
        let mut fb = small_framebuffer(4, 3);
        let data = [0x11, 0x11, 0x22, 0x22, 0x33, 0x33, 0x44, 0x44];
        let image = ImageRaw::new(2, 2, &data).unwrap();
        fb.blit(&image, 3, 0);
        assert_eq!(fb.pixel(3, 0), Some(0x1111));
        assert_eq!(fb.pixel(3, 1), Some(0x3333));
        // only one column was written
        assert_eq!(fb.buffer().iter().filter(|&&b| b != 0).count(), 4);
    }

    #[test]
    fn test_blit_clips_negative_offset() {
        let mut fb = small_framebuffer(4, 3);
        let data = [0x11, 0x11, 0x22, 0x22, 0x33, 0x33, 0x44, 0x44];
        let image = ImageRaw::new(2, 2, &data).unwrap();
        fb.blit(&image, -1, -1);
        assert_eq!(fb.pixel(0, 0), Some(0x4444));
        assert_eq!(fb.buffer().iter().filter(|&&b| b != 0).count(), 2);

        fb.blit(&image, 10, 0);
        fb.blit(&image, 0, 10);
        fb.blit(&image, -2, 0);
        assert_eq!(fb.buffer().iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_blit_inside() {
        let mut fb = small_framebuffer(4, 3);
        let data = [0x11, 0x11, 0x22, 0x22, 0x33, 0x33, 0x44, 0x44];
        let image = ImageRaw::new(2, 2, &data).unwrap();
        fb.blit(&image, 1, 1);
        assert_eq!(fb.pixel(1, 1), Some(0x1111));
        assert_eq!(fb.pixel(2, 1), Some(0x2222));
        assert_eq!(fb.pixel(1, 2), Some(0x3333));
        assert_eq!(fb.pixel(2, 2), Some(0x4444));
    }

    #[test]
    fn test_draw_bitmap_clipped() {
        let mut fb = small_framebuffer(4, 3);
        let file = build_bmp(
            2,
            &[
                &[(0xFF, 0x00, 0x00), (0x00, 0xFF, 0x00)],
                &[(0x00, 0x00, 0xFF), (0xFF, 0xFF, 0xFF)],
            ],
        );
        let bitmap = Bitmap::parse(&file).unwrap();
        fb.draw_bitmap(&bitmap, 3, -1);
        assert_eq!(fb.pixel(3, 0), Some(encode_rgb565(0x00, 0x00, 0xFF)));
        assert_eq!(fb.buffer().iter().filter(|&&b| b != 0).count(), 2);

        fb.draw_bitmap(&bitmap, 0, 0);
        assert_eq!(fb.pixel(0, 0), Some(0x07FF));
        assert_eq!(fb.pixel(1, 0), Some(0xF81F));
        assert_eq!(fb.pixel(1, 1), Some(0x0000));
    }

    #[test]
    fn test_draw_bmp_reports_malformed_file() {
        let mut fb = small_framebuffer(4, 3);
        let mut file = build_bmp(1, &[&[(0x10, 0x20, 0x30)]]);
        fb.draw_bmp(&file, 0, 0).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(encode_rgb565(0x10, 0x20, 0x30)));

        file[28] = 16;
        let result = fb.draw_bmp(&file, 1, 0);
        assert!(matches!(
            result,
            Err(Error::MalformedImage(ImageError::UnsupportedDepth(16)))
        ));
        assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::MalformedImage));
        assert_eq!(fb.pixel(1, 0), Some(0));
    }

    #[test]
    fn test_flush_is_one_memory_write() {
        let mut fb = small_framebuffer(4, 3);
        fb.fill(0xA5A5);
        fb.flush().unwrap();
        let (display, _) = fb.release();
        let commands = display.release().commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].0, MEMORY_WRITE);
        assert_eq!(commands[0].1, vec![0xA5; 24]);
    }

    #[test]
    fn test_init_applies_orientation() {
        let config = Builder::new()
            .orientation(Orientation::ExchangeXInvert)
            .build()
            .unwrap();
        let display = Display::new(MockInterface::default(), config);
        let mut fb = Framebuffer::new(display, vec![0u8; 128 * 160 * 2]);
        fb.init(&mut NoDelay).unwrap();
        assert_eq!((fb.width(), fb.height()), (160, 128));

        fb.set_pixel(159, 127, 0x1234);
        assert_eq!(fb.pixel(159, 127), Some(0x1234));
        let (display, _) = fb.release();
        let opcodes = display.release().opcodes();
        assert_eq!(opcodes.last(), Some(&crate::command::ROW_ADDRESS_SET));
    }
}
