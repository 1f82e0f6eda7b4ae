//! Windows bitmap decoding
//!
//! Only uncompressed 24-bit single-plane files are accepted. Rows are
//! stored bottom-up on disk, each padded to a multiple of four bytes, with
//! channels in blue, green, red order. Decoding converts every pixel
//! through a [`ColorEncoder`] and yields them top-down.
//!
//! ## Example
//!
//! ```
//! use gc9106::{Bitmap, ImageError, PixelFormat};
//!
//! // Not a bitmap at all
//! assert_eq!(Bitmap::parse(b"GIF89a").err(), Some(ImageError::Truncated));
//!
//! # let file = [0u8; 54];
//! if let Ok(bitmap) = Bitmap::parse(&file) {
//!     let encoder = PixelFormat::Rgb565.encoder().unwrap_or_default();
//!     for pixel in bitmap.pixels(encoder) {
//!         let _ = pixel;
//!     }
//! }
//! ```

use tinybmp::{Bpp, ParseError, RawBmp};

use crate::color::ColorEncoder;
use crate::error::ImageError;
use crate::image::{ImageRaw, PIXEL_BYTES};

/// File header plus BITMAPINFOHEADER
pub const HEADER_SIZE: usize = 54;

/// Size of the file header preceding the info header
const FILE_HEADER_SIZE: usize = 14;

/// Smallest accepted info header (BITMAPINFOHEADER)
const MIN_INFO_SIZE: u32 = 40;

fn u16_at(header: &[u8; HEADER_SIZE], offset: usize) -> u16 {
    u16::from_le_bytes([header[offset], header[offset + 1]])
}

fn u32_at(header: &[u8; HEADER_SIZE], offset: usize) -> u32 {
    u32::from_le_bytes([
        header[offset],
        header[offset + 1],
        header[offset + 2],
        header[offset + 3],
    ])
}

/// Positive dimension that fits a u16
fn dimension(raw: u32) -> Option<u16> {
    let value = raw as i32;
    if value <= 0 {
        return None;
    }
    u16::try_from(value).ok()
}

/// Padded on-disk row length for `width` pixels
fn row_stride(width: u16) -> usize {
    (usize::from(width) * 3 + 3) & !3
}

/// Check the fixed header fields in reporting order
fn validate_header(data: &[u8]) -> Result<(), ImageError> {
    let header: &[u8; HEADER_SIZE] = data
        .get(..HEADER_SIZE)
        .and_then(|header| header.try_into().ok())
        .ok_or(ImageError::Truncated)?;
    if &header[..2] != b"BM" {
        return Err(ImageError::BadMagic);
    }

    let offset = usize::try_from(u32_at(header, 10)).map_err(|_| ImageError::InvalidHeader)?;
    let info_size = u32_at(header, 14);
    let info_end = usize::try_from(info_size)
        .ok()
        .and_then(|size| size.checked_add(FILE_HEADER_SIZE));
    if info_size < MIN_INFO_SIZE
        || !matches!(info_end, Some(end) if end <= offset)
        || offset > data.len()
    {
        return Err(ImageError::InvalidHeader);
    }
    let (Some(width), Some(height)) = (dimension(u32_at(header, 18)), dimension(u32_at(header, 22)))
    else {
        return Err(ImageError::InvalidHeader);
    };

    let planes = u16_at(header, 26);
    if planes != 1 {
        return Err(ImageError::UnsupportedPlanes(planes));
    }
    let depth = u16_at(header, 28);
    if depth != 24 {
        return Err(ImageError::UnsupportedDepth(depth));
    }
    let compression = u32_at(header, 30);
    if compression != 0 {
        return Err(ImageError::Compressed(compression));
    }

    // A size that overflows can never be present in memory
    let end = row_stride(width)
        .checked_mul(usize::from(height))
        .and_then(|len| len.checked_add(offset));
    if !matches!(end, Some(end) if end <= data.len()) {
        return Err(ImageError::Truncated);
    }
    Ok(())
}

/// A validated 24-bit bitmap borrowed from file contents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    width: u16,
    height: u16,
    /// Padded row length on disk
    stride: usize,
    /// Pixel array, bottom row first
    pixels: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Validate the headers and locate the pixel array
    ///
    /// # Errors
    ///
    /// Checks run in this order:
    /// - `ImageError::Truncated` if the headers are incomplete
    /// - `ImageError::BadMagic` without the `BM` signature
    /// - `ImageError::InvalidHeader` if the pixel offset, info header size
    ///   or dimensions are out of range
    /// - `ImageError::UnsupportedPlanes`, `ImageError::UnsupportedDepth`,
    ///   `ImageError::Compressed` for anything but 1 plane, 24 bits, no
    ///   compression
    /// - `ImageError::Truncated` if the pixel array is cut short
    pub fn parse(data: &'a [u8]) -> Result<Self, ImageError> {
        validate_header(data)?;

        let raw = RawBmp::from_slice(data).map_err(|error| match error {
            ParseError::UnexpectedEndOfFile => ImageError::Truncated,
            _ => ImageError::InvalidHeader,
        })?;
        let header = raw.header();
        if !matches!(header.bpp, Bpp::Bits24) {
            return Err(ImageError::InvalidHeader);
        }
        let width = u16::try_from(header.image_size.width).map_err(|_| ImageError::InvalidHeader)?;
        let height =
            u16::try_from(header.image_size.height).map_err(|_| ImageError::InvalidHeader)?;

        let stride = row_stride(width);
        let start = header.image_data_start;
        let end = stride
            .checked_mul(usize::from(height))
            .and_then(|len| len.checked_add(start))
            .ok_or(ImageError::Truncated)?;
        let pixels = data.get(start..end).ok_or(ImageError::Truncated)?;

        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes needed to hold the decoded image
    pub fn decoded_size(&self) -> usize {
        usize::from(self.width)
            .saturating_mul(usize::from(self.height))
            .saturating_mul(PIXEL_BYTES)
    }

    /// Encoded pixels, top-down and row-major
    pub fn pixels(&self, encoder: ColorEncoder) -> Pixels<'a> {
        Pixels {
            bitmap: *self,
            encoder,
            x: 0,
            y: 0,
        }
    }

    /// Decode into `buffer`
    ///
    /// Returns `None` if `buffer` is shorter than [`decoded_size`](Self::decoded_size).
    pub fn decode_into<'b>(
        &self,
        encoder: ColorEncoder,
        buffer: &'b mut [u8],
    ) -> Option<ImageRaw<'b>> {
        let out = buffer.get_mut(..self.decoded_size())?;
        for (chunk, pixel) in out.chunks_exact_mut(PIXEL_BYTES).zip(self.pixels(encoder)) {
            chunk.copy_from_slice(&pixel.to_be_bytes());
        }
        ImageRaw::new(self.width, self.height, buffer).ok()
    }

    /// Decode into a new owned image
    #[cfg(feature = "alloc")]
    pub fn decode(&self, encoder: ColorEncoder) -> crate::image::DecodedImage {
        crate::image::DecodedImage::from_pixels(self.width, self.height, self.pixels(encoder))
    }

    /// Disk bytes (blue, green, red) of the pixel at top-down position (x, y)
    fn bgr(&self, x: u16, y: u16) -> [u8; 3] {
        let row = usize::from(self.height - 1 - y);
        let start = row * self.stride + usize::from(x) * 3;
        [
            self.pixels[start],
            self.pixels[start + 1],
            self.pixels[start + 2],
        ]
    }
}

/// Iterator over the encoded pixels of a [`Bitmap`]
///
/// Created by [`Bitmap::pixels`].
#[derive(Clone, Debug)]
pub struct Pixels<'a> {
    bitmap: Bitmap<'a>,
    encoder: ColorEncoder,
    x: u16,
    y: u16,
}

impl Iterator for Pixels<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.y >= self.bitmap.height {
            return None;
        }
        let [blue, green, red] = self.bitmap.bgr(self.x, self.y);
        self.x += 1;
        if self.x == self.bitmap.width {
            self.x = 0;
            self.y += 1;
        }
        Some(self.encoder.encode(red, green, blue))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let width = usize::from(self.bitmap.width);
        let done = usize::from(self.y) * width + usize::from(self.x);
        let remaining = usize::from(self.bitmap.height) * width - done;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pixels<'_> {}
