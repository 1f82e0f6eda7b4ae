//! Encoded pixel images ready for the frame memory

use crate::error::ImageError;

/// Bytes per encoded pixel
pub const PIXEL_BYTES: usize = 2;

/// Borrowed image of encoded 16-bit pixels
///
/// Pixels are stored top-down, row-major, each as a big-endian byte pair:
/// the same layout the memory write command expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRaw<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> ImageRaw<'a> {
    /// Wrap already encoded pixel data
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Truncated` if `data` holds fewer than
    /// `width * height` pixels. Extra bytes are ignored.
    pub fn new(width: u16, height: u16, data: &'a [u8]) -> Result<Self, ImageError> {
        let len = usize::from(width)
            .checked_mul(usize::from(height))
            .and_then(|pixels| pixels.checked_mul(PIXEL_BYTES))
            .ok_or(ImageError::Truncated)?;
        let data = data.get(..len).ok_or(ImageError::Truncated)?;
        Ok(Self {
            width,
            height,
            data,
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

    /// Encoded bytes, exactly `width * height * 2` long
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Encoded bytes of row `y`
    pub fn row(&self, y: u16) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let stride = usize::from(self.width) * PIXEL_BYTES;
        let start = usize::from(y) * stride;
        self.data.get(start..start + stride)
    }

    /// Encoded pixel at (x, y)
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width {
            return None;
        }
        let offset = usize::from(x) * PIXEL_BYTES;
        let row = self.row(y)?;
        Some(u16::from_be_bytes([row[offset], row[offset + 1]]))
    }
}

#[cfg(feature = "alloc")]
pub use owned::DecodedImage;

#[cfg(feature = "alloc")]
mod owned {
    use alloc::vec::Vec;

    use super::{ImageRaw, PIXEL_BYTES};

    /// Owned image of encoded 16-bit pixels
    ///
    /// Same layout as [`ImageRaw`].
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct DecodedImage {
        width: u16,
        height: u16,
        data: Vec<u8>,
    }

    impl DecodedImage {
        pub(crate) fn from_pixels(width: u16, height: u16, pixels: impl Iterator<Item = u16>) -> Self {
            let mut data = Vec::with_capacity(usize::from(width) * usize::from(height) * PIXEL_BYTES);
            for pixel in pixels {
                data.extend_from_slice(&pixel.to_be_bytes());
            }
            Self {
                width,
                height,
                data,
            }
        }

        /// Width in pixels
        pub fn width(&self) -> u16 {
            self.width
        }

        /// Height in pixels
        pub fn height(&self) -> u16 {
            self.height
        }

        /// Borrow as an [`ImageRaw`]
        pub fn as_raw(&self) -> ImageRaw<'_> {
            ImageRaw {
                width: self.width,
                height: self.height,
                data: &self.data,
            }
        }

        /// Take the encoded bytes
        pub fn into_bytes(self) -> Vec<u8> {
            self.data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let data = [0u8; 8];
        assert!(ImageRaw::new(2, 2, &data).is_ok());
        assert_eq!(ImageRaw::new(3, 2, &data), Err(ImageError::Truncated));
        let image = ImageRaw::new(1, 2, &data).unwrap();
        assert_eq!(image.data().len(), 4);
    }

    #[test]
    fn test_pixel_access() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        let image = ImageRaw::new(2, 2, &data).unwrap();
        assert_eq!(image.pixel(0, 0), Some(0x1234));
        assert_eq!(image.pixel(1, 1), Some(0xDEF0));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 2), None);
        assert_eq!(image.row(1), Some(&data[4..]));
    }

    #[test]
    fn test_new_rejects_largest_size_on_short_data() {
        let data = [0u8; 16];
        assert_eq!(
            ImageRaw::new(u16::MAX, u16::MAX, &data),
            Err(ImageError::Truncated)
        );
    }

    #[test]
    fn test_empty_image() {
        let image = ImageRaw::new(0, 0, &[]).unwrap();
        assert_eq!(image.row(0), None);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_decoded_image_layout() {
        let image = DecodedImage::from_pixels(2, 1, [0xABCD, 0x0102].into_iter());
        assert_eq!(image.as_raw().data(), &[0xAB, 0xCD, 0x01, 0x02]);
        assert_eq!(image.as_raw().pixel(1, 0), Some(0x0102));
        assert_eq!(image.into_bytes().len(), 4);
    }
}
