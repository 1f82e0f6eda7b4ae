//! Display configuration types and builder

use crate::orientation::Orientation;

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Smallest panel side; an address window needs `start < end`
pub const MIN_SIDE: u16 = 2;

/// Panel dimensions in the native (non-exchanged) orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (column drivers)
    pub width: u16,
    /// Height in pixels (row drivers)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is below MIN_SIDE or > MAX_COLUMNS
    /// - height is below MIN_SIDE or > MAX_ROWS
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if !(MIN_SIDE..=MAX_COLUMNS).contains(&width) || !(MIN_SIDE..=MAX_ROWS).contains(&height) {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Calculate required framebuffer size in bytes at 16 bits per pixel
    pub fn buffer_size(&self) -> usize {
        self.width as usize * self.height as usize * 2
    }

    /// Dimensions as seen through `orientation`
    pub fn oriented(&self, orientation: Orientation) -> Self {
        if orientation.is_exchanged() {
            Self {
                width: self.height,
                height: self.width,
            }
        } else {
            *self
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: MAX_COLUMNS,
            height: MAX_ROWS,
        }
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// Raw frame rate register value written during initialization
    pub frame_rate: u8,
    /// Orientation applied when a framebuffer is initialized
    pub orientation: Orientation,
}

impl Config {
    /// Last column address for the given row/column exchange state
    pub fn max_column(&self, exchanged: bool) -> u16 {
        if exchanged {
            self.dimensions.height - 1
        } else {
            self.dimensions.width - 1
        }
    }

    /// Last row address for the given row/column exchange state
    pub fn max_row(&self, exchanged: bool) -> u16 {
        if exchanged {
            self.dimensions.width - 1
        } else {
            self.dimensions.height - 1
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            frame_rate: 0x00,
            orientation: Orientation::Normal,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use gc9106::{Builder, Dimensions, Orientation};
///
/// let dims = match Dimensions::new(128, 160) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .orientation(Orientation::ExchangeXInvert)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set the raw frame rate register value
    pub fn frame_rate(mut self, value: u8) -> Self {
        self.config.frame_rate = value;
        self
    }

    /// Set the startup orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidFrameRate` if the frame rate needs more than 7 bits
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.config.frame_rate > 0x7F {
            return Err(BuilderError::InvalidFrameRate(self.config.frame_rate));
        }
        Ok(self.config)
    }
}
