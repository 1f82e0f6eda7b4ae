//! Frame memory write direction
//!
//! The GC9106 maps logical drawing coordinates to frame memory through the
//! memory access control register (MADCTL). This module models the register
//! as [`MemoryAccess`] and the eight write-direction presets of the datasheet
//! as [`Orientation`].
//!
//! ## Register Layout
//!
//! | Bit | Name | Meaning                           |
//! |-----|------|-----------------------------------|
//! | 7   | MY   | Row address order                 |
//! | 6   | MX   | Column address order              |
//! | 5   | MV   | Row / column exchange             |
//! | 4   | ML   | Vertical refresh order            |
//! | 3   | BGR  | RGB-BGR order (RGB = 0)           |
//! | 2   | MH   | Horizontal refresh order          |
//!
//! ## Example
//!
//! ```
//! use gc9106::{MemoryAccess, Orientation};
//!
//! let orientation = Orientation::from_name("x-y exchange x-invert");
//! assert_eq!(orientation, Some(Orientation::ExchangeXInvert));
//!
//! let madctl = MemoryAccess::from(Orientation::ExchangeXInvert);
//! assert_eq!(madctl.to_byte(), 0b0110_0000);
//! ```

/// MY bit position
pub const MY_BIT: u8 = 7;
/// MX bit position
pub const MX_BIT: u8 = 6;
/// MV bit position
pub const MV_BIT: u8 = 5;
/// ML bit position
pub const ML_BIT: u8 = 4;
/// BGR bit position
pub const BGR_BIT: u8 = 3;
/// MH bit position
pub const MH_BIT: u8 = 2;

/// Contents of the memory access control register
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryAccess {
    /// Row address order (MY)
    pub row_order: bool,
    /// Column address order (MX)
    pub column_order: bool,
    /// Row / column exchange (MV)
    pub exchange: bool,
    /// Vertical refresh order (ML)
    pub vertical_refresh: bool,
    /// BGR color order (BGR)
    pub bgr: bool,
    /// Horizontal refresh order (MH)
    pub horizontal_refresh: bool,
}

impl MemoryAccess {
    /// Pack into the register byte
    pub fn to_byte(self) -> u8 {
        u8::from(self.row_order) << MY_BIT
            | u8::from(self.column_order) << MX_BIT
            | u8::from(self.exchange) << MV_BIT
            | u8::from(self.vertical_refresh) << ML_BIT
            | u8::from(self.bgr) << BGR_BIT
            | u8::from(self.horizontal_refresh) << MH_BIT
    }

    /// The write-direction preset encoded in MY/MX/MV
    pub fn orientation(self) -> Orientation {
        Orientation::ALL
            .into_iter()
            .find(|o| {
                let (my, mx, mv) = o.flags();
                my == self.row_order && mx == self.column_order && mv == self.exchange
            })
            .unwrap_or_default()
    }
}

impl From<Orientation> for MemoryAccess {
    fn from(orientation: Orientation) -> Self {
        let (row_order, column_order, exchange) = orientation.flags();
        Self {
            row_order,
            column_order,
            exchange,
            ..Self::default()
        }
    }
}

/// Frame data write direction presets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Native direction
    #[default]
    Normal,
    /// Rows written bottom to top
    YInvert,
    /// Columns written right to left
    XInvert,
    /// Both axes inverted
    XYInvert,
    /// Rows and columns exchanged
    Exchange,
    /// Exchanged, rows inverted
    ExchangeYInvert,
    /// Exchanged, columns inverted
    ExchangeXInvert,
    /// Exchanged, both axes inverted
    ExchangeXYInvert,
}

impl Orientation {
    /// All presets
    pub const ALL: [Orientation; 8] = [
        Self::Normal,
        Self::YInvert,
        Self::XInvert,
        Self::XYInvert,
        Self::Exchange,
        Self::ExchangeYInvert,
        Self::ExchangeXInvert,
        Self::ExchangeXYInvert,
    ];

    /// (MY, MX, MV) for this preset
    pub fn flags(self) -> (bool, bool, bool) {
        match self {
            Self::Normal => (false, false, false),
            Self::YInvert => (true, false, false),
            Self::XInvert => (false, true, false),
            Self::XYInvert => (true, true, false),
            Self::Exchange => (false, false, true),
            Self::ExchangeYInvert => (true, false, true),
            Self::ExchangeXInvert => (false, true, true),
            Self::ExchangeXYInvert => (true, true, true),
        }
    }

    /// Whether rows and columns are exchanged
    pub fn is_exchanged(self) -> bool {
        self.flags().2
    }

    /// Datasheet name of the preset
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::YInvert => "Y-INVERT",
            Self::XInvert => "X-INVERT",
            Self::XYInvert => "X-INVERT Y-INVERT",
            Self::Exchange => "X-Y EXCHANGE",
            Self::ExchangeYInvert => "X-Y EXCHANGE Y-INVERT",
            Self::ExchangeXInvert => "X-Y EXCHANGE X-INVERT",
            Self::ExchangeXYInvert => "X-Y EXCHANGE Y-INVERT X-INVERT",
        }
    }

    /// Look a preset up by its datasheet name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_distinct() {
        for (i, a) in Orientation::ALL.iter().enumerate() {
            for b in &Orientation::ALL[i + 1..] {
                assert_ne!(a.flags(), b.flags());
            }
        }
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Orientation::from_name("normal"), Some(Orientation::Normal));
        assert_eq!(
            Orientation::from_name("X-Y Exchange Y-Invert X-Invert"),
            Some(Orientation::ExchangeXYInvert)
        );
        assert_eq!(Orientation::from_name("sideways"), None);
        for orientation in Orientation::ALL {
            assert_eq!(Orientation::from_name(orientation.name()), Some(orientation));
        }
    }

    #[test]
    fn test_memory_access_byte_layout() {
        let access = MemoryAccess {
            row_order: true,
            column_order: false,
            exchange: true,
            vertical_refresh: true,
            bgr: false,
            horizontal_refresh: true,
        };
        assert_eq!(access.to_byte(), 0b1011_0100);
        assert_eq!(MemoryAccess::default().to_byte(), 0);
    }

    #[test]
    fn test_orientation_round_trip_through_register() {
        for orientation in Orientation::ALL {
            let access = MemoryAccess::from(orientation);
            assert_eq!(access.orientation(), orientation);
            assert_eq!(access.exchange, orientation.is_exchanged());
        }
    }
}
