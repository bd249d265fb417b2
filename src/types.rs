//! Type definitions for the supported FTDI chip family.

/// Chip variants behind the shared 0x6001 product ID.
///
/// The chip type is auto-detected when a device is opened, based on the
/// USB `bcdDevice` descriptor field. Only the FT232R stores CBUS function
/// assignments in its EEPROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipType {
    /// Original FTDI chip (FT8U232AM).
    Am,
    /// B-type chip (FT232BM).
    Bm,
    /// FT232R / FT245R.
    Ft232R,
}

impl ChipType {
    /// Whether the EEPROM of this chip carries CBUS function assignments.
    pub fn has_cbus(self) -> bool {
        matches!(self, Self::Ft232R)
    }
}

/// Bitbang mode selection.
///
/// Used with [`FtdiDevice::set_bitmode`](crate::FtdiDevice::set_bitmode).
/// Only the modes this tool needs are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitMode {
    /// Normal serial mode (bitbang disabled).
    #[default]
    Reset,
    /// CBUS bitbang mode (FT232R, pins must be IOMODE in the EEPROM).
    Cbus,
}

impl BitMode {
    /// Wire value for the SIO_SET_BITMODE request.
    pub(crate) fn wire_value(self) -> u8 {
        match self {
            Self::Reset => 0x00,
            Self::Cbus => 0x20,
        }
    }
}
