//! Protocol constants for FTDI chip communication.
//!
//! These constants define the USB vendor request codes and EEPROM layout
//! details used by this tool. Most users should not need them directly.

// ---- Device identification ----

/// Default FTDI vendor ID.
pub const FTDI_VID: u16 = 0x0403;

/// Product ID shared by the FT232AM, FT232BM and FT232R.
pub const FT232_PID: u16 = 0x6001;

// ---- SIO vendor request codes ----

/// Reset the port.
pub(crate) const SIO_RESET_REQUEST: u8 = 0x00;
/// Poll modem status.
pub(crate) const SIO_POLL_MODEM_STATUS_REQUEST: u8 = 0x05;
/// Set latency timer.
pub(crate) const SIO_SET_LATENCY_TIMER_REQUEST: u8 = 0x09;
/// Set bitbang mode.
pub(crate) const SIO_SET_BITMODE_REQUEST: u8 = 0x0B;
/// Read EEPROM.
pub(crate) const SIO_READ_EEPROM_REQUEST: u8 = 0x90;
/// Write EEPROM.
pub(crate) const SIO_WRITE_EEPROM_REQUEST: u8 = 0x91;

/// SIO reset sub-command (full device reset).
pub(crate) const SIO_RESET_SIO: u16 = 0;

// ---- EEPROM constants ----

/// Configuration EEPROM size for the PID 0x6001 chip family, in bytes.
pub const FTDI_DEFAULT_EEPROM_SIZE: usize = 0x80;
/// Max power is stored as value * 2 mA.
pub(crate) const MAX_POWER_MILLIAMP_PER_UNIT: u16 = 2;
