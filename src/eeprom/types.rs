//! EEPROM data types and structures.

use crate::cbus::CBUS_PIN_COUNT;
use crate::constants::FTDI_DEFAULT_EEPROM_SIZE;

/// Decoded FTDI EEPROM contents for the PID 0x6001 chip family.
///
/// Fields are populated by [`decode`](super::decode) and consumed by
/// [`build`](super::build).
#[derive(Debug, Clone)]
pub struct FtdiEeprom {
    // ---- Identification ----
    /// USB Vendor ID (default: 0x0403).
    pub vendor_id: u16,
    /// USB Product ID.
    pub product_id: u16,
    /// Device release number (bcdDevice).
    pub release_number: u16,

    /// Whether the image was built for the currently connected device.
    pub initialized_for_connected_device: bool,

    // ---- Power / USB configuration ----
    /// Device is self-powered (vs bus-powered).
    pub self_powered: bool,
    /// Device supports USB remote wakeup.
    pub remote_wakeup: bool,
    /// Device is not Plug-and-Play.
    pub is_not_pnp: bool,
    /// Input endpoint is isochronous.
    pub in_is_isochronous: bool,
    /// Output endpoint is isochronous.
    pub out_is_isochronous: bool,
    /// Pull down pins during suspend.
    pub suspend_pull_downs: bool,
    /// Use the serial number string.
    pub use_serial: bool,
    /// USB version (bcdUSB).
    pub usb_version: u16,
    /// Use explicit USB version (BM).
    pub use_usb_version: bool,
    /// Maximum power consumption in mA.
    pub max_power: u16,

    // ---- String descriptors ----
    /// Manufacturer name.
    pub manufacturer: Option<String>,
    /// Product description.
    pub product: Option<String>,
    /// Serial number.
    pub serial: Option<String>,

    // ---- FT232R specific ----
    /// Channel uses the VCP driver.
    pub channel_a_driver: bool,
    /// High current drive.
    pub high_current: bool,
    /// External oscillator.
    pub external_oscillator: bool,
    /// Signal inversion bitmask.
    pub invert: u8,
    /// CBUS pin function assignments, one per pin.
    pub cbus_function: [u8; CBUS_PIN_COUNT],

    // ---- Internal ----
    /// EEPROM size in bytes. [`decode`](super::decode) leaves this untouched
    /// (0 when never set); it must be positive before
    /// [`build`](super::build) is called.
    pub size: i32,
    /// Raw EEPROM binary content.
    pub buf: [u8; FTDI_DEFAULT_EEPROM_SIZE],
}

impl Default for FtdiEeprom {
    fn default() -> Self {
        Self {
            vendor_id: 0x0403,
            product_id: 0x6001,
            release_number: 0,
            initialized_for_connected_device: false,
            self_powered: false,
            remote_wakeup: false,
            is_not_pnp: false,
            in_is_isochronous: false,
            out_is_isochronous: false,
            suspend_pull_downs: false,
            use_serial: true,
            usb_version: 0x0200,
            use_usb_version: false,
            max_power: 100,
            manufacturer: None,
            product: None,
            serial: None,
            channel_a_driver: true,
            high_current: false,
            external_oscillator: false,
            invert: 0,
            cbus_function: [0; CBUS_PIN_COUNT],
            size: 0,
            buf: [0u8; FTDI_DEFAULT_EEPROM_SIZE],
        }
    }
}

impl FtdiEeprom {
    /// Set the raw EEPROM buffer from a slice.
    ///
    /// Only copies up to [`FTDI_DEFAULT_EEPROM_SIZE`] bytes.
    pub fn set_raw_buf(&mut self, data: &[u8]) {
        let len = data.len().min(FTDI_DEFAULT_EEPROM_SIZE);
        self.buf[..len].copy_from_slice(&data[..len]);
    }
}
