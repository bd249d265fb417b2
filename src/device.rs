//! FTDI device handle and USB plumbing.
//!
//! [`FtdiDevice`] represents an opened FT232-family bridge. It owns the USB
//! device and interface for the lifetime of one invocation and provides the
//! vendor control transfers this tool needs: USB reset, bitmode selection,
//! and EEPROM access (see [`crate::eeprom`]).

use std::time::Duration;

use log::debug;
use nusb::transfer::{ControlIn, ControlOut, ControlType, Recipient};
use nusb::{self, DeviceInfo, MaybeFuture};

use crate::constants::*;
use crate::eeprom::FtdiEeprom;
use crate::error::{Error, Result};
use crate::types::{BitMode, ChipType};

/// Control transfer timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// USB string descriptor read timeout (device discovery).
const STRING_TIMEOUT: Duration = Duration::from_secs(1);

/// USB index for interface A; the 0x6001 family is single-interface.
const USB_INDEX: u16 = 1;

/// An opened FTDI USB device.
///
/// Dropping the handle releases the USB interface unconditionally; use
/// [`close`](Self::close) to also return the chip to normal serial mode.
pub struct FtdiDevice {
    #[allow(dead_code)] // Kept to ensure the USB device stays open
    device: nusb::Device,
    interface: nusb::Interface,

    chip_type: ChipType,

    pub(crate) eeprom: FtdiEeprom,
}

impl std::fmt::Debug for FtdiDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtdiDevice")
            .field("chip_type", &self.chip_type)
            .finish_non_exhaustive()
    }
}

// ---- Construction / Opening ----

impl FtdiDevice {
    /// Open the first device matching the given vendor and product IDs and,
    /// if `description` is set, the USB product description string.
    ///
    /// Candidates are opened temporarily to read their string descriptors
    /// when a description match is requested.
    pub fn open_desc(vendor: u16, product: u16, description: Option<&str>) -> Result<Self> {
        let candidates: Vec<DeviceInfo> = nusb::list_devices()
            .wait()?
            .filter(|d| d.vendor_id() == vendor && d.product_id() == product)
            .collect();

        for dev_info in candidates {
            if let Some(expected) = description {
                // The probe handle must be released before the device is
                // reopened for real below.
                let matched = {
                    let device = dev_info.open().wait()?;
                    let desc = device.device_descriptor();

                    match desc.product_string_index() {
                        Some(idx) => {
                            let product_string = device
                                .get_string_descriptor(idx, 0x0409, STRING_TIMEOUT)
                                .wait()
                                .unwrap_or_default();
                            if product_string != expected {
                                debug!("skipping candidate with description {product_string:?}");
                            }
                            product_string == expected
                        }
                        None => false,
                    }
                };
                if !matched {
                    continue;
                }
            }

            return Self::from_device_info(dev_info);
        }

        Err(Error::DeviceNotFound)
    }

    /// Open a device from an already-discovered [`nusb::DeviceInfo`].
    pub fn from_device_info(dev_info: DeviceInfo) -> Result<Self> {
        let device = dev_info.open().wait()?;

        // Detach kernel driver (e.g. ftdi_sio) and claim interface A
        let interface = device.detach_and_claim_interface(0).wait()?;

        // Auto-detect chip type from bcdDevice
        let desc = device.device_descriptor();
        let bcd = desc.device_version();
        let has_serial = desc.serial_number_string_index().is_some();

        let chip_type = match bcd {
            0x0400 => ChipType::Bm,
            0x0200 if !has_serial => ChipType::Bm, // Bug in BM: bcdDevice=0x200 when serial==0
            0x0200 => ChipType::Am,
            0x0600 => ChipType::Ft232R,
            _ => ChipType::Bm, // Default fallback
        };
        debug!("opened device, bcdDevice {bcd:#06x}, chip type {chip_type:?}");

        let ftdi = Self {
            device,
            interface,
            chip_type,
            eeprom: FtdiEeprom::default(),
        };

        ftdi.usb_reset()?;

        Ok(ftdi)
    }

    /// The detected FTDI chip type.
    pub fn chip_type(&self) -> ChipType {
        self.chip_type
    }
}

// ---- Internal USB helpers ----

impl FtdiDevice {
    /// Send a vendor OUT control transfer to the device.
    pub(crate) fn control_out(&self, request: u8, value: u16, index: u16) -> Result<()> {
        self.interface
            .control_out(
                ControlOut {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request,
                    value,
                    index,
                    data: &[],
                },
                DEFAULT_TIMEOUT,
            )
            .wait()?;
        Ok(())
    }

    /// Send a vendor IN control transfer to the device.
    pub(crate) fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>> {
        let data = self
            .interface
            .control_in(
                ControlIn {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request,
                    value,
                    index,
                    length,
                },
                DEFAULT_TIMEOUT,
            )
            .wait()?;
        Ok(data)
    }
}

// ---- Device operations ----

impl FtdiDevice {
    /// Perform a USB reset on the FTDI device, returning it to its default
    /// state.
    pub fn usb_reset(&self) -> Result<()> {
        self.control_out(SIO_RESET_REQUEST, SIO_RESET_SIO, USB_INDEX)
    }

    /// Select a bitbang mode.
    ///
    /// In [`BitMode::Cbus`] the `bitmask` carries the CBUS pin directions in
    /// the upper nibble and the drive levels in the lower nibble; see
    /// [`crate::cbus::pulse_mask`]. `BitMode::Reset` returns the chip to
    /// normal serial operation.
    pub fn set_bitmode(&self, bitmask: u8, mode: BitMode) -> Result<()> {
        let val = (bitmask as u16) | ((mode.wire_value() as u16) << 8);
        debug!("set_bitmode mask {bitmask:#04x} mode {mode:?}");
        self.control_out(SIO_SET_BITMODE_REQUEST, val, USB_INDEX)
            .map_err(|e| Error::Bitmode(Box::new(e)))
    }

    /// Poll the raw modem status word.
    ///
    /// Used as part of the EEPROM write initialization sequence.
    pub(crate) fn poll_modem_status(&self) -> Result<u16> {
        let data = self.control_in(SIO_POLL_MODEM_STATUS_REQUEST, 0, USB_INDEX, 2)?;
        if data.len() < 2 {
            return Err(Error::DeviceUnavailable);
        }
        Ok((data[0] as u16) | ((data[1] as u16) << 8))
    }

    /// Set the latency timer value (1-255 ms).
    pub(crate) fn set_latency_timer(&self, latency_ms: u8) -> Result<()> {
        if latency_ms < 1 {
            return Err(Error::InvalidArgument("latency must be between 1 and 255"));
        }
        self.control_out(SIO_SET_LATENCY_TIMER_REQUEST, latency_ms as u16, USB_INDEX)
    }

    /// Close the device, returning the chip to normal serial mode first.
    ///
    /// Consumes the handle; the USB interface is released on drop regardless
    /// of whether the bitmode reset succeeded.
    pub fn close(self) -> Result<()> {
        let val = (BitMode::Reset.wire_value() as u16) << 8;
        self.control_out(SIO_SET_BITMODE_REQUEST, val, USB_INDEX)
            .map_err(|e| Error::Close(Box::new(e)))
    }

    /// Get a reference to the EEPROM structure.
    pub fn eeprom(&self) -> &FtdiEeprom {
        &self.eeprom
    }

    /// Get a mutable reference to the EEPROM structure.
    pub fn eeprom_mut(&mut self) -> &mut FtdiEeprom {
        &mut self.eeprom
    }
}
