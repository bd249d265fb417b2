//! EEPROM encoding: convert a decoded [`FtdiEeprom`] struct into the binary format.

use crate::constants::{FTDI_DEFAULT_EEPROM_SIZE, MAX_POWER_MILLIAMP_PER_UNIT};
use crate::error::{Error, Result};
use crate::types::ChipType;

use super::FtdiEeprom;

/// Compute the EEPROM checksum over a buffer.
///
/// The algorithm is: XOR each 16-bit word, then rotate-left-1 the accumulator.
/// Starting seed is 0xAAAA.
pub(crate) fn checksum(buf: &[u8], size: usize) -> u16 {
    let mut csum: u16 = 0xAAAA;
    for i in 0..size / 2 - 1 {
        let value = (buf[i * 2] as u16) | ((buf[i * 2 + 1] as u16) << 8);
        csum ^= value;
        csum = csum.rotate_left(1);
    }
    csum
}

/// Encode a UTF-16LE string descriptor into the EEPROM buffer at position `pos`.
///
/// Returns the number of bytes written (including the length/type header).
fn write_string_descriptor(buf: &mut [u8], mask: u8, pos: &mut usize, s: &str) -> usize {
    let char_count = s.len();
    let total_len = char_count * 2 + 2; // UTF-16LE + length/type

    let idx = *pos & (mask as usize);
    buf[idx] = total_len as u8;
    *pos += 1;
    let idx = *pos & (mask as usize);
    buf[idx] = 0x03; // USB string descriptor type
    *pos += 1;

    for ch in s.bytes() {
        let idx = *pos & (mask as usize);
        buf[idx] = ch;
        *pos += 1;
        let idx = *pos & (mask as usize);
        buf[idx] = 0x00;
        *pos += 1;
    }

    total_len
}

/// Build the binary EEPROM image from a decoded structure.
///
/// The `size` field must be positive; [`decode`](super::decode::decode)
/// does not establish it, so callers repair it first. Returns the number
/// of bytes left for user data, or an error.
pub fn build(eeprom: &mut FtdiEeprom, chip_type: ChipType) -> Result<usize> {
    if eeprom.size <= 0 {
        return Err(Error::Eeprom("invalid EEPROM size".into()));
    }
    let eeprom_size = eeprom.size as usize;
    if eeprom_size > eeprom.buf.len() {
        return Err(Error::Eeprom("EEPROM size exceeds image buffer".into()));
    }

    let manufacturer_size = eeprom.manufacturer.as_ref().map_or(0, |s| s.len());
    let product_size = eeprom.product.as_ref().map_or(0, |s| s.len());
    let serial_size = eeprom.serial.as_ref().map_or(0, |s| s.len());

    // String area shared with user data (96 bytes on this chip family)
    let user_area_base = 96;
    let string_space = (manufacturer_size + product_size + serial_size) * 2;
    if string_space > user_area_base {
        return Err(Error::EepromSizeExceeded);
    }
    let user_area_size = user_area_base - string_space;

    eeprom.buf[..FTDI_DEFAULT_EEPROM_SIZE].fill(0);

    // Common fields
    eeprom.buf[0x02] = eeprom.vendor_id as u8;
    eeprom.buf[0x03] = (eeprom.vendor_id >> 8) as u8;
    eeprom.buf[0x04] = eeprom.product_id as u8;
    eeprom.buf[0x05] = (eeprom.product_id >> 8) as u8;
    eeprom.buf[0x06] = eeprom.release_number as u8;
    eeprom.buf[0x07] = (eeprom.release_number >> 8) as u8;

    // Config descriptor byte 0x08
    let mut cfg = 0x80u8;
    if eeprom.self_powered {
        cfg |= 0x40;
    }
    if eeprom.remote_wakeup {
        cfg |= 0x20;
    }
    eeprom.buf[0x08] = cfg;

    // Max power
    eeprom.buf[0x09] = (eeprom.max_power / MAX_POWER_MILLIAMP_PER_UNIT) as u8;

    // Chip configuration byte 0x0A
    if chip_type != ChipType::Am {
        let mut j = 0u8;
        if eeprom.in_is_isochronous {
            j |= 0x01;
        }
        if eeprom.out_is_isochronous {
            j |= 0x02;
        }
        if eeprom.suspend_pull_downs {
            j |= 0x04;
        }
        if eeprom.use_serial {
            j |= 0x08;
        }
        if eeprom.use_usb_version {
            j |= 0x10;
        }
        eeprom.buf[0x0A] = j;
    }

    // String descriptors
    let string_start = match chip_type {
        ChipType::Ft232R => 0x98,
        ChipType::Am | ChipType::Bm => 0x94,
    };

    let size_mask = (eeprom_size - 1) as u8;
    let mut pos = string_start;

    // Manufacturer string
    eeprom.buf[0x0E] = pos as u8;
    let mfr_len = if let Some(ref mfr) = eeprom.manufacturer {
        write_string_descriptor(&mut eeprom.buf, size_mask, &mut pos, mfr)
    } else {
        0
    };
    eeprom.buf[0x0F] = mfr_len as u8;

    // Product string
    eeprom.buf[0x10] = (pos as u8) | 0x80;
    let prod_len = if let Some(ref prod) = eeprom.product {
        write_string_descriptor(&mut eeprom.buf, size_mask, &mut pos, prod)
    } else {
        0
    };
    eeprom.buf[0x11] = prod_len as u8;

    // Serial string
    eeprom.buf[0x12] = (pos as u8) | 0x80;
    let ser_len = if let Some(ref ser) = eeprom.serial {
        write_string_descriptor(&mut eeprom.buf, size_mask, &mut pos, ser)
    } else {
        0
    };
    eeprom.buf[0x13] = ser_len as u8;

    // PnP and legacy fields (FT232R only in this family)
    if chip_type == ChipType::Ft232R {
        let idx = pos & (size_mask as usize);
        eeprom.buf[idx] = 0x02;
        pos += 1;
        let idx = pos & (size_mask as usize);
        eeprom.buf[idx] = 0x03;
        pos += 1;
        let idx = pos & (size_mask as usize);
        eeprom.buf[idx] = if eeprom.is_not_pnp { 1 } else { 0 };
        pos += 1;
    }
    let _ = pos;

    // Chip-specific fields
    match chip_type {
        ChipType::Am => {}
        ChipType::Bm => {
            eeprom.buf[0x0C] = eeprom.usb_version as u8;
            eeprom.buf[0x0D] = (eeprom.usb_version >> 8) as u8;
        }
        ChipType::Ft232R => {
            if eeprom.high_current {
                eeprom.buf[0x00] |= 0x04; // HIGH_CURRENT_DRIVE_R
            }
            // Field is inverted for the R type: bit 3 set = D2XX, clear = VCP
            if !eeprom.channel_a_driver {
                eeprom.buf[0x00] |= 0x08;
            }
            if eeprom.external_oscillator {
                eeprom.buf[0x00] |= 0x02;
            }
            eeprom.buf[0x01] = 0x40;
            eeprom.buf[0x0B] = eeprom.invert;
            eeprom.buf[0x0C] = eeprom.usb_version as u8;
            eeprom.buf[0x0D] = (eeprom.usb_version >> 8) as u8;
            // CBUS functions (packed into nibbles)
            eeprom.buf[0x14] =
                (eeprom.cbus_function[0] & 0x0F) | ((eeprom.cbus_function[1] & 0x0F) << 4);
            eeprom.buf[0x15] =
                (eeprom.cbus_function[2] & 0x0F) | ((eeprom.cbus_function[3] & 0x0F) << 4);
            eeprom.buf[0x16] = eeprom.cbus_function[4] & 0x0F;
        }
    }

    // Checksum
    let csum = checksum(&eeprom.buf, eeprom_size);
    eeprom.buf[eeprom_size - 2] = csum as u8;
    eeprom.buf[eeprom_size - 1] = (csum >> 8) as u8;

    eeprom.initialized_for_connected_device = true;
    Ok(user_area_size)
}
