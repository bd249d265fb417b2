//! EEPROM decoding: parse a binary EEPROM image into an [`FtdiEeprom`] struct.

use crate::constants::FTDI_DEFAULT_EEPROM_SIZE;
use crate::error::{Error, Result};
use crate::types::ChipType;

use super::build::checksum;
use super::FtdiEeprom;

/// Decode a string descriptor from the EEPROM buffer.
///
/// The EEPROM stores strings as USB string descriptors: length byte,
/// type byte (0x03), then UTF-16LE characters. We only take the low
/// byte of each character (ASCII subset).
fn decode_string(
    buf: &[u8],
    eeprom_size: usize,
    offset_addr: usize,
    length_addr: usize,
) -> Option<String> {
    let raw_len = buf[length_addr] as usize;
    let char_count = raw_len / 2;
    if char_count <= 1 {
        return None;
    }

    let mask = eeprom_size - 1;
    let start = (buf[offset_addr] as usize) & mask;

    let mut s = String::with_capacity(char_count - 1);
    for j in 0..char_count - 1 {
        let idx = (start + 2 + j * 2) & mask;
        if idx < buf.len() {
            s.push(buf[idx] as char);
        }
    }

    Some(s)
}

/// Decode a binary EEPROM image into an [`FtdiEeprom`] structure.
///
/// The `chip_type` is needed to interpret chip-specific fields; CBUS
/// functions are only present on the FT232R. The EEPROM checksum is
/// verified; an error is returned on mismatch.
///
/// The `size` field is left untouched: callers that intend to re-encode
/// the structure must ensure it is positive first (see
/// [`build`](super::build::build)).
pub fn decode(eeprom: &mut FtdiEeprom, chip_type: ChipType) -> Result<()> {
    let eeprom_size = FTDI_DEFAULT_EEPROM_SIZE;

    // Verify checksum
    let computed = checksum(&eeprom.buf, eeprom_size);
    let stored = (eeprom.buf[eeprom_size - 2] as u16) | ((eeprom.buf[eeprom_size - 1] as u16) << 8);
    if computed != stored {
        return Err(Error::EepromChecksum);
    }

    // Common fields
    eeprom.vendor_id = (eeprom.buf[0x02] as u16) | ((eeprom.buf[0x03] as u16) << 8);
    eeprom.product_id = (eeprom.buf[0x04] as u16) | ((eeprom.buf[0x05] as u16) << 8);
    eeprom.release_number = (eeprom.buf[0x06] as u16) | ((eeprom.buf[0x07] as u16) << 8);
    eeprom.self_powered = eeprom.buf[0x08] & 0x40 != 0;
    eeprom.remote_wakeup = eeprom.buf[0x08] & 0x20 != 0;
    eeprom.max_power = (eeprom.buf[0x09] as u16) * 2;

    // Config byte 0x0A
    eeprom.in_is_isochronous = eeprom.buf[0x0A] & 0x01 != 0;
    eeprom.out_is_isochronous = eeprom.buf[0x0A] & 0x02 != 0;
    eeprom.suspend_pull_downs = eeprom.buf[0x0A] & 0x04 != 0;
    eeprom.use_serial = eeprom.buf[0x0A] & 0x08 != 0;
    eeprom.use_usb_version = eeprom.buf[0x0A] & 0x10 != 0;

    // USB version
    eeprom.usb_version = (eeprom.buf[0x0C] as u16) | ((eeprom.buf[0x0D] as u16) << 8);

    // Strings
    eeprom.manufacturer = decode_string(&eeprom.buf, eeprom_size, 0x0E, 0x0F);
    eeprom.product = decode_string(&eeprom.buf, eeprom_size, 0x10, 0x11);
    eeprom.serial = decode_string(&eeprom.buf, eeprom_size, 0x12, 0x13);

    // Chip-specific decoding
    if chip_type.has_cbus() {
        // R-type inverts the VCP flag
        eeprom.channel_a_driver = eeprom.buf[0x00] & 0x08 == 0;
        eeprom.high_current = eeprom.buf[0x00] & 0x04 != 0;
        eeprom.external_oscillator = eeprom.buf[0x00] & 0x02 != 0;
        eeprom.invert = eeprom.buf[0x0B];
        // CBUS functions (packed into nibbles)
        eeprom.cbus_function[0] = eeprom.buf[0x14] & 0x0F;
        eeprom.cbus_function[1] = (eeprom.buf[0x14] >> 4) & 0x0F;
        eeprom.cbus_function[2] = eeprom.buf[0x15] & 0x0F;
        eeprom.cbus_function[3] = (eeprom.buf[0x15] >> 4) & 0x0F;
        eeprom.cbus_function[4] = eeprom.buf[0x16] & 0x0F;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::build::{build, checksum};
    use super::*;

    #[test]
    fn checksum_mismatch_is_rejected() {
        let mut eeprom = FtdiEeprom::default();
        eeprom.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
        build(&mut eeprom, ChipType::Ft232R).unwrap();

        // Corrupt one payload byte without fixing the checksum
        eeprom.buf[0x09] ^= 0xFF;
        assert!(matches!(
            decode(&mut eeprom, ChipType::Ft232R),
            Err(Error::EepromChecksum)
        ));
    }

    #[test]
    fn decode_does_not_set_size() {
        let mut source = FtdiEeprom::default();
        source.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
        build(&mut source, ChipType::Ft232R).unwrap();

        let mut decoded = FtdiEeprom::default();
        decoded.set_raw_buf(&source.buf);
        decode(&mut decoded, ChipType::Ft232R).unwrap();
        assert_eq!(decoded.size, 0);
    }

    #[test]
    fn cbus_functions_only_decoded_for_r_type() {
        let mut source = FtdiEeprom::default();
        source.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
        source.cbus_function = [5, 5, 5, 5, 5];
        build(&mut source, ChipType::Ft232R).unwrap();

        let mut decoded = FtdiEeprom::default();
        decoded.set_raw_buf(&source.buf);
        decode(&mut decoded, ChipType::Bm).unwrap();
        assert_eq!(decoded.cbus_function, [0; 5]);
    }

    #[test]
    fn failed_decode_leaves_structure_unwritable() {
        let mut eeprom = FtdiEeprom::default();
        // All-zero raw image: the stored checksum word cannot match
        assert!(matches!(
            decode(&mut eeprom, ChipType::Ft232R),
            Err(Error::EepromChecksum)
        ));

        // The structure was never marked built for a device and carries no
        // size, so a rebuild is refused and a device write would be too.
        assert!(!eeprom.initialized_for_connected_device);
        assert_eq!(eeprom.size, 0);
        assert!(build(&mut eeprom, ChipType::Ft232R).is_err());
    }

    #[test]
    fn stored_checksum_matches_algorithm() {
        let mut eeprom = FtdiEeprom::default();
        eeprom.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
        build(&mut eeprom, ChipType::Bm).unwrap();

        let stored = (eeprom.buf[FTDI_DEFAULT_EEPROM_SIZE - 2] as u16)
            | ((eeprom.buf[FTDI_DEFAULT_EEPROM_SIZE - 1] as u16) << 8);
        assert_eq!(stored, checksum(&eeprom.buf, FTDI_DEFAULT_EEPROM_SIZE));
    }
}
