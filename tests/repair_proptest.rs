//! Property-based tests for the EEPROM CBUS repair routine.
//!
//! Uses `proptest` to generate CBUS role assignments, round-trip them
//! through build() and decode(), and verify the repair policy: whenever
//! pin 2 or pin 3 is not IOMODE, both end up IOMODE and nothing else in
//! the image is disturbed.

use ftdi_pwr::cbus;
use ftdi_pwr::check::{needs_repair, prepare_for_build};
use ftdi_pwr::constants::FTDI_DEFAULT_EEPROM_SIZE;
use ftdi_pwr::eeprom::{build::build, decode::decode, FtdiEeprom};
use ftdi_pwr::ChipType;
use proptest::prelude::*;

/// Generate a short ASCII string suitable for the EEPROM string area.
fn short_ascii_string() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,12}"
}

/// Generate a raw CBUS role code as stored in an EEPROM nibble.
fn cbus_code() -> impl Strategy<Value = u8> {
    0u8..=0x0F
}

/// Build a device-style image carrying the given CBUS assignments, then
/// decode it into a fresh structure the way the validator sees it.
fn decoded_image(cbus_function: [u8; 5], product: &str) -> FtdiEeprom {
    let mut source = FtdiEeprom::default();
    source.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
    source.cbus_function = cbus_function;
    source.product = Some(product.to_owned());
    build(&mut source, ChipType::Ft232R).expect("build of source image failed");

    let mut decoded = FtdiEeprom::default();
    decoded.set_raw_buf(&source.buf);
    decode(&mut decoded, ChipType::Ft232R).expect("decode of source image failed");
    decoded
}

proptest! {
    /// The repair decision fires exactly when pin 2 or pin 3 is wrong.
    #[test]
    fn repair_decision_matches_pin_state(
        pin0 in cbus_code(),
        pin1 in cbus_code(),
        pin2 in cbus_code(),
        pin3 in cbus_code(),
        pin4 in cbus_code(),
    ) {
        let decoded = decoded_image([pin0, pin1, pin2, pin3, pin4], "EVAL232");
        let expected = pin2 != cbus::IOMODE || pin3 != cbus::IOMODE;
        prop_assert_eq!(needs_repair(&decoded), expected);
    }

    /// After repair and re-encode, both control pins read IOMODE and the
    /// bystander pins are untouched.
    #[test]
    fn repair_round_trip_fixes_both_pins(
        pin0 in cbus_code(),
        pin1 in cbus_code(),
        pin2 in cbus_code(),
        pin3 in cbus_code(),
        pin4 in cbus_code(),
        product in short_ascii_string(),
    ) {
        let mut decoded = decoded_image([pin0, pin1, pin2, pin3, pin4], &product);

        prepare_for_build(&mut decoded);
        build(&mut decoded, ChipType::Ft232R).expect("rebuild failed");

        let mut reread = FtdiEeprom::default();
        reread.set_raw_buf(&decoded.buf);
        decode(&mut reread, ChipType::Ft232R).expect("decode of rebuilt image failed");

        prop_assert_eq!(reread.cbus_function[2], cbus::IOMODE);
        prop_assert_eq!(reread.cbus_function[3], cbus::IOMODE);
        prop_assert_eq!(reread.cbus_function[0], pin0);
        prop_assert_eq!(reread.cbus_function[1], pin1);
        prop_assert_eq!(reread.cbus_function[4], pin4);
        prop_assert!(!needs_repair(&reread));
    }

    /// The decoded structure carries no size; the repair path must patch it
    /// to the standard image size before the rebuild succeeds.
    #[test]
    fn size_guard_makes_decoded_image_buildable(
        pin2 in cbus_code(),
        pin3 in cbus_code(),
    ) {
        let mut decoded = decoded_image([0, 1, pin2, pin3, 5], "EVAL232");
        prop_assert_eq!(decoded.size, 0);

        // Without the guard the rebuild is refused outright
        prop_assert!(build(&mut decoded.clone(), ChipType::Ft232R).is_err());

        prepare_for_build(&mut decoded);
        prop_assert_eq!(decoded.size, FTDI_DEFAULT_EEPROM_SIZE as i32);
        prop_assert!(build(&mut decoded, ChipType::Ft232R).is_ok());
    }

    /// A corrupted image fails decoding, and the aborted run leaves the
    /// structure in a state both build() and the device write refuse, so
    /// no rebuilt image can reach the EEPROM.
    #[test]
    fn corrupted_image_cannot_be_rebuilt(
        byte in 0usize..FTDI_DEFAULT_EEPROM_SIZE - 2,
        flip in 1u8..=0xFF,
    ) {
        let mut source = FtdiEeprom::default();
        source.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
        source.cbus_function = [0, 1, 5, 5, 5];
        build(&mut source, ChipType::Ft232R).expect("build of source image failed");

        let mut decoded = FtdiEeprom::default();
        decoded.set_raw_buf(&source.buf);
        decoded.buf[byte] ^= flip;

        prop_assert!(decode(&mut decoded, ChipType::Ft232R).is_err());
        prop_assert!(!decoded.initialized_for_connected_device);
        prop_assert!(build(&mut decoded, ChipType::Ft232R).is_err());
    }

    /// The repair must not lose the product description the device is
    /// matched by, nor the other identification fields.
    #[test]
    fn repair_preserves_identification(
        pin2 in cbus_code(),
        pin3 in cbus_code(),
        product in short_ascii_string(),
    ) {
        let mut decoded = decoded_image([0, 1, pin2, pin3, 5], &product);

        prepare_for_build(&mut decoded);
        build(&mut decoded, ChipType::Ft232R).expect("rebuild failed");

        let mut reread = FtdiEeprom::default();
        reread.set_raw_buf(&decoded.buf);
        decode(&mut reread, ChipType::Ft232R).expect("decode of rebuilt image failed");

        prop_assert_eq!(reread.product.as_deref(), Some(product.as_str()));
        prop_assert_eq!(reread.vendor_id, 0x0403);
        prop_assert_eq!(reread.product_id, 0x6001);
    }
}
