//! EEPROM validator and repairer.
//!
//! The reset and power pins only work as software-controlled outputs when
//! their EEPROM role is IOMODE. Every invocation of this tool runs
//! [`check_and_repair`] before any pin is toggled: it reads and decodes the
//! EEPROM, prints the CBUS assignments, and rewrites the EEPROM if either
//! pin is assigned to anything else.

use log::debug;

use crate::cbus::{self, CbusFunction};
use crate::constants::FTDI_DEFAULT_EEPROM_SIZE;
use crate::control::{POWER_PIN, RESET_PIN};
use crate::device::FtdiDevice;
use crate::eeprom::FtdiEeprom;
use crate::error::Result;

/// Validate the CBUS configuration, repairing the EEPROM if needed.
///
/// When both pins already hold IOMODE the pin table is printed once and no
/// write is issued. Any read, decode, build, or write failure aborts
/// without touching the device further.
pub fn check_and_repair(dev: &mut FtdiDevice) -> Result<()> {
    dev.read_eeprom()?;
    dev.eeprom_decode()?;

    print_cbus(dev.eeprom());

    if !needs_repair(dev.eeprom()) {
        debug!("CBUS configuration is correct, no write needed");
        return Ok(());
    }

    println!("CBUS{RESET_PIN} or CBUS{POWER_PIN} is wrong, fixing...");
    prepare_for_build(dev.eeprom_mut());
    dev.eeprom_build()?;
    dev.write_eeprom()?;

    print_cbus(dev.eeprom());
    Ok(())
}

/// Whether the reset or power pin is assigned to a role other than IOMODE.
pub fn needs_repair(eeprom: &FtdiEeprom) -> bool {
    eeprom.cbus_function[RESET_PIN as usize] != cbus::IOMODE
        || eeprom.cbus_function[POWER_PIN as usize] != cbus::IOMODE
}

/// Force both control pins to IOMODE and make the structure buildable.
///
/// The pins are always fixed as a pair, even when only one was wrong.
/// Decode leaves the `size` field unset, which would make the rebuilt
/// image malformed, so it is patched here as well.
pub fn prepare_for_build(eeprom: &mut FtdiEeprom) {
    eeprom.cbus_function[RESET_PIN as usize] = cbus::IOMODE;
    eeprom.cbus_function[POWER_PIN as usize] = cbus::IOMODE;

    if eeprom.size <= 0 {
        eeprom.size = FTDI_DEFAULT_EEPROM_SIZE as i32;
    }
}

/// Print the role of every CBUS pin, one line per pin.
fn print_cbus(eeprom: &FtdiEeprom) {
    for (i, &code) in eeprom.cbus_function.iter().enumerate() {
        println!("CBUS{i}: {code:2}({})", CbusFunction::from_raw(code));
    }
}
