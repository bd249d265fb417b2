//! Command dispatch: one invocation, one device, one operation.
//!
//! Every command opens the fixed EVAL232 board, validates the EEPROM CBUS
//! configuration, then optionally pulses a pin and closes the device. The
//! EEPROM check is a mandatory precondition for the pulse operations, not
//! an optional one: a pin whose role is not IOMODE would silently ignore
//! the drive commands.

use crate::check;
use crate::constants::{FT232_PID, FTDI_VID};
use crate::device::FtdiDevice;
use crate::error::Result;
use crate::pulse::{self, PulseSpec};

/// CBUS pin wired to the target's reset line.
pub const RESET_PIN: u8 = 2;
/// CBUS pin wired to the target's power switch.
pub const POWER_PIN: u8 = 3;

/// USB product description of the supported board.
pub const USB_PRODUCT: &str = "EVAL232 Board USB <-> Serial";

/// The operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Validate (and if needed repair) the EEPROM only.
    Check,
    /// Pulse the reset pin for 1 second.
    Reset,
    /// Pulse the power pin for 1 second.
    Power,
    /// Pulse the power pin for 5 seconds (forced power-off).
    LongPower,
}

impl Command {
    /// Parse a command-line verb. Matching is exact and case-sensitive.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "check" => Some(Self::Check),
            "reset" => Some(Self::Reset),
            "power" => Some(Self::Power),
            "longpower" => Some(Self::LongPower),
            _ => None,
        }
    }

    /// The pulse this command performs, if any.
    pub fn pulse_spec(self) -> Option<PulseSpec> {
        match self {
            Self::Check => None,
            Self::Reset => Some(PulseSpec::seconds(RESET_PIN, 1)),
            Self::Power => Some(PulseSpec::seconds(POWER_PIN, 1)),
            Self::LongPower => Some(PulseSpec::seconds(POWER_PIN, 5)),
        }
    }

    /// Name of the line being pulsed, for progress output.
    fn pulse_label(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            _ => "power",
        }
    }
}

/// Execute one command against the board.
///
/// The device handle is released on every path: explicitly via
/// [`FtdiDevice::close`] on success, by drop on any failure.
pub fn run(cmd: Command) -> Result<()> {
    println!("Searching for device {FTDI_VID:#06x} {FT232_PID:#06x}, {USB_PRODUCT}");
    let mut dev = FtdiDevice::open_desc(FTDI_VID, FT232_PID, Some(USB_PRODUCT))?;

    println!("Checking EEPROM");
    check::check_and_repair(&mut dev)?;

    if let Some(spec) = cmd.pulse_spec() {
        println!(
            "Toggling {} for {} second(s)",
            cmd.pulse_label(),
            spec.hold.as_secs()
        );
        pulse::pulse(&dev, spec)?;
    }

    dev.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn verbs_parse_exactly() {
        assert_eq!(Command::from_verb("check"), Some(Command::Check));
        assert_eq!(Command::from_verb("reset"), Some(Command::Reset));
        assert_eq!(Command::from_verb("power"), Some(Command::Power));
        assert_eq!(Command::from_verb("longpower"), Some(Command::LongPower));
    }

    #[test]
    fn verb_matching_is_case_sensitive() {
        assert_eq!(Command::from_verb("Check"), None);
        assert_eq!(Command::from_verb("POWER"), None);
        assert_eq!(Command::from_verb("long power"), None);
        assert_eq!(Command::from_verb(""), None);
        assert_eq!(Command::from_verb("bogus"), None);
    }

    #[test]
    fn check_performs_no_pulse() {
        assert_eq!(Command::Check.pulse_spec(), None);
    }

    #[test]
    fn pulse_pins_and_durations_are_fixed() {
        let reset = Command::Reset.pulse_spec().unwrap();
        assert_eq!(reset.pin, RESET_PIN);
        assert_eq!(reset.hold, Duration::from_secs(1));

        let power = Command::Power.pulse_spec().unwrap();
        assert_eq!(power.pin, POWER_PIN);
        assert_eq!(power.hold, Duration::from_secs(1));

        let long_power = Command::LongPower.pulse_spec().unwrap();
        assert_eq!(long_power.pin, POWER_PIN);
        assert_eq!(long_power.hold, Duration::from_secs(5));
    }
}
