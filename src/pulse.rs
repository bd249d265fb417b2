//! Timed CBUS pulse sequencing.
//!
//! A pulse drives one CBUS pin high, holds it for a fixed duration, then
//! drives it low again, leaving every other pin as input/low throughout.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::cbus;
use crate::device::FtdiDevice;
use crate::error::Result;
use crate::types::BitMode;

/// A single high-then-low pulse on one CBUS pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseSpec {
    /// Target pin index (0-3).
    pub pin: u8,
    /// How long the pin is held high.
    pub hold: Duration,
}

impl PulseSpec {
    /// A pulse holding `pin` high for a whole number of seconds.
    pub const fn seconds(pin: u8, secs: u64) -> Self {
        assert!(pin <= cbus::MAX_DRIVABLE_PIN, "CBUS pin index out of range");
        Self {
            pin,
            hold: Duration::from_secs(secs),
        }
    }

    /// Bitmode mask for the high phase (pin in output mode, driven high).
    pub fn drive_high_mask(self) -> u8 {
        cbus::pulse_mask(self.pin, true)
    }

    /// Bitmode mask for the low phase (pin in output mode, driven low).
    pub fn drive_low_mask(self) -> u8 {
        cbus::pulse_mask(self.pin, false)
    }
}

/// Execute a pulse on an open device.
///
/// Blocks the calling thread for the hold duration. If the high transition
/// fails, the low transition is not attempted and the error is returned;
/// releasing the device handle is the caller's responsibility.
pub fn pulse(dev: &FtdiDevice, spec: PulseSpec) -> Result<()> {
    debug!("pulsing CBUS{} for {:?}", spec.pin, spec.hold);

    dev.set_bitmode(spec.drive_high_mask(), BitMode::Cbus)?;
    thread::sleep(spec.hold);
    dev.set_bitmode(spec.drive_low_mask(), BitMode::Cbus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_follow_the_interleaved_layout() {
        let spec = PulseSpec::seconds(2, 1);
        assert_eq!(spec.drive_high_mask(), 0x44);
        assert_eq!(spec.drive_low_mask(), 0x40);

        let spec = PulseSpec::seconds(3, 5);
        assert_eq!(spec.drive_high_mask(), 0x88);
        assert_eq!(spec.drive_low_mask(), 0x80);
    }

    #[test]
    fn hold_is_whole_seconds() {
        assert_eq!(PulseSpec::seconds(0, 5).hold, Duration::from_secs(5));
    }
}
