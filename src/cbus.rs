//! CBUS pin roles and the bitmode mask encoding.
//!
//! The FT232R has five CBUS auxiliary pins. Each pin's hardware role is a
//! 4-bit code stored in the EEPROM ([`CbusFunction`]); a pin only obeys
//! software drive commands when its role is [`CbusFunction::IoMode`].
//!
//! In CBUS bitbang mode all five pins are configured at once through one
//! control byte, computed here by [`pulse_mask`].

use std::fmt;

/// Number of CBUS pins on the FT232R.
pub const CBUS_PIN_COUNT: usize = 5;

/// Highest pin index addressable by the CBUS bitmode mask.
///
/// The mask interleaves direction and level nibbles, so only pins 0-3 can
/// be driven; pin 4 has no direction bit.
pub const MAX_DRIVABLE_PIN: u8 = 3;

/// Role code for the general bidirectional I/O function.
pub const IOMODE: u8 = 0x0A;

/// Hardware role of a CBUS pin, as stored in the FT232R EEPROM.
///
/// The chip defines 13 roles (codes 0-12). Codes outside that range decode
/// to [`Unknown`](Self::Unknown) rather than being interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CbusFunction {
    /// TX Data Enable.
    TxdEnable,
    /// Power Enable.
    PowerEnable,
    /// RX LED (active low).
    RxLed,
    /// TX LED (active low).
    TxLed,
    /// Combined TX/RX LED (active low).
    TxRxLed,
    /// Sleep.
    Sleep,
    /// 48 MHz clock output.
    Clk48,
    /// 24 MHz clock output.
    Clk24,
    /// 12 MHz clock output.
    Clk12,
    /// 6 MHz clock output.
    Clk6,
    /// General bidirectional I/O (CBUS bitbang).
    IoMode,
    /// Bitbang write strobe.
    BitbangWr,
    /// Bitbang read strobe.
    BitbangRd,
    /// A code the chip documentation does not define.
    Unknown(u8),
}

impl CbusFunction {
    /// Decode a raw EEPROM role code.
    pub fn from_raw(code: u8) -> Self {
        match code {
            0 => Self::TxdEnable,
            1 => Self::PowerEnable,
            2 => Self::RxLed,
            3 => Self::TxLed,
            4 => Self::TxRxLed,
            5 => Self::Sleep,
            6 => Self::Clk48,
            7 => Self::Clk24,
            8 => Self::Clk12,
            9 => Self::Clk6,
            10 => Self::IoMode,
            11 => Self::BitbangWr,
            12 => Self::BitbangRd,
            other => Self::Unknown(other),
        }
    }

    /// The raw EEPROM role code.
    pub fn raw(self) -> u8 {
        match self {
            Self::TxdEnable => 0,
            Self::PowerEnable => 1,
            Self::RxLed => 2,
            Self::TxLed => 3,
            Self::TxRxLed => 4,
            Self::Sleep => 5,
            Self::Clk48 => 6,
            Self::Clk24 => 7,
            Self::Clk12 => 8,
            Self::Clk6 => 9,
            Self::IoMode => 10,
            Self::BitbangWr => 11,
            Self::BitbangRd => 12,
            Self::Unknown(code) => code,
        }
    }

    /// The datasheet name of the role.
    pub fn name(self) -> &'static str {
        match self {
            Self::TxdEnable => "TXDEN",
            Self::PowerEnable => "PWREN",
            Self::RxLed => "RXLED",
            Self::TxLed => "TXLED",
            Self::TxRxLed => "TX+RXLED",
            Self::Sleep => "SLEEP",
            Self::Clk48 => "CLK48",
            Self::Clk24 => "CLK24",
            Self::Clk12 => "CLK12",
            Self::Clk6 => "CLK6",
            Self::IoMode => "IOMODE",
            Self::BitbangWr => "BB_WR",
            Self::BitbangRd => "BB_RD",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for CbusFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute the CBUS bitmode mask that drives a single pin.
///
/// The control byte interleaves two nibbles:
///
/// ```text
/// CBUS bits  3210 3210
///            xxxx xxxx
///            |    |------ Output level   0 -> low,   1 -> high
///            |----------- Direction      0 -> input, 1 -> output
/// ```
///
/// The returned mask puts `pin` in output mode at the requested level and
/// leaves every other pin as input/low.
///
/// # Panics
///
/// Panics if `pin` is greater than [`MAX_DRIVABLE_PIN`].
pub fn pulse_mask(pin: u8, drive_high: bool) -> u8 {
    assert!(pin <= MAX_DRIVABLE_PIN, "CBUS pin index out of range");
    if drive_high {
        0x11 << pin
    } else {
        0x10 << pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_round_trip() {
        for code in 0..13u8 {
            let f = CbusFunction::from_raw(code);
            assert_eq!(f.raw(), code);
            assert!(!matches!(f, CbusFunction::Unknown(_)));
        }
    }

    #[test]
    fn out_of_range_codes_are_unknown() {
        for code in 13..=0xFFu8 {
            let f = CbusFunction::from_raw(code);
            assert_eq!(f, CbusFunction::Unknown(code));
            assert_eq!(f.raw(), code);
            assert_eq!(f.name(), "UNKNOWN");
        }
    }

    #[test]
    fn io_mode_is_code_ten() {
        assert_eq!(CbusFunction::IoMode.raw(), IOMODE);
        assert_eq!(CbusFunction::IoMode.name(), "IOMODE");
    }

    #[test]
    fn mask_sets_direction_and_level_bits() {
        for pin in 0..=MAX_DRIVABLE_PIN {
            let high = pulse_mask(pin, true);
            let low = pulse_mask(pin, false);
            assert_eq!(high, (1 << pin) | (1 << (pin + 4)));
            assert_eq!(low, 1 << (pin + 4));
            // No other pin is driven
            assert_eq!(high & !(0x11 << pin), 0);
            assert_eq!(low & !(0x11 << pin), 0);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn mask_rejects_pin_without_direction_bit() {
        pulse_mask(4, true);
    }
}
