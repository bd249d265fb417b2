//! Out-of-band power and reset control through an FTDI USB-serial bridge.
//!
//! This crate drives the CBUS auxiliary pins of an FTDI EVAL232 board
//! (FT232-family bridge, VID 0x0403 / PID 0x6001) to power-cycle or reset
//! whatever is wired to them. It talks to the chip directly over
//! [nusb](https://crates.io/crates/nusb) — no C dependencies or `libusb`
//! required.
//!
//! CBUS pins only act as software-controlled outputs when their EEPROM
//! function assignment is `IOMODE`, so every operation first validates the
//! EEPROM configuration and repairs it if pin 2 or pin 3 is assigned to
//! anything else. See [`check`] for the validator and [`pulse`] for the
//! timed high-then-low pulse sequencing.
//!
//! # Quick start
//!
//! ```no_run
//! use ftdi_pwr::control::{self, Command};
//!
//! control::run(Command::Power)?;
//! # Ok::<(), ftdi_pwr::Error>(())
//! ```

pub mod cbus;
pub mod check;
pub mod constants;
pub mod control;
pub mod device;
pub mod eeprom;
pub mod error;
pub mod pulse;
pub mod types;

// ---- Convenience re-exports ----

pub use cbus::CbusFunction;
pub use control::Command;
pub use device::FtdiDevice;
pub use eeprom::FtdiEeprom;
pub use error::{Error, Result};
pub use pulse::PulseSpec;
pub use types::{BitMode, ChipType};
