//! EEPROM USB I/O operations: reading and writing the physical EEPROM.

use log::debug;

use crate::constants::*;
use crate::device::FtdiDevice;
use crate::error::{Error, Result};

impl FtdiDevice {
    /// Read the entire configuration EEPROM from the device.
    ///
    /// Performs 64 USB control transfers (2 bytes each) to read the full
    /// 128-byte image into `self.eeprom.buf`. The `size` field is not
    /// touched; see [`build`](super::build::build).
    pub fn read_eeprom(&mut self) -> Result<()> {
        for i in 0..FTDI_DEFAULT_EEPROM_SIZE / 2 {
            let data = self
                .control_in(SIO_READ_EEPROM_REQUEST, 0, i as u16, 2)
                .map_err(|e| Error::EepromRead(Box::new(e)))?;
            if data.len() < 2 {
                return Err(Error::EepromRead(Box::new(Error::Eeprom(
                    "short transfer".into(),
                ))));
            }
            self.eeprom.buf[i * 2] = data[0];
            self.eeprom.buf[i * 2 + 1] = data[1];
        }
        debug!("read {FTDI_DEFAULT_EEPROM_SIZE} EEPROM bytes");
        Ok(())
    }

    /// Write the EEPROM image to the device.
    ///
    /// The image must have been produced by [`eeprom_build`](Self::eeprom_build).
    /// Performs the same initialization sequence observed from FTDI's MProg
    /// tool before writing the image as 16-bit words.
    pub fn write_eeprom(&mut self) -> Result<()> {
        if !self.eeprom.initialized_for_connected_device {
            return Err(Error::Eeprom(
                "EEPROM not initialized for the connected device".into(),
            ));
        }
        if self.eeprom.size <= 0 {
            return Err(Error::Eeprom("invalid EEPROM size".into()));
        }
        let eeprom_size = (self.eeprom.size as usize).min(self.eeprom.buf.len());

        // Initialization sequence (from MProg traces)
        self.usb_reset()?;
        let _ = self.poll_modem_status();
        let _ = self.set_latency_timer(0x77);

        for i in 0..eeprom_size / 2 {
            let val = (self.eeprom.buf[i * 2] as u16) | ((self.eeprom.buf[i * 2 + 1] as u16) << 8);
            self.control_out(SIO_WRITE_EEPROM_REQUEST, val, i as u16)
                .map_err(|e| Error::EepromWrite(Box::new(e)))?;
        }
        debug!("wrote {eeprom_size} EEPROM bytes");

        Ok(())
    }

    /// Decode the EEPROM buffer into the decoded structure fields.
    pub fn eeprom_decode(&mut self) -> Result<()> {
        let chip_type = self.chip_type();
        super::decode::decode(&mut self.eeprom, chip_type)
    }

    /// Build the EEPROM binary image from the decoded structure.
    ///
    /// Returns the number of bytes available for user data.
    pub fn eeprom_build(&mut self) -> Result<usize> {
        let chip_type = self.chip_type();
        super::build::build(&mut self.eeprom, chip_type)
    }
}
