//! Error types for the ftdi-pwr crate.

/// The error type for FTDI operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the nusb USB layer.
    #[error("USB error: {0}")]
    Usb(#[from] nusb::Error),

    /// A USB transfer error.
    #[error("USB transfer error: {0}")]
    Transfer(#[from] nusb::transfer::TransferError),

    /// No matching device was found.
    #[error("device not found")]
    DeviceNotFound,

    /// The USB device is unavailable (not opened or disconnected).
    #[error("USB device unavailable")]
    DeviceUnavailable,

    /// Invalid argument(s) were provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An EEPROM-related error.
    #[error("EEPROM error: {0}")]
    Eeprom(String),

    /// EEPROM checksum verification failed.
    #[error("EEPROM checksum mismatch")]
    EepromChecksum,

    /// EEPROM size exceeded by the string descriptors.
    #[error("EEPROM size exceeded by string descriptors")]
    EepromSizeExceeded,

    /// Reading the configuration EEPROM from the device failed.
    #[error("unable to read EEPROM: {0}")]
    EepromRead(#[source] Box<Error>),

    /// Writing the configuration EEPROM to the device failed.
    #[error("unable to write EEPROM: {0}")]
    EepromWrite(#[source] Box<Error>),

    /// Setting the bitmode failed.
    #[error("unable to set bitmode: {0}")]
    Bitmode(#[source] Box<Error>),

    /// Returning the device to serial mode on close failed.
    #[error("unable to close device: {0}")]
    Close(#[source] Box<Error>),
}

/// A specialized `Result` type for FTDI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_errors_name_the_failing_stage() {
        let read = Error::EepromRead(Box::new(Error::DeviceUnavailable));
        let write = Error::EepromWrite(Box::new(Error::DeviceUnavailable));
        let bitmode = Error::Bitmode(Box::new(Error::DeviceUnavailable));
        let close = Error::Close(Box::new(Error::DeviceUnavailable));

        assert!(read.to_string().starts_with("unable to read EEPROM"));
        assert!(write.to_string().starts_with("unable to write EEPROM"));
        assert!(bitmode.to_string().starts_with("unable to set bitmode"));
        assert!(close.to_string().starts_with("unable to close device"));

        // Same underlying failure, four distinguishable diagnostics
        let texts = [
            read.to_string(),
            write.to_string(),
            bitmode.to_string(),
            close.to_string(),
        ];
        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn stage_errors_carry_the_underlying_message() {
        let err = Error::EepromRead(Box::new(Error::DeviceUnavailable));
        assert!(err.to_string().contains("USB device unavailable"));
    }
}
