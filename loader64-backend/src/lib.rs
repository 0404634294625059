use std::fmt::{Display, Formatter};
use crate::device::DeviceError;

pub mod carts;
pub mod device;
pub mod ftdi;

#[derive(Debug, PartialEq)]
pub enum Error {
    Device(DeviceError),

    UnknownIdentifier {
        kind: &'static str,
        text: String,
    },
}
impl From<DeviceError> for Error {
    fn from(value: DeviceError) -> Self {
        Self::Device(value)
    }
}
impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Device(err) => write!(f, "device error {err:?} ({})", err.code()),
            Error::UnknownIdentifier { kind, text } => write!(f, "Unknown {kind} '{text}'"),
        }
    }
}
impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_identifier_message() {
        let err = Error::UnknownIdentifier { kind: "CIC", text: "6103".into() };
        assert_eq!(err.to_string(), "Unknown CIC '6103'");
    }

    #[test]
    fn test_device_error_conversion() {
        let err: Error = DeviceError::Timeout.into();
        assert_eq!(err, Error::Device(DeviceError::Timeout));
    }
}
