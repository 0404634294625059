use num_enum::{IntoPrimitive, TryFromPrimitive};
use crate::carts::CartType;
use crate::Result;

/// Bitmode values reported when the FTDI transceiver refuses a mode change.
pub const BITMODE_RESET: u8 = 0x00;
pub const BITMODE_SYNC_FIFO: u8 = 0x40;


/// Every fault a flashcart connection can report.
///
/// `Ok` and `NotCart` are sentinels rather than failures. Codes received from elsewhere may not map
/// to any variant; `DeviceError::try_from` rejects those.
#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum DeviceError {
    Ok = 0,
    NotCart,
    UsbBusy,
    NoDevices,
    CartFindFail,
    CantOpen,
    ResetFail,
    ResetPortFail,
    TimeoutSetFail,
    PurgeFail,
    ReadFail,
    WriteFail,
    WriteZero,
    CloseFail,
    BitmodeFailReset,
    BitmodeFailSyncFifo,
    SetDtrFail,
    ClearDtrFail,
    TxReplyMismatch,
    ReadCompSigFail,
    NoCompSig,
    ReadPackSizeFail,
    BadPackSize,
    MallocFail,
    UploadCancelled,
    Timeout,

    SixtyFourDrive8303Usb,
    SixtyFourDriveBadCmp,
    SixtyFourDriveCantDebug,
    SixtyFourDriveBadDma,

    Sc64CtrlResetFail,
    Sc64CtrlReleaseFail,
    Sc64FirmwareCheckFail,
    Sc64FirmwareUnknown,
}
impl DeviceError {
    pub const ALL: [DeviceError; 34] = {
        use DeviceError::*;
        [
            Ok, NotCart, UsbBusy, NoDevices, CartFindFail, CantOpen, ResetFail, ResetPortFail,
            TimeoutSetFail, PurgeFail, ReadFail, WriteFail, WriteZero, CloseFail, BitmodeFailReset,
            BitmodeFailSyncFifo, SetDtrFail, ClearDtrFail, TxReplyMismatch, ReadCompSigFail,
            NoCompSig, ReadPackSizeFail, BadPackSize, MallocFail, UploadCancelled, Timeout,
            SixtyFourDrive8303Usb, SixtyFourDriveBadCmp, SixtyFourDriveCantDebug, SixtyFourDriveBadDma,
            Sc64CtrlResetFail, Sc64CtrlReleaseFail, Sc64FirmwareCheckFail, Sc64FirmwareUnknown,
        ]
    };

    pub fn code(self) -> u8 {
        self.into()
    }
}


/// A flashcart connection, as seen by everything above the transport.
pub trait Device {
    fn open(&mut self) -> Result<()>;
    fn is_open(&self) -> bool;
    fn close(&mut self) -> Result<()>;

    /// The cart the user asked for, if any.
    fn requested_cart(&self) -> Option<CartType>;
    fn request_cart(&mut self, cart: CartType);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_contiguous() {
        for (i, err) in DeviceError::ALL.iter().enumerate() {
            assert_eq!(err.code() as usize, i);
            assert_eq!(DeviceError::try_from(i as u8).ok(), Some(*err));
        }
    }

    #[test]
    fn test_unknown_code() {
        let err = DeviceError::try_from(200u8).unwrap_err();
        assert_eq!(err.number, 200);
        assert!(DeviceError::try_from(DeviceError::ALL.len() as u8).is_err());
    }
}
