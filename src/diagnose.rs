use log::{debug, warn};
use loader64_backend::carts::CartType;
use loader64_backend::device::{DeviceError, BITMODE_RESET, BITMODE_SYNC_FIFO};
use loader64_backend::Error;
use crate::session::Session;
use crate::term::Color;


/// What should happen after a device reports an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Stop the program with this message.
    Fatal(String),
    /// The user stopped the upload; carry on.
    Cancelled,
    /// Not actually an error.
    Ignored,
}

pub fn verdict(err: DeviceError, requested: Option<CartType>) -> Verdict {
    use DeviceError::*;

    let message: String = match err {
        Ok | NotCart => return Verdict::Ignored,
        UploadCancelled => return Verdict::Cancelled,

        UsbBusy => "USB Device not ready.".into(),
        NoDevices => "No FTDI USB devices found.".into(),
        CartFindFail => match requested {
            None if cfg!(unix) => "No flashcart detected. Are you running sudo?".into(),
            None => "No flashcart detected.".into(),
            Some(_) => "Requested flashcart not detected.".into(),
        },
        CantOpen => "Could not open USB device.".into(),
        ResetFail => "Unable to reset USB device.".into(),
        ResetPortFail => "Unable to reset USB port.".into(),
        TimeoutSetFail => "Unable to set flashcart timeouts.".into(),
        PurgeFail => "Unable to purge USB contents.".into(),
        ReadFail => "Unable to read from flashcart.".into(),
        WriteFail => "Unable to write to flashcart.".into(),
        WriteZero => "Zero bytes were written to flashcart.".into(),
        CloseFail => "Unable to close flashcart.".into(),
        BitmodeFailReset => format!("Unable to set bitmode {BITMODE_RESET}."),
        BitmodeFailSyncFifo => format!("Unable to set bitmode {BITMODE_SYNC_FIFO}."),
        SetDtrFail => "Unable to set DTR line.".into(),
        ClearDtrFail => "Unable to clear DTR line.".into(),
        TxReplyMismatch => "Actual bytes written amount is different than desired.".into(),
        ReadCompSigFail => "Unable to read completion signal.".into(),
        NoCompSig => "Did not receive completion signal.".into(),
        ReadPackSizeFail => "Unable to read packet size.".into(),
        BadPackSize => "Wrong read packet size.".into(),
        MallocFail => "Malloc failure.".into(),
        Timeout => "Flashcart timed out.".into(),

        SixtyFourDrive8303Usb => "The 8303 CIC is not supported through USB.".into(),
        SixtyFourDriveBadCmp => "Received bad CMP signal.".into(),
        SixtyFourDriveCantDebug => "Please upgrade to firmware 2.05 or higher to access USB debugging.".into(),
        SixtyFourDriveBadDma => "Unexpected DMA header.".into(),

        Sc64CtrlResetFail => "Couldn't perform SC64 controller reset.".into(),
        Sc64CtrlReleaseFail => "Couldn't release SC64 controller reset.".into(),
        Sc64FirmwareCheckFail => "Couldn't get SC64 firmware version.".into(),
        Sc64FirmwareUnknown => "Unknown SC64 firmware version.".into(),
    };

    Verdict::Fatal(message)
}


impl Session {
    /// Reports a device error to the user, stopping the program unless the error is harmless.
    pub fn handle_device_error(&mut self, err: DeviceError) {
        debug!("Handling device error {err:?} ({})", err.code());

        let requested = self.device().requested_cart();
        match verdict(err, requested) {
            Verdict::Fatal(message) => self.terminate(Some(&message)),
            Verdict::Cancelled => self.console().replace(Color::Program, "Upload cancelled by the user."),
            Verdict::Ignored => (),
        }
    }

    /// Like [`Session::handle_device_error`], for a raw code that may be newer than this program.
    pub fn handle_device_code(&mut self, code: u8) {
        match DeviceError::try_from(code) {
            Ok(err) => self.handle_device_error(err),
            Err(_) => {
                warn!("Unhandled device error code {code}");
                self.console().log(Color::Error, &format!("Unhandled device error '{code}'."));
            }
        }
    }

    pub fn handle_error(&mut self, err: Error) {
        match err {
            Error::Device(err) => self.handle_device_error(err),
            err @ Error::UnknownIdentifier { .. } => self.terminate(Some(&err.to_string())),
        }
    }
}
