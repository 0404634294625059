use std::time::Duration;
use libftd2xx::{BitMode, DeviceInfo, Ftdi, FtdiCommon};
use log::debug;
use crate::carts::CartType;
use crate::device::{Device, DeviceError};
use crate::Result;

const TIMEOUT: Duration = Duration::from_secs(10);

/// Identifies the flashcart family behind an FTDI device, if it's one we know.
pub fn detect_cart(info: &DeviceInfo) -> Option<CartType> {
    use CartType::*;

    match (info.vendor_id, info.product_id, info.description.as_str()) {
        (0x0403, 0x6010, "64drive USB device A") => Some(SixtyFourDriveHW1),
        (0x0403, 0x6014, "64drive USB device") => Some(SixtyFourDriveHW2),
        (0x0403, 0x6001, "FT245R USB FIFO") => Some(EverDrive),
        (0x0403, 0x6014, "SC64") => Some(SummerCart64),
        _ => None
    }
}


/// A flashcart reached through the FTDI D2XX driver.
#[derive(Debug)]
pub struct FtdiDevice {
    device: Option<Ftdi>,
    requested: Option<CartType>,
    serial: Option<String>,
}
impl FtdiDevice {
    pub fn new(serial: Option<String>) -> Self {
        Self {
            device: None,
            requested: None,
            serial,
        }
    }

    fn find<'a>(&self, devices: &'a [DeviceInfo]) -> Option<(&'a DeviceInfo, CartType)> {
        devices.iter()
            .filter(|info| !info.port_open)
            .filter(|info| self.serial.as_ref().map_or(true, |serial| &info.serial_number == serial))
            .filter_map(|info| detect_cart(info).map(|cart| (info, cart)))
            .find(|(_, cart)| self.requested.map_or(true, |requested| requested == *cart))
    }
}
impl Device for FtdiDevice {
    fn open(&mut self) -> Result<()> {
        self.close()?;

        let devices = libftd2xx::list_devices().map_err(|status| {
            debug!("Device enumeration failed: {status:?}");
            DeviceError::UsbBusy
        })?;
        if devices.is_empty() {
            return Err(DeviceError::NoDevices.into());
        }
        for info in &devices {
            debug!("Device detected: {info:?}");
        }

        let (info, cart) = self.find(&devices).ok_or(DeviceError::CartFindFail)?;
        debug!("Opening {cart} ({})", info.serial_number);

        let mut device = Ftdi::with_serial_number(&info.serial_number).map_err(|status| {
            debug!("Open failed: {status:?}");
            DeviceError::CantOpen
        })?;
        device.reset().map_err(|_| DeviceError::ResetFail)?;
        device.set_timeouts(TIMEOUT, TIMEOUT).map_err(|_| DeviceError::TimeoutSetFail)?;

        match cart {
            CartType::SixtyFourDriveHW1 | CartType::SixtyFourDriveHW2 => {
                device.set_bit_mode(0xFF, BitMode::Reset).map_err(|_| DeviceError::BitmodeFailReset)?;
                device.set_bit_mode(0xFF, BitMode::SyncFifo).map_err(|_| DeviceError::BitmodeFailSyncFifo)?;
            },
            CartType::SummerCart64 => {
                device.set_dtr().map_err(|_| DeviceError::SetDtrFail)?;
                device.clear_dtr().map_err(|_| DeviceError::ClearDtrFail)?;
            },
            CartType::EverDrive => (),
        }

        device.purge_all().map_err(|_| DeviceError::PurgeFail)?;

        self.device = Some(device);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn close(&mut self) -> Result<()> {
        match self.device.take() {
            Some(mut device) => device.close().map_err(|status| {
                debug!("Close failed: {status:?}");
                DeviceError::CloseFail.into()
            }),
            None => Ok(()),
        }
    }

    fn requested_cart(&self) -> Option<CartType> {
        self.requested
    }

    fn request_cart(&mut self, cart: CartType) {
        self.requested = Some(cart);
    }
}
