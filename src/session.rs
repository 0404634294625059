use std::collections::TryReserveError;
use log::{debug, error, warn};
use loader64_backend::carts::Identifier;
use loader64_backend::device::Device;
use crate::debug::DebugOutput;
use crate::filename::{Clock, FilenameGenerator};
use crate::term::{Color, Console};

/// Exit status used when the program is stopped through [`Session::terminate`].
pub const TERMINATE_STATUS: i32 = 1;


/// Everything the program keeps for the lifetime of the process.
///
/// Only ever touched from the main thread; none of the collaborators are expected to be `Send`.
pub struct Session {
    console: Box<dyn Console>,
    device: Box<dyn Device>,
    debug: Box<dyn DebugOutput>,
    filenames: FilenameGenerator,
    terminating: bool,
    exit: fn(i32) -> !,
}
impl Session {
    pub fn new(console: Box<dyn Console>, device: Box<dyn Device>, debug: Box<dyn DebugOutput>, clock: Box<dyn Clock>) -> Self {
        Self {
            console,
            device,
            debug,
            filenames: FilenameGenerator::new(clock),
            terminating: false,
            exit: std::process::exit,
        }
    }

    /// Replaces the final `std::process::exit` call of [`Session::terminate`].
    pub fn with_exit(mut self, exit: fn(i32) -> !) -> Self {
        self.exit = exit;
        self
    }

    pub fn console(&mut self) -> &mut dyn Console {
        self.console.as_mut()
    }

    pub fn device(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }

    pub fn debug_output(&mut self) -> &mut dyn DebugOutput {
        self.debug.as_mut()
    }

    pub fn is_terminating(&self) -> bool {
        self.terminating
    }

    /// Stops the program: reports `reason`, releases the debug output and the device, waits for a
    /// key press, and exits with [`TERMINATE_STATUS`].
    ///
    /// Safe to call at any point, including before anything was opened.
    pub fn terminate(&mut self, reason: Option<&str>) -> ! {
        if let Some(reason) = reason.filter(|reason| !reason.is_empty()) {
            error!("{reason}");
            self.console.log(Color::Error, &format!("Error: {reason}"));
            self.console.log(Color::Error, "");
        }

        if self.debug.is_open() {
            if let Err(err) = self.debug.close() {
                warn!("Failed to close debug output: {err}");
            }
        }

        if self.device.is_open() {
            if let Err(err) = self.device.close() {
                warn!("Failed to close flashcart: {err}");
            }
        }

        self.console.log(Color::Input, "Press any key to continue...");
        let pressed = if self.console.is_fullscreen() {
            self.console.read_key()
        } else {
            self.console.read_raw_key()
        };
        if let Err(err) = pressed {
            warn!("Failed to wait for a key press: {err}");
        }

        self.terminating = true;
        self.console.end();
        debug!("Exiting with status {TERMINATE_STATUS}");
        (self.exit)(TERMINATE_STATUS)
    }

    /// Parses a cart, CIC or save type given by the user, terminating if it isn't valid.
    pub fn parse<T: Identifier>(&mut self, text: &str) -> T {
        match T::parse(text) {
            Ok(value) => value,
            Err(err) => self.terminate(Some(&err.to_string())),
        }
    }

    /// Generates a unique filename inside the debug output directory.
    pub fn generate_filename(&mut self, base: &str, ext: &str) -> Result<String, TryReserveError> {
        self.filenames.generate(self.debug.directory(), base, ext)
    }
}
