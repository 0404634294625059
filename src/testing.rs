//! Recording collaborators for unit tests.

use std::cell::RefCell;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::rc::Rc;
use loader64_backend::carts::CartType;
use loader64_backend::device::{Device, DeviceError};
use crate::debug::DebugOutput;
use crate::term::{Color, Console};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Log(Color, String),
    Replace(Color, String),
    ReadKey,
    ReadRawKey,
    End,
    CloseDebug,
    CloseDevice,
}

/// Shared, ordered log of every call made on the mocks.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Call>>>);
impl Recorder {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn take(&self) -> Vec<Call> {
        self.0.borrow_mut().drain(..).collect()
    }
}


pub struct MockConsole {
    calls: Recorder,
    fullscreen: bool,
}
impl MockConsole {
    pub fn new(calls: &Recorder, fullscreen: bool) -> Self {
        Self { calls: calls.clone(), fullscreen }
    }
}
impl Console for MockConsole {
    fn log(&mut self, color: Color, text: &str) {
        self.calls.push(Call::Log(color, text.to_owned()));
    }

    fn replace(&mut self, color: Color, text: &str) {
        self.calls.push(Call::Replace(color, text.to_owned()));
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn read_key(&mut self) -> io::Result<()> {
        self.calls.push(Call::ReadKey);
        Ok(())
    }

    fn read_raw_key(&mut self) -> io::Result<()> {
        self.calls.push(Call::ReadRawKey);
        Ok(())
    }

    fn end(&mut self) {
        self.calls.push(Call::End);
    }
}


pub struct MockDevice {
    calls: Recorder,
    open: bool,
    requested: Option<CartType>,
}
impl MockDevice {
    pub fn new(calls: &Recorder, open: bool, requested: Option<CartType>) -> Self {
        Self { calls: calls.clone(), open, requested }
    }
}
impl Device for MockDevice {
    fn open(&mut self) -> loader64_backend::Result<()> {
        if self.open {
            return Err(DeviceError::CantOpen.into());
        }
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> loader64_backend::Result<()> {
        self.calls.push(Call::CloseDevice);
        self.open = false;
        Ok(())
    }

    fn requested_cart(&self) -> Option<CartType> {
        self.requested
    }

    fn request_cart(&mut self, cart: CartType) {
        self.requested = Some(cart);
    }
}


pub struct MockDebug {
    calls: Recorder,
    open: bool,
    directory: Option<String>,
}
impl MockDebug {
    pub fn new(calls: &Recorder, open: bool, directory: Option<&str>) -> Self {
        Self { calls: calls.clone(), open, directory: directory.map(str::to_owned) }
    }
}
impl DebugOutput for MockDebug {
    fn open(&mut self, _path: &Path) -> io::Result<()> {
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> io::Result<()> {
        self.calls.push(Call::CloseDebug);
        self.open = false;
        Ok(())
    }

    fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }
}


/// Panic payload standing in for process exit.
#[derive(Debug)]
pub struct Exited(pub i32);

pub fn exit(code: i32) -> ! {
    panic::panic_any(Exited(code))
}

/// Runs `f`, which must end in a call to [`exit`], and returns the exit status.
pub fn expect_exit<F: FnOnce()>(f: F) -> i32 {
    let payload = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("expected the session to terminate"),
        Err(payload) => payload,
    };

    match payload.downcast::<Exited>() {
        Ok(exited) => exited.0,
        Err(payload) => panic::resume_unwind(payload),
    }
}
