use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use log::debug;


/// Where binary debug data received from the cart ends up.
pub trait DebugOutput {
    fn open(&mut self, path: &Path) -> io::Result<()>;
    fn is_open(&self) -> bool;
    fn close(&mut self) -> io::Result<()>;

    /// Prefix prepended to every generated output filename.
    fn directory(&self) -> Option<&str>;
}


#[derive(Debug, Default)]
pub struct DebugFile {
    file: Option<BufWriter<File>>,
    directory: Option<String>,
}
impl DebugFile {
    pub fn new(directory: Option<String>) -> Self {
        Self {
            file: None,
            directory,
        }
    }

    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        match &mut self.file {
            Some(file) => file.write_all(data),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "debug output is not open")),
        }
    }
}
impl DebugOutput for DebugFile {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        self.close()?;

        debug!("Opening debug output {}", path.display());
        self.file = Some(BufWriter::new(File::create(path)?));
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }

    fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }
}
