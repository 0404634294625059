use std::collections::TryReserveError;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use log::debug;

/// `YYMMDDhhmmssNN`
const SUFFIX_LEN: usize = 7 * 2;


pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalClock;
impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}


/// Produces output filenames that don't collide, even when several are made in the same second.
///
/// Names look like `{prefix}{base}-YYMMDDhhmmssNN.{ext}`, where `NN` counts earlier names made
/// within the same second. Only 100 distinct names fit in one second; the counter wraps after that.
pub struct FilenameGenerator {
    clock: Box<dyn Clock>,
    last_second: Option<(NaiveDate, u32)>,
    increment: u32,
}
impl FilenameGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_second: None,
            increment: 0,
        }
    }

    pub fn generate(&mut self, prefix: Option<&str>, base: &str, ext: &str) -> Result<String, TryReserveError> {
        let now = self.clock.now();
        self.generate_at(now, prefix, base, ext)
    }

    pub fn generate_at(&mut self, now: NaiveDateTime, prefix: Option<&str>, base: &str, ext: &str) -> Result<String, TryReserveError> {
        let second = (now.date(), now.num_seconds_from_midnight());
        if self.last_second == Some(second) {
            self.increment += 1;
        } else {
            self.increment = 0;
            self.last_second = Some(second);
        }

        let mut suffix = String::new();
        suffix.try_reserve_exact(SUFFIX_LEN)?;
        for field in [
            now.year().rem_euclid(100) as u32,
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            self.increment % 100,
        ] {
            push_two_digits(&mut suffix, field);
        }

        let prefix = prefix.unwrap_or_default();
        let mut name = String::new();
        name.try_reserve_exact(prefix.len() + base.len() + 1 + suffix.len() + 1 + ext.len())?;
        name.push_str(prefix);
        name.push_str(base);
        name.push('-');
        name.push_str(&suffix);
        name.push('.');
        name.push_str(ext);

        debug!("Generated filename {name}");
        Ok(name)
    }
}

fn push_two_digits(out: &mut String, value: u32) {
    out.push(char::from(b'0' + (value / 10 % 10) as u8));
    out.push(char::from(b'0' + (value % 10) as u8));
}


/// Last modification time of the file at `path`.
pub fn file_modified<P: AsRef<Path>>(path: P) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}

/// Milliseconds since the Unix epoch.
pub fn milliseconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
