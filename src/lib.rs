pub mod debug;
pub mod diagnose;
pub mod filename;
pub mod progress;
pub mod session;
pub mod term;

#[cfg(test)]
mod testing;

pub use loader64_backend as backend;
