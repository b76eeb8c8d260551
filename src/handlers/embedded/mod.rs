//! Built-in handlers shipped with the crate (demo/reference only).

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
