//! Logging utilities.
//!
//! Logger initialization lives here so binaries only call `init_logging` once
//! at startup. Everything else logs through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
