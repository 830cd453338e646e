//! Logging setup.
//!
//! The crate logs through the `log` facade; `init_logging` installs `env_logger` for
//! binaries that do not bring their own logger.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
