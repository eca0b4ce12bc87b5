//! Shared utilities for the whitelist token workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
