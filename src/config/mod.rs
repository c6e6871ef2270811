//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, concurrency limits)
//! - Library configuration with validation
//! - Enums shared by the CLI and the library (log level/format, exit policy)

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigError, FailOn, LogFormat, LogLevel, OutputFormat};
