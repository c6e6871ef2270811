//! Error handling and resolution statistics.
//!
//! This module provides:
//! - Per-item resolution errors and their categories
//! - Initialization and file errors
//! - Thread-safe per-category error counters

mod stats;
mod types;

// Re-export public API
pub use stats::ErrorStats;
pub use types::{ErrorKind, FileError, InitializationError, LookupStage, ResolutionError};
