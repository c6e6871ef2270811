//! Application plumbing around the engine.
//!
//! Domain file input, record file output, console styling, progress logging
//! and statistics printing.

pub mod console;
pub mod input;
pub mod logging;
pub mod output;
pub mod statistics;

// Re-export public API
pub use console::{end_banner, render, start_banner, styled, MessageKind};
pub use input::read_domains;
pub use logging::log_progress;
pub use output::{render_records, write_records};
pub use statistics::{print_batch_statistics, print_error_statistics};
