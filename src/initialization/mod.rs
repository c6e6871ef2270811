//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolvers
//! - Concurrency limiter for a batch

mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{init_pinned_resolver, init_resolver, resolver_opts};

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count. This semaphore is used
/// to limit the number of domains resolved at the same time.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent operations allowed
///
/// # Returns
///
/// An `Arc<Semaphore>` that can be shared across multiple tasks.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
