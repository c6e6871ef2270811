//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Logs how many domains of a batch have finished.
///
/// # Arguments
///
/// * `start_time` - When the batch started
/// * `completed` - Counter of finished domains
/// * `total` - Number of domains in the batch
pub fn log_progress(start_time: Instant, completed: &AtomicUsize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} domains in {:.2} seconds (~{:.2} domains/sec)",
        done, total, elapsed_secs, rate
    );
}
