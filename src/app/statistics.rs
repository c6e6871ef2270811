//! Batch statistics logging.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::ErrorKind;
use crate::models::BatchResult;

/// Logs the one-line summary and the per-category error counts of a batch.
pub fn print_batch_statistics(result: &BatchResult) {
    print_simple_summary(result);
    print_error_statistics(result);
}

/// Logs a one-line summary of the batch.
fn print_simple_summary(result: &BatchResult) {
    info!(
        "✅ Processed {} domain{} ({} record{}, {} error{}) in {:.1}s",
        result.domains,
        if result.domains == 1 { "" } else { "s" },
        result.records.len(),
        if result.records.len() == 1 { "" } else { "s" },
        result.errors.len(),
        if result.errors.len() == 1 { "" } else { "s" },
        result.elapsed_seconds
    );
}

/// Logs error counts per category, skipping categories that never occurred.
pub fn print_error_statistics(result: &BatchResult) {
    let total_errors: usize = result.error_counts.values().sum();
    if total_errors == 0 {
        return;
    }

    info!("Error Counts ({} total):", total_errors);
    for kind in ErrorKind::iter() {
        let count = result.error_count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}
