//! Resolution error statistics.
//!
//! Thread-safe counters, one per [`ErrorKind`], shared by every worker of a
//! batch.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorKind;

/// Thread-safe error statistics tracker.
///
/// All kinds are initialized to zero on creation, so incrementing never needs
/// to insert. Share across tasks with `Arc`.
pub struct ErrorStats {
    errors: HashMap<ErrorKind, AtomicUsize>,
}

impl ErrorStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in ErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }
        ErrorStats { errors }
    }

    /// Increment the counter for `kind`.
    pub fn increment(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ErrorStats initialization.",
                kind
            );
        }
    }

    /// Get the count for an error kind.
    pub fn get(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all kinds.
    pub fn total(&self) -> usize {
        ErrorKind::iter().map(|k| self.get(k)).sum()
    }

    /// Non-zero counters, ordered by kind.
    pub fn snapshot(&self) -> BTreeMap<ErrorKind, usize> {
        ErrorKind::iter()
            .map(|k| (k, self.get(k)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for ErrorStats {
    fn default() -> Self {
        Self::new()
    }
}
