//! Store Statistics Module
//!
//! Tracks read outcomes and how expired entries left the store.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Store Stats ==
/// Counters describing store activity since construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that found nothing (absent or expired)
    pub misses: u64,
    /// Expired entries removed by a read
    pub lazy_evictions: u64,
    /// Expired entries removed by `purge_expired`
    pub swept: u64,
    /// Number of `purge_expired` runs
    pub sweeps: u64,
    /// Wall-clock time of the latest purge
    pub last_sweep_at: Option<DateTime<Utc>>,
    /// Raw number of entries in the store, including unpurged expired ones
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// A read found an expired entry and removed it. Counts as a miss too.
    pub fn record_lazy_eviction(&mut self) {
        self.lazy_evictions += 1;
        self.misses += 1;
    }

    // == Record Sweep ==
    /// Records one purge run and the number of entries it removed.
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.swept += removed as u64;
        self.last_sweep_at = Some(Utc::now());
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
