//! Store Module
//!
//! Main storage engine: a HashMap of entries behind a single lock, with lazy
//! expiry on read, an explicit purge for the sweeper, and a running flag that
//! gates mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{DeleteError, StoppedError};
use crate::store::{Entry, Key, StoreStats};

/// State guarded by the store lock.
#[derive(Debug)]
struct Inner<T> {
    entries: HashMap<Key, Entry<T>>,
    stats: StoreStats,
}

// == Store ==
/// Thread-safe key-value store with TTL support.
///
/// Every operation runs as one critical section on a single mutex, so callers
/// never observe a half-applied effect of another call. The `running` flag is
/// an atomic so [`Store::is_running`] never contends the lock, but it is only
/// written while the lock is held: a `put` that saw the store running cannot
/// race past a concurrent `stop`.
///
/// Share it between callers and a [`Sweeper`](crate::tasks::Sweeper) with an
/// `Arc`.
#[derive(Debug)]
pub struct Store<T> {
    inner: Mutex<Inner<T>>,
    running: AtomicBool,
}

impl<T> Store<T> {
    // == Constructor ==
    /// Creates an empty, running store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: StoreStats::new(),
            }),
            running: AtomicBool::new(true),
        }
    }

    // == Put ==
    /// Stores a permanent entry, replacing whatever `key` held before.
    ///
    /// Any TTL on the previous entry is discarded.
    pub fn put(&self, key: Key, value: T) -> Result<(), StoppedError> {
        self.insert(key, Entry::new(value))
    }

    /// Stores an entry that expires `ttl_millis` from now.
    ///
    /// The TTL is not validated here; rejecting non-positive values is the
    /// parser's job.
    pub fn put_with_ttl(&self, key: Key, value: T, ttl_millis: u64) -> Result<(), StoppedError> {
        self.insert(key, Entry::with_ttl(value, Duration::from_millis(ttl_millis)))
    }

    fn insert(&self, key: Key, entry: Entry<T>) -> Result<(), StoppedError> {
        let mut inner = self.inner.lock();
        if !self.running.load(Ordering::Acquire) {
            debug!("PUT {} rejected: store stopped", key);
            return Err(StoppedError);
        }

        inner.entries.insert(key, entry);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        debug!("PUT {} ({} entries)", key, len);
        Ok(())
    }

    // == Delete ==
    /// Removes the entry for `key`.
    ///
    /// Existence is checked against the raw map, so an entry that is already
    /// expired but has not been purged or read yet still deletes successfully.
    pub fn delete(&self, key: Key) -> Result<(), DeleteError> {
        let mut inner = self.inner.lock();
        if !self.running.load(Ordering::Acquire) {
            debug!("DELETE {} rejected: store stopped", key);
            return Err(StoppedError.into());
        }

        if inner.entries.remove(&key).is_none() {
            return Err(DeleteError::NotFound(key));
        }

        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        debug!("DELETE {} ({} entries)", key, len);
        Ok(())
    }

    // == Lifecycle ==
    /// Blocks `put`, `put_with_ttl` and `delete` until [`Store::start`].
    /// Reads keep working.
    pub fn stop(&self) {
        let _inner = self.inner.lock();
        if self.running.swap(false, Ordering::AcqRel) {
            info!("Store stopped");
        }
    }

    /// Re-enables mutation. Idempotent.
    pub fn start(&self) {
        let _inner = self.inner.lock();
        if !self.running.swap(true, Ordering::AcqRel) {
            info!("Store started");
        }
    }

    /// Lock-free snapshot of the running flag.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    // == Purge Expired ==
    /// Removes every entry that is expired at the moment of the call.
    ///
    /// Returns the number of entries removed. Runs regardless of the running
    /// flag; it is used by the sweeper and never triggered by `put`/`delete`.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let now = Instant::now();
        let before = inner.entries.len();

        inner.entries.retain(|_, entry| !entry.is_expired_at(now));

        let len = inner.entries.len();
        let removed = before - len;
        inner.stats.record_sweep(removed);
        inner.stats.set_total_entries(len);
        removed
    }

    // == Size ==
    /// Returns the raw number of stored entries.
    ///
    /// Expired entries that have not been read or purged yet are included.
    pub fn size(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }
}

impl<T: Clone> Store<T> {
    // == Get ==
    /// Returns a copy of the value stored for `key`.
    ///
    /// Side effect: if the entry exists but has expired, it is removed from
    /// the store (lazy eviction) and `None` is returned, so `size()` drops by
    /// one. Works whether or not the store is running.
    pub fn get(&self, key: Key) -> Option<T> {
        let mut inner = self.inner.lock();

        let expired = match inner.entries.get(&key) {
            None => {
                inner.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            inner.entries.remove(&key);
            let len = inner.entries.len();
            inner.stats.record_lazy_eviction();
            inner.stats.set_total_entries(len);
            debug!("GET {}: expired entry evicted", key);
            return None;
        }

        inner.stats.record_hit();
        inner.entries.get(&key).map(|entry| entry.value().clone())
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}
