//! Store Entry Module
//!
//! Defines the immutable value wrapper kept for every key, with optional expiry.

use std::time::{Duration, Instant};

// == Entry ==
/// A stored value together with its absolute expiry instant.
///
/// Entries are never mutated after construction. Overwriting a key replaces
/// the whole entry, which is how a previous TTL gets discarded.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    value: T,
    /// `None` = never expires
    expiry: Option<Instant>,
}

impl<T> Entry<T> {
    // == Constructors ==
    /// Creates a permanent entry.
    pub fn new(value: T) -> Self {
        Self {
            value,
            expiry: None,
        }
    }

    /// Creates an entry that expires `ttl` after this call.
    ///
    /// A TTL too large to represent as an `Instant` yields a permanent entry.
    pub fn with_ttl(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expiry: Instant::now().checked_add(ttl),
        }
    }

    // == Accessors ==
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn expiry(&self) -> Option<Instant> {
        self.expiry
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired only once the current time is
    /// strictly greater than its expiry. At the exact expiry instant it is
    /// still live.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same check as [`Entry::is_expired`] against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expiry {
            Some(expiry) => now > expiry,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// Saturates to `Duration::ZERO` once the expiry has passed.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expiry
            .map(|expiry| expiry.saturating_duration_since(Instant::now()))
    }
}
