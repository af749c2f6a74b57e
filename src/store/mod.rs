//! Store Module
//!
//! Provides the in-memory key-value store with TTL expiration.

mod entry;
mod stats;
#[allow(clippy::module_inception)]
mod store;


// Re-export public types
pub use entry::Entry;
pub use stats::StoreStats;
pub use store::Store;

/// Key type of the store.
pub type Key = i32;
