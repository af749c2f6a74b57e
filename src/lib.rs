//! ttl_kv - An in-process key-value store with TTL expiration
//!
//! Expired entries are hidden from readers and evicted on read, and a
//! background sweeper purges the rest on a fixed interval.

pub mod command;
pub mod config;
pub mod demo;
pub mod error;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use error::{CommandError, DeleteError, Error, Result, StoppedError};
pub use store::{Key, Store};
pub use tasks::{spawn_sweeper, Sweeper, SweeperState};
