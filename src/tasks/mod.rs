//! Background Tasks Module
//!
//! Contains background tasks that run alongside the store.
//!
//! # Tasks
//! - TTL Sweeper: Purges expired entries at a fixed interval

mod sweeper;

pub use sweeper::{spawn_sweeper, Sweeper, SweeperState};
