//! Command Module
//!
//! Text front end for the store: a line parser and an executor that renders
//! store results as strings.
//!
//! # Commands
//! - `PUT key value [ttl_ms]` - Store a value, optionally expiring
//! - `GET key` - Read a value (`NULL` when absent or expired)
//! - `DELETE key` - Remove a key
//! - `STOP` / `START` - Block or re-enable mutation
//! - `SIZE` - Raw entry count
//! - `STATS` - Store counters as JSON
//! - `EXIT` - End the session

mod executor;
mod parser;

pub use executor::{CommandExecutor, Outcome};
pub use parser::{parse, Command};
