//! Error types for the store and its command layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::store::Key;

// == Stopped Error ==
/// Returned by mutating operations while the store is stopped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Database is currently stopped")]
pub struct StoppedError;

// == Delete Error ==
/// Ways a `delete` can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteError {
    /// The store is stopped
    #[error(transparent)]
    Stopped(#[from] StoppedError),

    /// No entry exists for the key
    #[error("Key {0} not found")]
    NotFound(Key),
}

// == Command Error ==
/// Rejections produced while parsing a line of input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command, wrong arity or malformed key
    #[error("{0}")]
    InvalidCommand(String),

    /// Non-numeric or non-positive TTL
    #[error("{0}")]
    InvalidTtl(String),
}

// == Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Stopped(#[from] StoppedError),

    #[error(transparent)]
    Delete(#[from] DeleteError),

    #[error(transparent)]
    Command(#[from] CommandError),

    /// Rendering a reply as JSON failed
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A spawned worker or background task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
