//! Map error types
//!
//! This module defines the error type returned by every map operation.

use thiserror::Error;

/// Errors returned by [`KeyValueMap`](crate::map::KeyValueMap) implementations
#[derive(Debug, Error)]
pub enum MapError {
    /// A write was given a missing or non-text key or value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store could not be reached or rejected a command.
    /// The client error is carried unmodified.
    #[error(transparent)]
    Store(#[from] redis::RedisError),

    /// The connection pool was closed before the operation started
    #[error("Connection pool is closed")]
    PoolClosed,

    /// Construction parameters were rejected
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl MapError {
    /// Returns true when the store itself was unreachable
    /// (refused connection, network failure or connect timeout)
    pub fn is_connection_error(&self) -> bool {
        match self {
            MapError::Store(err) => {
                err.is_connection_refusal() || err.is_io_error() || err.is_timeout()
            }
            _ => false,
        }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        MapError::InvalidArgument(msg.into())
    }
}
