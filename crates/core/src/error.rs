//! Error types for bounded cell access
//!
//! The blocking operations (`set`, `operate`, `get`) never fail. Only the
//! non-blocking and timed variants return these errors, and in every case
//! the cell is left exactly as it was: no write, no hook invocation.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by the non-blocking and timed cell operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The lock is held (or awaited) in a conflicting mode and the caller
    /// asked not to wait
    #[error("cell lock is held in a conflicting mode")]
    WouldBlock,

    /// The lock could not be acquired within the requested duration
    #[error("timed out after {waited:?} waiting for cell lock")]
    Timeout {
        /// How long the caller waited before giving up
        waited: Duration,
    },
}

/// Result type for fallible cell operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Both variants are contention errors, so retrying later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::WouldBlock | Error::Timeout { .. })
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}
