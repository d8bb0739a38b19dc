//! Unified error types for Rollcall.
//!
//! Wraps the per-crate errors behind one enum so callers of the facade
//! handle a single type. Check-in refusals are not errors; they arrive as
//! [`Outcome`](crate::Outcome) values.

use rollcall_core::{ParseActivityError, StoreError};
use rollcall_wire::DecodeError;
use thiserror::Error;

/// All Rollcall errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The record store could not be read or written
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Table text could not be decoded
    #[error("invalid table: {0}")]
    Decode(#[from] DecodeError),

    /// Activity name not recognised
    #[error(transparent)]
    Activity(#[from] ParseActivityError),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Store failures are transient; the same request may succeed later
    /// against fresh data. Input and configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this is a version conflict, including one that exhausted
    /// the retry budget.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_conflict())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
