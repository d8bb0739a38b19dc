//! Error types for the record store
//!
//! [`StoreError`] is the single failure type surfaced by the record store
//! and every [`crate::BlobBackend`]. All variants are transient from the
//! caller's point of view: the user action can be re-triggered.

use crate::types::VersionToken;
use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Record store failures
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Conditional write rejected: the blob moved past the expected version
    #[error("version conflict: expected {expected}")]
    Conflict {
        /// Token the write was guarded by
        expected: VersionToken,
    },

    /// Network or connection failure before a response was received
    #[error("transport error: {0}")]
    Transport(String),

    /// Remote answered with a non-success status
    #[error("remote returned status {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Stored content could not be decoded into a table
    #[error("decode error: {0}")]
    Decode(String),

    /// The remote blob does not exist
    #[error("remote blob missing: {0}")]
    Missing(String),

    /// Retry budget spent; carries the error of the final attempt
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error of the last attempt
        last: Box<StoreError>,
    },
}

impl StoreError {
    /// Check if this is a version conflict (possibly wrapped by exhaustion)
    pub fn is_conflict(&self) -> bool {
        match self {
            StoreError::Conflict { .. } => true,
            StoreError::Exhausted { last, .. } => last.is_conflict(),
            _ => false,
        }
    }

    /// Check if the store layer should try this write again
    ///
    /// Every single-attempt failure is retryable; an exhausted budget is not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StoreError::Exhausted { .. })
    }
}
