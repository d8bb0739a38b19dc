//! Transport seam for the shared record blob
//!
//! A [`BlobBackend`] is a single remote document with a revision token and a
//! conditional write. It knows nothing about tables; encoding, caching and
//! retry live in the storage crate.

use crate::error::StoreResult;
use crate::types::VersionToken;

/// Content of the remote blob at one revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Raw document bytes
    pub content: Vec<u8>,
    /// Revision the content belongs to
    pub version: VersionToken,
}

/// A versioned remote document with compare-and-swap writes
///
/// # Contract
///
/// - `fetch` returns content and version from the same revision
/// - `put` succeeds only if the current revision equals `expected`, and
///   returns the new revision; otherwise it fails with
///   [`crate::StoreError::Conflict`] and leaves the document unchanged
/// - implementations must be safe to share across threads
pub trait BlobBackend: Send + Sync {
    /// Fetch the current content and its version
    fn fetch(&self) -> StoreResult<Blob>;

    /// Fetch only the current version
    ///
    /// The default fetches the whole blob; backends with a cheaper
    /// metadata call should override it.
    fn version(&self) -> StoreResult<VersionToken> {
        self.fetch().map(|blob| blob.version)
    }

    /// Write `content` if the blob is still at `expected`
    fn put(&self, content: &[u8], message: &str, expected: &VersionToken)
        -> StoreResult<VersionToken>;

    /// Short name for logs
    fn describe(&self) -> String {
        "blob".to_string()
    }
}
