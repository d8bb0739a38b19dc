//! Record store adapter
//!
//! [`TableStore`] turns a [`BlobBackend`] into a table store with three
//! write-side guarantees:
//!
//! 1. every write is conditioned on a version token fetched immediately
//!    before it, never on a token remembered from an earlier read
//! 2. a failed attempt is retried from scratch up to the policy's budget,
//!    and exhaustion leaves the remote content as it was
//! 3. a successful write invalidates the read cache
//!
//! ## Reads
//!
//! `load()` may serve a cached table younger than the TTL. Anything that is
//! about to mutate must call `load_fresh()` or go through `update()`.
//!
//! ## Purity Requirement
//!
//! The `update()` closure is re-run against freshly fetched content on every
//! attempt. It must be a pure function of the table it is handed: no I/O,
//! no external mutation, no irreversible effects.

use crate::retry::RetryPolicy;
use parking_lot::Mutex;
use rollcall_core::{BlobBackend, StoreError, StoreResult, Table, VersionToken};
use rollcall_wire::{decode_table, encode_table};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default lifetime of a cached read
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct CachedTable {
    table: Table,
    fetched_at: Instant,
}

/// Whole-table store over a shared versioned blob
pub struct TableStore {
    backend: Arc<dyn BlobBackend>,
    retry: RetryPolicy,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedTable>>,
}

impl TableStore {
    /// Store over `backend` with the default retry policy and cache TTL
    pub fn new(backend: Arc<dyn BlobBackend>) -> Self {
        TableStore {
            backend,
            retry: RetryPolicy::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Mutex::new(None),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the cache TTL; zero disables caching
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Retry policy in use
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Cache TTL in use
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Backend description for logs
    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Current table, possibly from a cache younger than the TTL
    pub fn load(&self) -> StoreResult<Table> {
        if let Some(cached) = self.cache.lock().as_ref() {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                debug!("table served from cache");
                return Ok(cached.table.clone());
            }
        }
        self.load_fresh()
    }

    /// Current table, always fetched from the backend
    pub fn load_fresh(&self) -> StoreResult<Table> {
        let (table, _) = self.fetch_table()?;
        *self.cache.lock() = Some(CachedTable {
            table: table.clone(),
            fetched_at: Instant::now(),
        });
        Ok(table)
    }

    /// Drop any cached table
    pub fn invalidate(&self) {
        self.cache.lock().take();
    }

    /// Replace the whole remote table with `table`
    ///
    /// Each attempt fetches the current version token and writes guarded by
    /// it. The same content is submitted on every attempt, so this overwrites
    /// whatever the remote holds; use [`TableStore::update`] to apply a change
    /// on top of concurrent writers.
    pub fn save(&self, table: &Table, message: &str) -> StoreResult<VersionToken> {
        let body = encode_table(table);
        let version = self.retry.run("save", |attempt| {
            let expected = self.backend.version()?;
            debug!(attempt, expected = %expected, "writing table");
            self.backend.put(body.as_bytes(), message, &expected)
        })?;
        self.invalidate();
        info!(version = %version, message, "table saved");
        Ok(version)
    }

    /// Read-modify-write against the freshest remote content
    ///
    /// Each attempt fetches content and version together, hands the decoded
    /// table to `mutate`, and on `Continue` writes the result guarded by that
    /// version. `Break` ends the operation without writing. Conflicts and
    /// other failures retry from the fetch.
    ///
    /// A failed write other than a conflict may still have landed. When the
    /// next attempt fetches exactly the content that write sent, it counts as
    /// done and `mutate` is not run again.
    pub fn update<B, C, F>(&self, message: &str, mut mutate: F) -> StoreResult<ControlFlow<B, C>>
    where
        F: FnMut(&mut Table) -> ControlFlow<B, C>,
    {
        let mut unconfirmed: Option<(String, C)> = None;
        let outcome = self.retry.run("update", |attempt| {
            let (text, expected) = self.fetch_text()?;
            if let Some((body, c)) = unconfirmed.take() {
                if body == text {
                    info!(version = %expected, message, "earlier write landed");
                    return Ok(ControlFlow::Continue(c));
                }
            }
            let mut table = decode_table(&text).map_err(|e| StoreError::Decode(e.to_string()))?;
            match mutate(&mut table) {
                ControlFlow::Break(b) => Ok(ControlFlow::Break(b)),
                ControlFlow::Continue(c) => {
                    debug!(attempt, expected = %expected, "writing updated table");
                    let body = encode_table(&table);
                    match self.backend.put(body.as_bytes(), message, &expected) {
                        Ok(version) => {
                            info!(version = %version, message, "table updated");
                            Ok(ControlFlow::Continue(c))
                        }
                        Err(e) => {
                            if !e.is_conflict() {
                                unconfirmed = Some((body, c));
                            }
                            Err(e)
                        }
                    }
                }
            }
        })?;
        if outcome.is_continue() {
            self.invalidate();
        }
        Ok(outcome)
    }

    fn fetch_text(&self) -> StoreResult<(String, VersionToken)> {
        let blob = self.backend.fetch()?;
        let text = String::from_utf8(blob.content)
            .map_err(|e| StoreError::Decode(format!("table is not UTF-8: {}", e)))?;
        Ok((text, blob.version))
    }

    fn fetch_table(&self) -> StoreResult<(Table, VersionToken)> {
        let (text, version) = self.fetch_text()?;
        let table = decode_table(&text).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok((table, version))
    }
}
