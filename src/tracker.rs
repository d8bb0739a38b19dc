//! The Rollcall tracker.

use crate::config::Config;
use crate::error::{Error, Result};
use chrono::FixedOffset;
use rollcall_core::{Activity, BlobBackend, Clock, Participant, SystemClock, Table};
use rollcall_engine::{CheckinEngine, Outcome, Summary};
use rollcall_storage::{
    ContentApiBlob, ContentApiConfig, FileBlob, MemoryBlob, RetryPolicy, TableStore,
    DEFAULT_CACHE_TTL,
};
use rollcall_wire::{decode_table, encode_table};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Check-in tracker over one shared participant table.
///
/// This is the main entry point. Create one with [`Tracker::builder`],
/// [`Tracker::from_config`] or, for tests and demos, [`Tracker::in_memory`].
///
/// # Example
///
/// ```ignore
/// use rollcall::prelude::*;
///
/// let tracker = Tracker::in_memory("ID Code,Name,Bus Check-in\nA100,Ada,No\n")?;
///
/// match tracker.process("a100", Activity::Bus) {
///     Outcome::Recorded(name) => println!("welcome aboard, {}", name),
///     other => println!("{}", other.message(Activity::Bus)),
/// }
/// ```
#[derive(Clone)]
pub struct Tracker {
    engine: CheckinEngine,
}

impl Tracker {
    /// Create a builder for tracker configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tracker = Tracker::builder()
    ///     .file("./checkins.csv")
    ///     .utc_offset(FixedOffset::east_opt(19_800).unwrap())
    ///     .open()?;
    /// ```
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// Tracker over an in-process copy of `csv`.
    ///
    /// The seed is decoded up front, so malformed text fails here rather
    /// than on the first request. Writes never leave the process.
    pub fn in_memory(csv: &str) -> Result<Self> {
        decode_table(csv)?;
        Self::builder().memory(csv).open()
    }

    /// Tracker described by `config`.
    ///
    /// `store.local` selects a local file; otherwise `store.repo` selects
    /// the remote content API.
    pub fn from_config(config: &Config) -> Result<Self> {
        let builder = Self::builder()
            .retry(config.retry_policy())
            .cache_ttl(config.cache_ttl())
            .utc_offset(config.utc_offset()?);

        let builder = match (&config.store.local, config.content_api()) {
            (Some(path), _) => builder.file(path.clone()),
            (None, Some(api)) => builder.content_api(api),
            (None, None) => {
                return Err(Error::Config(
                    "no table configured: set store.repo or store.local".to_string(),
                ))
            }
        };
        builder.open()
    }

    /// Record `activity` for the participant with `id_code`.
    ///
    /// See [`CheckinEngine::process`].
    pub fn process(&self, id_code: &str, activity: Activity) -> Outcome {
        self.engine.process(id_code, activity)
    }

    /// Like [`process`](Self::process), with the activity given by name.
    pub fn process_named(&self, id_code: &str, activity: &str) -> Result<Outcome> {
        let activity: Activity = activity.parse()?;
        Ok(self.process(id_code, activity))
    }

    /// Participant with `id_code`, or `None`.
    pub fn lookup(&self, id_code: &str) -> Result<Option<Participant>> {
        Ok(self.engine.lookup(id_code)?)
    }

    /// Current table, possibly served from the read cache.
    pub fn snapshot(&self) -> Result<Table> {
        Ok(self.engine.snapshot()?)
    }

    /// Participant count and per-activity completion counts.
    pub fn summary(&self) -> Result<Summary> {
        Ok(self.engine.summary()?)
    }

    /// Current table encoded as CSV.
    pub fn export_csv(&self) -> Result<String> {
        Ok(encode_table(&self.snapshot()?))
    }

    /// Description of the backing store, safe to print.
    pub fn describe(&self) -> String {
        self.engine.store().describe()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &CheckinEngine {
        &self.engine
    }
}

/// Where the builder will put the table.
enum BackendChoice {
    Memory(String),
    File(PathBuf),
    ContentApi(ContentApiConfig),
    Custom(Arc<dyn BlobBackend>),
}

/// Builder for tracker configuration.
///
/// # Example
///
/// ```ignore
/// // Production: remote table, event in India
/// let tracker = Tracker::builder()
///     .content_api(api_config)
///     .utc_offset(FixedOffset::east_opt(19_800).unwrap())
///     .open()?;
///
/// // Tests: injected backend and clock, no pauses between retries
/// let tracker = Tracker::builder()
///     .backend(blob.clone())
///     .clock(clock.clone())
///     .retry(RetryPolicy::immediate(3))
///     .open()?;
/// ```
pub struct TrackerBuilder {
    backend: Option<BackendChoice>,
    retry: RetryPolicy,
    cache_ttl: Duration,
    clock: Option<Arc<dyn Clock>>,
    offset: Option<FixedOffset>,
}

impl TrackerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: None,
            retry: RetryPolicy::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            clock: None,
            offset: None,
        }
    }

    /// Keep the table in memory, seeded with `csv`.
    pub fn memory(mut self, csv: impl Into<String>) -> Self {
        self.backend = Some(BackendChoice::Memory(csv.into()));
        self
    }

    /// Keep the table in a local CSV file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = Some(BackendChoice::File(path.into()));
        self
    }

    /// Keep the table in a repository behind the content API.
    pub fn content_api(mut self, config: ContentApiConfig) -> Self {
        self.backend = Some(BackendChoice::ContentApi(config));
        self
    }

    /// Use an already constructed backend.
    pub fn backend(mut self, backend: Arc<dyn BlobBackend>) -> Self {
        self.backend = Some(BackendChoice::Custom(backend));
        self
    }

    /// Write retry budget.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Lifetime of the read cache. Zero disables it.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Time source. Overrides [`utc_offset`](Self::utc_offset).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Event time zone for the system clock. Defaults to UTC.
    pub fn utc_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Open the tracker.
    ///
    /// Nothing is fetched here; the first request reaches the store.
    pub fn open(self) -> Result<Tracker> {
        let backend: Arc<dyn BlobBackend> = match self.backend {
            Some(BackendChoice::Memory(csv)) => Arc::new(MemoryBlob::new(csv)),
            Some(BackendChoice::File(path)) => Arc::new(FileBlob::new(path)),
            Some(BackendChoice::ContentApi(config)) => Arc::new(ContentApiBlob::new(config)),
            Some(BackendChoice::Custom(backend)) => backend,
            None => return Err(Error::Config("no backend configured".to_string())),
        };

        let clock: Arc<dyn Clock> = match (self.clock, self.offset) {
            (Some(clock), _) => clock,
            (None, Some(offset)) => Arc::new(SystemClock::new(offset)),
            (None, None) => Arc::new(SystemClock::utc()),
        };

        let store = TableStore::new(backend)
            .with_retry(self.retry)
            .with_cache_ttl(self.cache_ttl);
        debug!(store = %store.describe(), attempts = self.retry.max_attempts, "tracker opened");

        Ok(Tracker {
            engine: CheckinEngine::new(Arc::new(store), clock),
        })
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
