//! Tracker configuration.
//!
//! Read from a TOML file, then overlaid with `ROLLCALL_*` environment
//! variables. Every field has a default, so an empty file is valid as long
//! as a backend is named somewhere.
//!
//! ```toml
//! [store]
//! repo = "owner/name"
//! path = "checkins.csv"
//!
//! [retry]
//! max_attempts = 3
//! delay_ms = 1500
//!
//! [event]
//! utc_offset = "+05:30"
//! ```

use crate::error::{Error, Result};
use chrono::FixedOffset;
use rollcall_core::parse_utc_offset;
use rollcall_storage::{ContentApiConfig, RetryPolicy};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "ROLLCALL_TOKEN";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the table lives
    pub store: StoreConfig,
    /// Write retry budget
    pub retry: RetryConfig,
    /// Event time zone
    pub event: EventConfig,
}

/// `[store]` section
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Content API root
    pub api_url: String,
    /// `owner/name` of the repository holding the table
    pub repo: Option<String>,
    /// File path inside the repository
    pub path: String,
    /// Branch to read and commit
    pub branch: String,
    /// API token. Usually supplied through `ROLLCALL_TOKEN` instead.
    pub token: Option<String>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Read cache lifetime in milliseconds
    pub cache_ttl_ms: u64,
    /// Local CSV file used instead of the remote
    pub local: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            api_url: "https://api.github.com".to_string(),
            repo: None,
            path: "checkins.csv".to_string(),
            branch: "main".to_string(),
            token: None,
            timeout_ms: 10_000,
            cache_ttl_ms: 5_000,
            local: None,
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_url", &self.api_url)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .field("cache_ttl_ms", &self.cache_ttl_ms)
            .field("local", &self.local)
            .finish()
    }
}

/// `[retry]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Total write attempts
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        RetryConfig {
            max_attempts: policy.max_attempts,
            delay_ms: policy.delay.as_millis() as u64,
        }
    }
}

/// `[event]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventConfig {
    /// Offset from UTC where the event takes place, e.g. `+05:30`
    pub utc_offset: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        EventConfig {
            utc_offset: "+00:00".to_string(),
        }
    }
}

impl Config {
    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Overlay `ROLLCALL_*` variables from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay `ROLLCALL_*` variables from `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(TOKEN_ENV) {
            self.store.token = Some(token);
        }
        if let Some(repo) = get("ROLLCALL_REPO") {
            self.store.repo = Some(repo);
        }
        if let Some(path) = get("ROLLCALL_PATH") {
            self.store.path = path;
        }
        if let Some(branch) = get("ROLLCALL_BRANCH") {
            self.store.branch = branch;
        }
        if let Some(url) = get("ROLLCALL_API_URL") {
            self.store.api_url = url;
        }
        if let Some(offset) = get("ROLLCALL_UTC_OFFSET") {
            self.event.utc_offset = offset;
        }
        // Surface a bad offset here rather than at first use
        self.utc_offset().map(|_| ())
    }

    /// Parsed event offset
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.event.utc_offset).ok_or_else(|| {
            Error::Config(format!("invalid utc_offset '{}'", self.event.utc_offset))
        })
    }

    /// Retry policy from the `[retry]` section
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.delay_ms),
        )
    }

    /// Read cache lifetime
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.store.cache_ttl_ms)
    }

    /// Remote location, if a repository is configured
    pub fn content_api(&self) -> Option<ContentApiConfig> {
        let repo = self.store.repo.clone()?;
        Some(ContentApiConfig {
            api_url: self.store.api_url.trim_end_matches('/').to_string(),
            repo,
            path: self.store.path.clone(),
            branch: self.store.branch.clone(),
            token: self.store.token.clone(),
            timeout: Duration::from_millis(self.store.timeout_ms),
        })
    }
}
