//! Storage layer for Rollcall
//!
//! This crate implements the record store adapter over a single shared,
//! versioned blob:
//! - TableStore: load with a short-lived cache, whole-table save, and the
//!   read-modify-write `update` used by the check-in engine
//! - RetryPolicy: bounded attempts with a fixed pause between them
//! - MemoryBlob: in-process backend with fault injection
//! - FileBlob: table file on local disk, hashed for versioning
//! - ContentApiBlob: hosted content API backend over HTTPS

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content_api;
pub mod file;
pub mod memory;
pub mod retry;
pub mod store;

pub use content_api::{ContentApiBlob, ContentApiConfig};
pub use file::FileBlob;
pub use memory::MemoryBlob;
pub use retry::RetryPolicy;
pub use store::{TableStore, DEFAULT_CACHE_TTL};
