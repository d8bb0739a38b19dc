//! Public types for the Rollcall API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Table model
pub use rollcall_core::{ActivityState, AssignedDays, Participant, Table};

// Activities and identifiers
pub use rollcall_core::{Activity, IdCode, VersionToken};

// Time
pub use rollcall_core::{parse_utc_offset, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};

// Store plumbing
pub use rollcall_core::{Blob, BlobBackend, StoreError};
pub use rollcall_storage::{ContentApiConfig, FileBlob, MemoryBlob, RetryPolicy};

// Check-in results
pub use rollcall_engine::{BlockReason, Outcome, Summary};
