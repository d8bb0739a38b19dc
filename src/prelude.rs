//! Convenient imports for Rollcall.
//!
//! ```ignore
//! use rollcall::prelude::*;
//!
//! let tracker = Tracker::in_memory(seed)?;
//! tracker.process("A100", Activity::Bus);
//! ```

// Main entry point
pub use crate::tracker::{Tracker, TrackerBuilder};
pub use crate::Config;

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{Activity, BlockReason, Outcome, Participant, Summary, Table};

// Re-export the offset type used by the builder
pub use chrono::FixedOffset;
