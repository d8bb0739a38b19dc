//! # Rollcall
//!
//! Check-in tracking for multi-day events.
//!
//! Staff at several check-in points record when a participant boards a bus,
//! collects food, enters the conference or takes the return trip. All
//! clients share one versioned participant table; every write is a
//! conditional update against the revision it was computed from, so
//! concurrent desks never overwrite each other.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rollcall::prelude::*;
//!
//! let tracker = Tracker::builder()
//!     .file("./checkins.csv")
//!     .utc_offset(FixedOffset::east_opt(19_800).unwrap())
//!     .open()?;
//!
//! let outcome = tracker.process("A100", Activity::Bus);
//! println!("{}", outcome.message(Activity::Bus));
//! ```
//!
//! ## Outcomes
//!
//! [`Tracker::process`] never fails outright. It returns an [`Outcome`]:
//!
//! | Outcome | Meaning | Written |
//! |---------|---------|---------|
//! | `Recorded(name)` | status and timestamp stored | yes |
//! | `Blocked(reason)` | wrong day, or already done | no |
//! | `NotFound` | no row with that ID code | no |
//! | `PersistFailed(err)` | store unreachable or contended | no |
//!
//! ## Crates
//!
//! - `rollcall-core`: table model, activities, clock, backend trait
//! - `rollcall-wire`: CSV and base64 encodings
//! - `rollcall-storage`: versioned store, retry, backends
//! - `rollcall-engine`: validation and the check-in flow

#![warn(missing_docs)]

mod config;
mod error;
mod tracker;
mod types;

pub mod prelude;

// Re-export main entry points
pub use config::{Config, EventConfig, RetryConfig, StoreConfig, TOKEN_ENV};
pub use error::{Error, Result};
pub use tracker::{Tracker, TrackerBuilder};

// Re-export types
pub use types::*;
