//! Check-in Scenario Test Suite
//!
//! Drives the [`Tracker`] facade end to end against in-process and on-disk
//! tables.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all scenario tests
//! cargo test --test checkin_scenarios
//!
//! # Run the local file scenarios only
//! cargo test --test checkin_scenarios local_file::
//! ```

use std::sync::Arc;

use chrono::{FixedOffset, TimeZone};
use rollcall::{FixedClock, MemoryBlob, RetryPolicy, Tracker};

// Test modules
pub mod event_days;
pub mod export;
pub mod local_file;
pub mod persistence;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Participant table used by most scenarios
pub const SEED: &str = "\
ID Code,Name,Assigned Day,Bus Check-in,Bus Timestamp,Food Collection,Food Timestamp,Conference Check-in,Conference Timestamp,Return Trip,Return Timestamp,Override,Override Timestamp
A100,Ada Lovelace,2025-08-21,No,,No,,No,,No,,No,
B200,Grace Hopper,,No,,No,,No,,No,,No,
C300,Alan Turing,\"2025-08-21, 2025-08-22\",No,,No,,No,,No,,No,
";

/// Event zone for the scenarios: UTC+05:30
pub fn event_zone() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

/// Clock at 10:00 event time on 2025-08-`day`
pub fn clock_on(day: u32) -> Arc<FixedClock> {
    let now = event_zone()
        .with_ymd_and_hms(2025, 8, day, 10, 0, 0)
        .single()
        .unwrap();
    Arc::new(FixedClock::new(now))
}

/// Tracker, its backend and its clock
pub struct Desk {
    pub tracker: Tracker,
    pub blob: Arc<MemoryBlob>,
    pub clock: Arc<FixedClock>,
}

/// Tracker over [`SEED`] on 2025-08-`day`, retrying without pauses
pub fn desk_on(day: u32) -> Desk {
    let blob = Arc::new(MemoryBlob::new(SEED));
    let clock = clock_on(day);
    let tracker = Tracker::builder()
        .backend(blob.clone())
        .clock(clock.clone())
        .retry(RetryPolicy::immediate(3))
        .open()
        .unwrap();
    Desk {
        tracker,
        blob,
        clock,
    }
}
