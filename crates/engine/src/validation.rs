//! Per-participant action validation
//!
//! A pure classification of `(participant, activity, today)`. Nothing here is
//! stored; the verdict is recomputed from the table on every request.
//!
//! ```text
//! day-gated && assigned non-empty && today not assigned -> Blocked(NotAssignedToday)
//! status already Yes                                     -> Blocked(AlreadyRecorded)
//! otherwise                                              -> Allowed
//! ```
//!
//! An empty assigned-day list means unrestricted, never a block. `Override`
//! is not day-gated and does not affect the other activities.

use chrono::NaiveDate;
use rollcall_core::{Activity, Participant};
use serde::Serialize;
use std::fmt;

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockReason {
    /// Participant has assigned days and today is not one of them
    NotAssignedToday,
    /// The activity is already marked done
    AlreadyRecorded,
}

impl BlockReason {
    /// User-facing reason text
    pub fn as_str(self) -> &'static str {
        match self {
            BlockReason::NotAssignedToday => "not assigned for today",
            BlockReason::AlreadyRecorded => "already recorded",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The action may be recorded
    Allowed,
    /// The action must not be recorded
    Blocked(BlockReason),
}

/// Classify `activity` for `participant` on `today`
pub fn validate(participant: &Participant, activity: Activity, today: NaiveDate) -> Verdict {
    if activity.is_day_gated()
        && !participant.assigned.is_unrestricted()
        && !participant.assigned.contains(today)
    {
        return Verdict::Blocked(BlockReason::NotAssignedToday);
    }
    if participant.is_done(activity) {
        return Verdict::Blocked(BlockReason::AlreadyRecorded);
    }
    Verdict::Allowed
}
