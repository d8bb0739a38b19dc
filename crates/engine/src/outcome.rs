//! Result of a check-in request

use crate::validation::BlockReason;
use rollcall_core::{Activity, StoreError};

/// What happened to one `process` call
///
/// Only `PersistFailed` is an error; `NotFound` and `Blocked` are expected,
/// user-facing classifications.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// No participant with that ID code
    NotFound,
    /// Policy refused the action; nothing was written
    Blocked(BlockReason),
    /// The store could not be read or written; nothing was written
    PersistFailed(StoreError),
    /// The action was written; carries the participant's name
    Recorded(String),
}

impl Outcome {
    /// The action was written
    pub fn is_recorded(&self) -> bool {
        matches!(self, Outcome::Recorded(_))
    }

    /// Refusal reason, if blocked
    pub fn block_reason(&self) -> Option<BlockReason> {
        match self {
            Outcome::Blocked(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Short machine-readable label
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::NotFound => "not_found",
            Outcome::Blocked(_) => "blocked",
            Outcome::PersistFailed(_) => "persist_failed",
            Outcome::Recorded(_) => "recorded",
        }
    }

    /// Message for the staff member at the desk
    pub fn message(&self, activity: Activity) -> String {
        match self {
            Outcome::NotFound => "No participant found with that ID code".to_string(),
            Outcome::Blocked(reason) => format!("{}: {}", activity, reason),
            Outcome::PersistFailed(e) => format!("Failed to save: {}", e),
            Outcome::Recorded(name) => format!("{} recorded for {}", activity, name),
        }
    }
}
