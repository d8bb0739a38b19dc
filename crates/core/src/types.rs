//! Core identifiers for the check-in tracker
//!
//! - [`IdCode`]: participant key, compared trimmed and case-folded
//! - [`Activity`]: one trackable check-in type
//! - [`VersionToken`]: revision of the remote blob, required for conditional writes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Normalized participant identifier
///
/// Input is trimmed and lowercased on construction so two codes that differ
/// only in surrounding whitespace or letter case compare equal.
///
/// # Examples
///
/// ```
/// use rollcall_core::IdCode;
///
/// assert_eq!(IdCode::new("  A100 "), IdCode::new("a100"));
/// assert!(IdCode::new("   ").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdCode(String);

impl IdCode {
    /// Normalize raw input into an ID code
    pub fn new(raw: &str) -> Self {
        IdCode(raw.trim().to_lowercase())
    }

    /// Normalized form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the input was blank
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check a raw table cell against this code
    pub fn matches(&self, cell: &str) -> bool {
        !self.is_empty() && cell.trim().to_lowercase() == self.0
    }
}

impl fmt::Display for IdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One trackable check-in type
///
/// Each activity owns a status column and a timestamp column in the table.
/// All activities except [`Activity::Override`] are gated by the
/// participant's assigned days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Activity {
    /// Boarding the outbound bus
    Bus,
    /// Collecting the food pack
    Food,
    /// Entering the conference hall
    Conference,
    /// Boarding the return bus
    ReturnTrip,
    /// Manual override marker (informational, never day-gated)
    Override,
}

impl Activity {
    /// All activities, in column order
    pub const ALL: [Activity; 5] = [
        Activity::Bus,
        Activity::Food,
        Activity::Conference,
        Activity::ReturnTrip,
        Activity::Override,
    ];

    /// Header of the status column
    pub fn status_column(self) -> &'static str {
        match self {
            Activity::Bus => "Bus Check-in",
            Activity::Food => "Food Collection",
            Activity::Conference => "Conference Check-in",
            Activity::ReturnTrip => "Return Trip",
            Activity::Override => "Override",
        }
    }

    /// Header of the timestamp column
    pub fn timestamp_column(self) -> &'static str {
        match self {
            Activity::Bus => "Bus Timestamp",
            Activity::Food => "Food Timestamp",
            Activity::Conference => "Conference Timestamp",
            Activity::ReturnTrip => "Return Timestamp",
            Activity::Override => "Override Timestamp",
        }
    }

    /// Short alias accepted on the command line
    pub fn alias(self) -> &'static str {
        match self {
            Activity::Bus => "bus",
            Activity::Food => "food",
            Activity::Conference => "conference",
            Activity::ReturnTrip => "return",
            Activity::Override => "override",
        }
    }

    /// Whether the activity is restricted to the participant's assigned days
    pub fn is_day_gated(self) -> bool {
        !matches!(self, Activity::Override)
    }

    /// Human-readable write description, e.g. `Bus check-in for Ada`
    pub fn describe_for(self, name: &str) -> String {
        match self {
            Activity::Bus => format!("Bus check-in for {}", name),
            Activity::Food => format!("Food collection for {}", name),
            Activity::Conference => format!("Conference check-in for {}", name),
            Activity::ReturnTrip => format!("Return trip check-in for {}", name),
            Activity::Override => format!("Override for {}", name),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_column())
    }
}

/// Unknown activity name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity '{0}' (expected one of: bus, food, conference, return, override)")]
pub struct ParseActivityError(pub String);

impl FromStr for Activity {
    type Err = ParseActivityError;

    /// Accepts the status column name or the short alias, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Activity::ALL
            .into_iter()
            .find(|a| a.alias() == wanted || a.status_column().to_lowercase() == wanted)
            .ok_or_else(|| ParseActivityError(s.trim().to_string()))
    }
}

/// Opaque revision identifier of the remote blob
///
/// Obtained from a fetch and handed back on a conditional write. Tokens are
/// compared for equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionToken(String);

impl VersionToken {
    /// Wrap a backend-specific revision string
    pub fn new(token: impl Into<String>) -> Self {
        VersionToken(token.into())
    }

    /// Raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
