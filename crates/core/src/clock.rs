//! Event-local time
//!
//! Check-ins are stamped and day-gated in the event's time zone, which need
//! not match the host running the tracker. The zone is a fixed UTC offset.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use parking_lot::Mutex;

/// Format of timestamps written into the table
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current event-local time
pub trait Clock: Send + Sync {
    /// Current time in the event zone
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current calendar day in the event zone
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current time formatted for a timestamp cell
    fn stamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Wall clock shifted into the event zone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Wall clock reporting in `offset`
    pub fn new(offset: FixedOffset) -> Self {
        SystemClock { offset }
    }

    /// Wall clock reporting in UTC
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Configured zone
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    /// Clock frozen at `now`
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        FixedClock {
            now: Mutex::new(now),
        }
    }

    /// Clock frozen at midday UTC on `day`
    pub fn at_day(day: NaiveDate) -> Self {
        let noon = (day.and_time(NaiveTime::default()) + Duration::hours(12))
            .and_utc()
            .fixed_offset();
        Self::new(noon)
    }

    /// Jump to a new instant
    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock() = now;
    }

    /// Move forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM`, `+HH` or `Z` into an offset
///
/// # Examples
///
/// ```
/// use rollcall_core::parse_utc_offset;
///
/// assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 19_800);
/// assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
/// assert!(parse_utc_offset("+25:00").is_none());
/// ```
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
