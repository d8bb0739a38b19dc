//! Day Gating Scenarios
//!
//! Recording on an assigned day, refusals on other days, and the ungated
//! override.

use crate::*;
use rollcall::{Activity, BlockReason, Outcome};

// =============================================================================
// ASSIGNED DAY
// =============================================================================

#[test]
fn test_bus_on_assigned_day_is_recorded() {
    let desk = desk_on(21);

    let outcome = desk.tracker.process_named("a100", "Bus Check-in").unwrap();

    assert!(matches!(outcome, Outcome::Recorded(ref name) if name == "Ada Lovelace"));
    let ada = desk.tracker.lookup("A100").unwrap().unwrap();
    assert!(ada.is_done(Activity::Bus));
    assert_eq!(ada.timestamp(Activity::Bus), Some("2025-08-21 10:00:00"));
}

#[test]
fn test_bus_on_other_day_is_blocked() {
    let desk = desk_on(22);
    let before = desk.blob.text();

    let outcome = desk.tracker.process("A100", Activity::Bus);

    assert_eq!(outcome.block_reason(), Some(BlockReason::NotAssignedToday));
    assert_eq!(outcome.message(Activity::Bus), "Bus Check-in: not assigned for today");
    assert_eq!(desk.blob.text(), before);
    assert_eq!(desk.blob.put_attempts(), 0);
}

#[test]
fn test_every_gated_activity_is_blocked_off_day() {
    let desk = desk_on(23);
    for activity in Activity::ALL.into_iter().filter(|a| a.is_day_gated()) {
        let outcome = desk.tracker.process("C300", activity);
        assert_eq!(
            outcome.block_reason(),
            Some(BlockReason::NotAssignedToday),
            "{} should be gated",
            activity
        );
    }
    assert_eq!(desk.blob.put_attempts(), 0);
}

#[test]
fn test_second_listed_day_is_allowed() {
    let desk = desk_on(22);
    assert!(desk.tracker.process("C300", Activity::Conference).is_recorded());
}

#[test]
fn test_unrestricted_participant_any_day() {
    for day in [1, 21, 31] {
        let desk = desk_on(day);
        assert!(desk.tracker.process("B200", Activity::Food).is_recorded());
    }
}

#[test]
fn test_clock_moves_into_assigned_day() {
    let desk = desk_on(20);
    assert_eq!(
        desk.tracker.process("A100", Activity::Bus).block_reason(),
        Some(BlockReason::NotAssignedToday)
    );

    desk.clock.advance(chrono::Duration::days(1));

    assert!(desk.tracker.process("A100", Activity::Bus).is_recorded());
}

// =============================================================================
// ALREADY RECORDED
// =============================================================================

#[test]
fn test_repeat_is_blocked_and_keeps_first_timestamp() {
    let desk = desk_on(21);
    assert!(desk.tracker.process("A100", Activity::Food).is_recorded());

    desk.clock.advance(chrono::Duration::minutes(30));
    let again = desk.tracker.process("A100", Activity::Food);

    assert_eq!(again.block_reason(), Some(BlockReason::AlreadyRecorded));
    let ada = desk.tracker.lookup("A100").unwrap().unwrap();
    assert_eq!(ada.timestamp(Activity::Food), Some("2025-08-21 10:00:00"));
}

#[test]
fn test_activities_are_independent() {
    let desk = desk_on(21);
    assert!(desk.tracker.process("A100", Activity::Bus).is_recorded());
    assert!(desk.tracker.process("A100", Activity::Food).is_recorded());
    assert!(desk.tracker.process("A100", Activity::Conference).is_recorded());
    assert!(desk.tracker.process("A100", Activity::ReturnTrip).is_recorded());

    let summary = desk.tracker.summary().unwrap();
    assert_eq!(summary.participants, 3);
    for activity in Activity::ALL.into_iter().filter(|a| a.is_day_gated()) {
        assert_eq!(summary.count(activity), 1);
    }
    assert_eq!(summary.count(Activity::Override), 0);
}

// =============================================================================
// OVERRIDE AND LOOKUP
// =============================================================================

#[test]
fn test_override_on_unassigned_day() {
    let desk = desk_on(25);

    assert!(desk.tracker.process("A100", Activity::Override).is_recorded());
    assert_eq!(
        desk.tracker.process("A100", Activity::Override).block_reason(),
        Some(BlockReason::AlreadyRecorded)
    );
    // An override does not open the other gates
    assert_eq!(
        desk.tracker.process("A100", Activity::Bus).block_reason(),
        Some(BlockReason::NotAssignedToday)
    );
}

#[test]
fn test_unknown_id_not_found() {
    let desk = desk_on(21);

    let outcome = desk.tracker.process("Z999", Activity::Bus);

    assert!(matches!(outcome, Outcome::NotFound));
    assert_eq!(
        outcome.message(Activity::Bus),
        "No participant found with that ID code"
    );
    assert!(desk.tracker.lookup("Z999").unwrap().is_none());
    assert_eq!(desk.blob.put_attempts(), 0);
}

#[test]
fn test_padded_id_matches() {
    let desk = desk_on(21);
    assert!(desk.tracker.process("  b200 ", Activity::Bus).is_recorded());
}
