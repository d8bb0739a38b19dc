//! Persistence Scenarios
//!
//! What reaches the shared table: retries, failures, concurrent desks and
//! the wall-clock timestamp.

use crate::*;
use chrono::{NaiveDateTime, Utc};
use rollcall::{Activity, BlockReason, Outcome, StoreError, TIMESTAMP_FORMAT};
use std::thread;

// =============================================================================
// RETRY BOUND
// =============================================================================

#[test]
fn test_transient_failures_absorbed() {
    let desk = desk_on(21);
    desk.blob.fail_next_puts(2);

    let outcome = desk.tracker.process("A100", Activity::Bus);

    assert!(outcome.is_recorded());
    assert_eq!(desk.blob.put_attempts(), 3);
    assert_eq!(desk.blob.messages(), vec!["Bus check-in for Ada Lovelace"]);
}

#[test]
fn test_exhausted_retries_leave_table_untouched() {
    let desk = desk_on(21);
    let before = desk.blob.text();
    desk.blob.fail_all_puts(true);

    let outcome = desk.tracker.process("A100", Activity::Bus);

    match outcome {
        Outcome::PersistFailed(StoreError::Exhausted { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected PersistFailed, got {:?}", other),
    }
    assert_eq!(desk.blob.put_attempts(), 3);
    assert_eq!(desk.blob.text(), before);

    // Once the store recovers the same request goes through
    desk.blob.fail_all_puts(false);
    assert!(desk.tracker.process("A100", Activity::Bus).is_recorded());
}

#[test]
fn test_persist_failure_message() {
    let desk = desk_on(21);
    desk.blob.fail_all_puts(true);

    let message = desk.tracker.process("A100", Activity::Bus).message(Activity::Bus);

    assert!(message.starts_with("Failed to save: gave up after 3 attempts"), "{}", message);
}

// =============================================================================
// CONCURRENT DESKS
// =============================================================================

#[test]
fn test_two_desks_different_participants() {
    let blob = Arc::new(MemoryBlob::new(SEED));
    let open = || {
        Tracker::builder()
            .backend(blob.clone())
            .clock(clock_on(21))
            .retry(RetryPolicy::immediate(10))
            .open()
            .unwrap()
    };
    let (bus_desk, food_desk) = (open(), open());

    let a = thread::spawn(move || bus_desk.process("A100", Activity::Bus));
    let b = thread::spawn(move || food_desk.process("B200", Activity::Food));
    assert!(a.join().unwrap().is_recorded());
    assert!(b.join().unwrap().is_recorded());

    let reader = open();
    let table = reader.snapshot().unwrap();
    assert_eq!(table.participants().filter(|p| p.is_done(Activity::Bus)).count(), 1);
    assert!(reader.lookup("A100").unwrap().unwrap().is_done(Activity::Bus));
    assert!(reader.lookup("B200").unwrap().unwrap().is_done(Activity::Food));
}

#[test]
fn test_many_desks_same_participant_record_once() {
    let desk = desk_on(21);
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let tracker = desk.tracker.clone();
            thread::spawn(move || tracker.process("B200", Activity::Conference))
        })
        .collect();

    let outcomes: Vec<Outcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let recorded = outcomes.iter().filter(|o| o.is_recorded()).count();
    let repeats = outcomes
        .iter()
        .filter(|o| o.block_reason() == Some(BlockReason::AlreadyRecorded))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(repeats, 5);
}

// =============================================================================
// WALL CLOCK
// =============================================================================

#[test]
fn test_recorded_timestamp_within_processing_window() {
    let tracker = Tracker::builder()
        .memory(SEED)
        .utc_offset(event_zone())
        .retry(RetryPolicy::immediate(3))
        .open()
        .unwrap();

    let started = Utc::now().with_timezone(&event_zone()).naive_local();
    assert!(tracker.process("B200", Activity::ReturnTrip).is_recorded());
    let finished = Utc::now().with_timezone(&event_zone()).naive_local();

    let grace = tracker.lookup("B200").unwrap().unwrap();
    assert!(grace.is_done(Activity::ReturnTrip));
    let stamp =
        NaiveDateTime::parse_from_str(grace.timestamp(Activity::ReturnTrip).unwrap(), TIMESTAMP_FORMAT)
            .unwrap();
    // The cell has whole seconds
    assert!(stamp >= started - chrono::Duration::seconds(1));
    assert!(stamp <= finished);
}
