//! Export Scenarios
//!
//! The CSV handed to organisers matches what the desks wrote.

use crate::*;
use rollcall::Activity;

#[test]
fn test_untouched_table_exports_as_seeded() {
    let desk = desk_on(21);
    assert_eq!(desk.tracker.export_csv().unwrap(), SEED);
}

#[test]
fn test_export_reflects_recorded_check_in() {
    let desk = desk_on(21);
    assert!(desk.tracker.process("A100", Activity::Bus).is_recorded());

    let csv = desk.tracker.export_csv().unwrap();

    assert!(csv.contains("\nA100,Ada Lovelace,2025-08-21,Yes,2025-08-21 10:00:00,No,"));
    assert!(csv.contains("\nC300,Alan Turing,\"2025-08-21, 2025-08-22\",No,"));
    assert_eq!(csv, desk.blob.text());
}

#[test]
fn test_export_includes_added_columns() {
    let tracker = Tracker::builder()
        .memory("ID Code,Name\nA1,Ada\nB2,Grace\n")
        .clock(clock_on(21))
        .open()
        .unwrap();
    assert!(tracker.process("a1", Activity::Food).is_recorded());

    assert_eq!(
        tracker.export_csv().unwrap(),
        "ID Code,Name,Food Collection,Food Timestamp\n\
         A1,Ada,Yes,2025-08-21 10:00:00\n\
         B2,Grace,,\n"
    );
}

#[test]
fn test_snapshot_served_from_cache() {
    let desk = desk_on(21);
    desk.tracker.snapshot().unwrap();
    desk.tracker.summary().unwrap();
    desk.tracker.export_csv().unwrap();

    assert_eq!(desk.blob.fetches(), 1);
    assert!(desk.tracker.lookup("A100").unwrap().is_some());
    assert_eq!(desk.blob.fetches(), 1);
}
