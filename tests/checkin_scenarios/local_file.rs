//! Local File Scenarios
//!
//! A tracker configured against a CSV on disk, as the command line tool
//! runs with `--local`.

use crate::*;
use rollcall::{Activity, BlockReason, Config, Error};
use std::fs;

fn config_for(path: &std::path::Path) -> Config {
    let mut config = Config::from_toml_str("[event]\nutc_offset = \"+05:30\"\n").unwrap();
    config.store.local = Some(path.to_path_buf());
    config.retry.delay_ms = 0;
    config
}

#[test]
fn test_check_in_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkins.csv");
    fs::write(&path, SEED).unwrap();

    let tracker = Tracker::from_config(&config_for(&path)).unwrap();
    assert!(tracker.process("B200", Activity::Bus).is_recorded());

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("\nB200,Grace Hopper,,Yes,"));
    assert!(tracker.describe().starts_with("file:"));
}

#[test]
fn test_second_tracker_sees_first_trackers_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkins.csv");
    fs::write(&path, SEED).unwrap();
    let config = config_for(&path);

    let first = Tracker::from_config(&config).unwrap();
    let second = Tracker::from_config(&config).unwrap();
    // Warm the second tracker's cache before the first writes
    second.snapshot().unwrap();

    assert!(first.process("B200", Activity::Food).is_recorded());

    assert_eq!(
        second.process("B200", Activity::Food).block_reason(),
        Some(BlockReason::AlreadyRecorded)
    );
}

#[test]
fn test_outside_edit_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkins.csv");
    fs::write(&path, SEED).unwrap();
    let tracker = Tracker::from_config(&config_for(&path)).unwrap();
    tracker.snapshot().unwrap();

    let edited = format!("{}D400,Edsger Dijkstra,,No,,No,,No,,No,,No,\n", SEED);
    fs::write(&path, &edited).unwrap();
    assert!(tracker.process("D400", Activity::Bus).is_recorded());

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("\nD400,Edsger Dijkstra,,Yes,"));
    assert!(on_disk.contains("\nA100,Ada Lovelace,"));
}

#[test]
fn test_missing_file_is_a_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = Tracker::from_config(&config_for(&dir.path().join("absent.csv"))).unwrap();

    let err = tracker.snapshot().unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert!(err.is_retryable());
}
