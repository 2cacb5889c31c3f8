use std::fs;

use game::leaderboard::{Entry, LeaderboardStore, sort_ascending};

fn entry(name: &str, time: f64) -> Entry {
    Entry {
        name: name.to_string(),
        department: "CS".to_string(),
        student_id: "123".to_string(),
        time,
        timestamp: 1_700_000_000_000,
    }
}

#[test]
fn missing_record_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LeaderboardStore::new(dir.path().join("leaderboard.json"));
    assert!(store.read().is_empty());
}

#[test]
fn malformed_record_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");
    fs::write(&path, b"[{ definitely not json").unwrap();

    let store = LeaderboardStore::new(&path);
    assert!(store.read().is_empty());
}

#[test]
fn write_then_read_preserves_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = LeaderboardStore::new(dir.path().join("nested").join("leaderboard.json"));

    let mut board = vec![entry("slow", 5.0), entry("fast", 1.5)];
    sort_ascending(&mut board);
    store.write(&board).unwrap();

    let read_back = store.read();
    assert_eq!(read_back, board);
    assert_eq!(read_back[0].name, "fast");
}

#[test]
fn write_replaces_prior_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = LeaderboardStore::new(dir.path().join("leaderboard.json"));

    store.write(&[entry("first", 1.0), entry("second", 2.0)]).unwrap();
    store.write(&[entry("only", 3.0)]).unwrap();

    let board = store.read();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "only");
}

#[test]
fn record_layout_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = LeaderboardStore::new(dir.path().join("leaderboard.json"));
    store.write(&[entry("Kim", 2.345)]).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"studentId\""));
    assert!(!raw.contains("\"student_id\""));
}
