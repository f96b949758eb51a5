mod common;

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use vocab_core::{keys, KeyValueStore, Leaderboard, ProgressStore};
use vocab_drill::db::SqliteStore;

#[test]
fn get_set_remove() {
    let store = common::store();
    assert_eq!(store.get("missing").unwrap(), None);

    store.set("k", "v1").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));

    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);

    // Removing an absent key is not an error.
    store.remove("k").unwrap();
}

#[test]
fn keys_are_listed_sorted() {
    let store = common::store();
    store.set("b", "1").unwrap();
    store.set("a", "2").unwrap();
    assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
}

#[test]
fn progress_persists_across_reopen() {
    let dir = std::env::temp_dir().join(format!("vocab-drill-test-{}", std::process::id()));
    let path = dir.join("nested").join("progress.db");
    let _ = std::fs::remove_dir_all(&dir);
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();

    {
        let store = SqliteStore::open(&path).unwrap();
        let progress = ProgressStore::new(&store);
        progress.update_item_progress("dog", true, now);
        progress.update_streak(now.date_naive());
    }

    let store = SqliteStore::open(&path).unwrap();
    let progress = ProgressStore::new(&store);
    let item = progress.item_progress("dog").unwrap();
    assert_eq!(item.mastery_level, 1);
    assert_eq!(item.next_review_date, now + Duration::days(1));
    assert_eq!(progress.current_streak(), 1);

    drop(store);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn leaderboard_on_sqlite() {
    let store = common::store();
    let board = Leaderboard::new(&store, 10);
    board.save_score("Anna", 150, 83, common::start_time());
    board.save_score("Jānis", 170, 94, common::start_time());

    let reloaded = Leaderboard::new(&store, 10).entries();
    let names: Vec<_> = reloaded.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Jānis", "Anna"]);
    assert!(store.keys().unwrap().contains(&keys::LEADERBOARD.to_string()));
}
