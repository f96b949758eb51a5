//! Marathon leaderboard.

use crate::store::{keys, load_json, save_json, KeyValueStore};
use crate::types::LeaderboardEntry;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// Name recorded when the player leaves it blank.
pub const ANONYMOUS: &str = "Anonymous";

/// Top scores persisted under [`keys::LEADERBOARD`].
pub struct Leaderboard<S> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    /// Stored entries, best first. Unreadable data reads as an empty board.
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        load_json(&self.store, keys::LEADERBOARD).unwrap_or_default()
    }

    /// Record a score and return the updated board.
    pub fn save_score(&self, name: &str, score: u32, accuracy: u32, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        let name = match name.trim() {
            "" => ANONYMOUS.to_string(),
            trimmed => trimmed.to_string(),
        };

        let mut board = self.entries();
        board.push(LeaderboardEntry {
            name,
            score,
            accuracy,
            date: now,
        });
        board.sort_by_key(|entry| (Reverse(entry.score), Reverse(entry.accuracy), Reverse(entry.date)));
        board.truncate(self.capacity);

        if let Err(e) = save_json(&self.store, keys::LEADERBOARD, &board) {
            tracing::warn!(error = %e, "failed to persist leaderboard");
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn empty_when_nothing_stored() {
        let board = Leaderboard::new(MemoryStore::new(), 10);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn sorted_by_score_then_accuracy_then_recency() {
        let board = Leaderboard::new(MemoryStore::new(), 10);
        board.save_score("a", 100, 60, at(0));
        board.save_score("b", 120, 70, at(1));
        board.save_score("c", 100, 80, at(2));
        let entries = board.save_score("d", 100, 80, at(3));

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c", "a"]);
        assert_eq!(board.entries(), entries);
    }

    #[test]
    fn capped_at_capacity() {
        let board = Leaderboard::new(MemoryStore::new(), 10);
        for i in 0..12 {
            board.save_score("p", i, 50, at(i64::from(i)));
        }
        let entries = board.entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].score, 11);
        assert_eq!(entries[9].score, 2);
    }

    #[test]
    fn blank_name_becomes_anonymous() {
        let board = Leaderboard::new(MemoryStore::new(), 10);
        let entries = board.save_score("   ", 5, 100, at(0));
        assert_eq!(entries[0].name, ANONYMOUS);

        let entries = board.save_score("  Ilze ", 6, 100, at(1));
        assert_eq!(entries[0].name, "Ilze");
    }

    #[test]
    fn corrupt_board_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(keys::LEADERBOARD, "{\"oops\": 1}").unwrap();
        assert!(Leaderboard::new(store, 10).entries().is_empty());
    }
}
