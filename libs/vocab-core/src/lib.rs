//! Core engine for Latvian-Dutch vocabulary drills.
//!
//! Provides:
//! - Typo-tolerant answer matching (Levenshtein distance)
//! - The mastery ladder spaced-repetition algorithm
//! - Progress, streak and leaderboard persistence over a key-value store
//! - Round scheduling and the review session state machine
//! - A plain-text catalog format and its parser

pub mod algorithm;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod leaderboard;
pub mod matching;
pub mod parser;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;

pub use algorithm::{get_algorithm, SchedulingResult, SpacedRepetitionAlgorithm};
pub use catalog::{Catalog, VocabularyCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ParseError, Result, SessionError, StoreError};
pub use leaderboard::Leaderboard;
pub use matching::{evaluate, levenshtein_distance, MatchResult};
pub use parser::parse;
pub use progress::{study_day, ProgressStore};
pub use scheduler::{Scheduler, ALL_CATEGORIES, ROUND_OPTIONS};
pub use session::{AnswerOutcome, Feedback, Phase, RoundSummary, Session, SessionSnapshot};
pub use store::{keys, KeyValueStore, MemoryStore};
pub use types::{
    Direction, EngineSettings, ItemProgress, Language, LeaderboardEntry, MasteryStats, Preferences,
    RoundHistoryItem, RoundOutcome, StreakState, UserProgress, VocabularyItem,
};
