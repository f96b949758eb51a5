//! Spaced repetition algorithm implementations.

pub mod ladder;

use crate::types::ItemProgress;
use chrono::{DateTime, Utc};

/// Result of scheduling an item after grading.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub new_state: ItemProgress,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate next review state after a graded attempt.
    fn schedule(&self, state: &ItemProgress, is_correct: bool, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for an item that was never graded.
    fn initial_state(&self, now: DateTime<Utc>) -> ItemProgress;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "ladder" => Some(Box::new(ladder::MasteryLadder::default())),
        _ => None,
    }
}
