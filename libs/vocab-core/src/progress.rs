//! Per-item mastery and daily streak persistence.

use crate::algorithm::ladder::{MasteryLadder, MASTERED_LEVEL};
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::error::StoreError;
use crate::store::{keys, load_json, save_json, KeyValueStore};
use crate::types::{ItemProgress, MasteryStats, UserProgress, VocabularyItem};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Calendar day a timestamp belongs to for streak purposes.
///
/// Days roll over at `daily_reset_hour` UTC, so a late-night session before
/// the reset hour still counts towards the previous day.
pub fn study_day(now: DateTime<Utc>, daily_reset_hour: u32) -> NaiveDate {
    (now - Duration::hours(i64::from(daily_reset_hour.min(23)))).date_naive()
}

/// Items never graded are always due.
fn is_due(progress: &UserProgress, item: &VocabularyItem, now: DateTime<Utc>) -> bool {
    progress
        .items
        .get(&item.id)
        .map_or(true, |p| p.is_due(now))
}

/// Read/write access to [`UserProgress`] stored in a key-value backend.
pub struct ProgressStore<S> {
    store: S,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_algorithm(store, Box::new(MasteryLadder::default()))
    }

    pub fn with_algorithm(store: S, algorithm: Box<dyn SpacedRepetitionAlgorithm>) -> Self {
        Self { store, algorithm }
    }

    /// Underlying key-value backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored progress, or the zero value if nothing usable is stored.
    pub fn get_progress(&self) -> UserProgress {
        load_json(&self.store, keys::USER_PROGRESS).unwrap_or_default()
    }

    /// Overwrite stored progress.
    pub fn save_progress(&self, progress: &UserProgress) -> Result<(), StoreError> {
        save_json(&self.store, keys::USER_PROGRESS, progress)
    }

    /// Stored state for a single item.
    pub fn item_progress(&self, item_id: &str) -> Option<ItemProgress> {
        self.get_progress().items.remove(item_id)
    }

    /// Apply one graded attempt to an item and persist the result.
    ///
    /// A failed write is logged; the updated progress is returned either way.
    pub fn update_item_progress(&self, item_id: &str, is_correct: bool, now: DateTime<Utc>) -> UserProgress {
        let mut progress = self.get_progress();

        let current = progress
            .items
            .get(item_id)
            .cloned()
            .unwrap_or_else(|| self.algorithm.initial_state(now));
        let result = self.algorithm.schedule(&current, is_correct, now);

        tracing::debug!(
            item_id,
            is_correct,
            from = current.mastery_level,
            to = result.new_state.mastery_level,
            next_due = %result.next_due,
            "updated item mastery"
        );

        progress.items.insert(item_id.to_string(), result.new_state);

        if let Err(e) = self.save_progress(&progress) {
            tracing::warn!(item_id, error = %e, "failed to persist item progress");
        }
        progress
    }

    /// Record play on `today` and return the resulting streak.
    pub fn update_streak(&self, today: NaiveDate) -> u32 {
        let mut progress = self.get_progress();
        let last_played = progress.streak.last_played_date;

        if last_played == Some(today) {
            return progress.streak.current_streak;
        }

        if last_played.is_some() && last_played == today.pred_opt() {
            progress.streak.current_streak += 1;
        } else {
            progress.streak.current_streak = 1;
        }
        progress.streak.last_played_date = Some(today);

        if let Err(e) = self.save_progress(&progress) {
            tracing::warn!(error = %e, "failed to persist streak");
        }
        progress.streak.current_streak
    }

    /// Current streak without recording play.
    pub fn current_streak(&self) -> u32 {
        self.get_progress().streak.current_streak
    }

    /// Up to `limit` due items from `candidates`, in random order.
    ///
    /// Items never graded are always due. Never pads with items that are
    /// not due.
    pub fn get_due_items<R: Rng + ?Sized>(
        &self,
        candidates: &[VocabularyItem],
        limit: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<VocabularyItem> {
        let progress = self.get_progress();

        let mut due: Vec<VocabularyItem> = candidates
            .iter()
            .filter(|item| is_due(&progress, item, now))
            .cloned()
            .collect();

        due.shuffle(rng);
        due.truncate(limit);
        due
    }

    /// Number of `items` due at `now`.
    pub fn due_count(&self, items: &[VocabularyItem], now: DateTime<Utc>) -> usize {
        let progress = self.get_progress();
        items
            .iter()
            .filter(|item| is_due(&progress, item, now))
            .count()
    }

    /// Classify items as new, learning or mastered.
    pub fn get_mastery_stats(&self, all_vocabulary: &[VocabularyItem]) -> MasteryStats {
        let progress = self.get_progress();
        let mut stats = MasteryStats::default();

        for item in all_vocabulary {
            match progress.items.get(&item.id) {
                None => stats.new_items += 1,
                Some(p) if p.mastery_level == 0 => stats.new_items += 1,
                Some(p) if p.mastery_level >= MASTERED_LEVEL => stats.mastered += 1,
                Some(_) => stats.learning += 1,
            }
        }

        stats
    }

    /// Forget all stored progress and the streak.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.remove(keys::USER_PROGRESS)
    }
}
