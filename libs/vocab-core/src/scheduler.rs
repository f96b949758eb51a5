//! Round assembly: due items first, topped up with random fillers.

use crate::progress::ProgressStore;
use crate::store::KeyValueStore;
use crate::types::VocabularyItem;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Category selection that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Round sizes offered by the front end.
pub const ROUND_OPTIONS: [usize; 5] = [5, 10, 20, 50, 180];

/// Builds the item list for a review round.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Round size at or above which every candidate is drilled.
    pub marathon_size: usize,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self { marathon_size: 180 }
    }
}

impl Scheduler {
    pub fn new(marathon_size: usize) -> Self {
        Self { marathon_size }
    }

    pub fn is_marathon(&self, round_size: usize) -> bool {
        round_size >= self.marathon_size
    }

    /// Pick the items for a round.
    ///
    /// Due items are preferred; any shortfall is filled with a random sample
    /// of the remaining candidates. The result is shuffled and never contains
    /// the same id twice. A catalog smaller than `round_size` yields a
    /// shorter round.
    pub fn build_round<S: KeyValueStore, R: Rng + ?Sized>(
        &self,
        catalog: &[VocabularyItem],
        selected_categories: &[String],
        round_size: usize,
        progress: &ProgressStore<S>,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<VocabularyItem> {
        let mut candidates = filter_by_categories(catalog, selected_categories);
        if candidates.is_empty() {
            tracing::debug!(?selected_categories, "category filter matched nothing, using full catalog");
            candidates = catalog.to_vec();
        }

        let mut round = if self.is_marathon(round_size) {
            candidates
        } else {
            let mut round = progress.get_due_items(&candidates, round_size, rng, now);
            let due_count = round.len();

            if due_count < round_size {
                let used: HashSet<&str> = round.iter().map(|item| item.id.as_str()).collect();
                let mut fillers: Vec<VocabularyItem> = candidates
                    .iter()
                    .filter(|item| !used.contains(item.id.as_str()))
                    .cloned()
                    .collect();
                fillers.shuffle(rng);
                fillers.truncate(round_size - due_count);
                round.extend(fillers);
            }

            tracing::debug!(due = due_count, total = round.len(), "assembled round");
            round
        };

        round.shuffle(rng);
        round
    }
}

/// Items whose category is selected. An empty selection, or one containing
/// [`ALL_CATEGORIES`], keeps everything.
pub fn filter_by_categories(catalog: &[VocabularyItem], selected: &[String]) -> Vec<VocabularyItem> {
    if selected.is_empty() || selected.iter().any(|c| c == ALL_CATEGORIES) {
        return catalog.to_vec();
    }

    catalog
        .iter()
        .filter(|item| {
            item.category
                .as_ref()
                .is_some_and(|category| selected.contains(category))
        })
        .cloned()
        .collect()
}
