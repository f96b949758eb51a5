//! Mastery ladder: a fixed six-rung interval schedule.
//!
//! Each correct first attempt climbs one rung, each miss drops two. The rung
//! reached selects how long the item rests before it is due again.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::ItemProgress;
use chrono::{DateTime, Duration, Utc};

/// Highest mastery level.
pub const MAX_LEVEL: u8 = 5;

/// Level at which an item counts as mastered.
pub const MASTERED_LEVEL: u8 = 4;

/// Rest period per mastery level, in days.
pub const REVIEW_INTERVAL_DAYS: [i64; 6] = [0, 1, 3, 7, 14, 30];

/// Mastery ladder with configurable steps.
#[derive(Debug, Clone)]
pub struct MasteryLadder {
    pub reward: u8,
    pub penalty: u8,
    pub intervals: [Duration; 6],
}

impl Default for MasteryLadder {
    fn default() -> Self {
        Self {
            reward: 1,
            penalty: 2,
            intervals: REVIEW_INTERVAL_DAYS.map(Duration::days),
        }
    }
}

impl SpacedRepetitionAlgorithm for MasteryLadder {
    fn name(&self) -> &'static str {
        "ladder"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> ItemProgress {
        ItemProgress {
            mastery_level: 0,
            next_review_date: now,
            last_reviewed: None,
        }
    }

    fn schedule(&self, state: &ItemProgress, is_correct: bool, now: DateTime<Utc>) -> SchedulingResult {
        let current = state.mastery_level.min(MAX_LEVEL);
        let new_level = if is_correct {
            current.saturating_add(self.reward).min(MAX_LEVEL)
        } else {
            current.saturating_sub(self.penalty)
        };

        let next_due = now + self.interval(new_level);

        SchedulingResult {
            new_state: ItemProgress {
                mastery_level: new_level,
                next_review_date: next_due,
                last_reviewed: Some(now),
            },
            next_due,
        }
    }
}

impl MasteryLadder {
    /// Rest period for a level.
    pub fn interval(&self, level: u8) -> Duration {
        self.intervals[usize::from(level.min(MAX_LEVEL))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn at_level(level: u8) -> ItemProgress {
        ItemProgress {
            mastery_level: level,
            next_review_date: now(),
            last_reviewed: Some(now()),
        }
    }

    #[test]
    fn new_item_starts_at_level_zero_and_due() {
        let ladder = MasteryLadder::default();
        let state = ladder.initial_state(now());
        assert_eq!(state.mastery_level, 0);
        assert!(state.is_due(now()));
        assert_eq!(state.last_reviewed, None);
    }

    #[test]
    fn correct_climbs_one_level_up_to_max() {
        let ladder = MasteryLadder::default();
        let mut state = ladder.initial_state(now());
        for expected in 1..=5 {
            state = ladder.schedule(&state, true, now()).new_state;
            assert_eq!(state.mastery_level, expected);
        }
        state = ladder.schedule(&state, true, now()).new_state;
        assert_eq!(state.mastery_level, MAX_LEVEL);
    }

    #[test]
    fn miss_drops_two_levels_with_floor() {
        let ladder = MasteryLadder::default();
        assert_eq!(ladder.schedule(&at_level(5), false, now()).new_state.mastery_level, 3);
        assert_eq!(ladder.schedule(&at_level(1), false, now()).new_state.mastery_level, 0);
        assert_eq!(ladder.schedule(&at_level(0), false, now()).new_state.mastery_level, 0);
    }

    #[test]
    fn next_review_uses_new_level_interval() {
        let ladder = MasteryLadder::default();
        let result = ladder.schedule(&at_level(2), true, now());
        assert_eq!(result.new_state.mastery_level, 3);
        assert_eq!(result.next_due, now() + Duration::days(7));
        assert_eq!(result.new_state.last_reviewed, Some(now()));

        let result = ladder.schedule(&at_level(1), false, now());
        assert_eq!(result.next_due, now());
    }

    #[test]
    fn out_of_range_stored_level_is_clamped() {
        let ladder = MasteryLadder::default();
        let result = ladder.schedule(&at_level(9), false, now());
        assert_eq!(result.new_state.mastery_level, 3);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(crate::algorithm::get_algorithm("ladder").unwrap().name(), "ladder");
        assert!(crate::algorithm::get_algorithm("leitner").is_none());
    }
}
