//! Review round orchestration.
//!
//! A [`Session`] walks the learner through one round at a time:
//!
//! ```text
//! NotStarted --start--> InRound --advance (last item)--> RoundOverview
//!     ^                    |                                  |
//!     +-------exit---------+----------------exit--------------+
//!                          ^                                  |
//!                          +-------------restart--------------+
//! ```
//!
//! Only the first attempt at an item changes its mastery. A miss earns one
//! retry; the retry is graded and recorded but never touches progress.
//! While a round is active its state is snapshotted to the store so it can
//! be resumed after a restart of the process.

use crate::catalog::{Catalog, VocabularyCatalog};
use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::leaderboard::Leaderboard;
use crate::matching;
use crate::progress::{study_day, ProgressStore};
use crate::scheduler::Scheduler;
use crate::store::{keys, load_json, save_json, KeyValueStore};
use crate::types::{
    Direction, EngineSettings, LeaderboardEntry, Preferences, RoundHistoryItem, RoundOutcome,
    VocabularyItem,
};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, SessionError>;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InRound,
    RoundOverview,
}

/// Feedback category for a graded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Exact on the first attempt.
    Perfect,
    /// Accepted with a typo.
    CloseCall,
    /// Missed the first attempt, one retry left.
    TryAgain,
    /// Exact on the retry.
    Correct,
    /// Missed both attempts.
    Incorrect,
}

/// Result of [`Session::submit_answer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub is_close_call: bool,
    /// 1 for the first attempt, 2 for the retry.
    pub attempt: u8,
    /// Whether another attempt is allowed for this item.
    pub can_retry: bool,
    pub correct_answer: String,
    pub feedback: Feedback,
}

/// Round overview figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub score: u32,
    pub total: usize,
    /// Score as a rounded percentage of the round size.
    pub accuracy_percent: u32,
    pub perfect: usize,
    pub second_try: usize,
    pub missed: usize,
    pub is_marathon: bool,
}

/// Parameters a round was built from, kept for restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundParams {
    pub direction: Direction,
    pub round_size: usize,
    #[serde(default)]
    pub selected_categories: Vec<String>,
}

/// Persisted copy of an active round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub params: RoundParams,
    pub items: Vec<VocabularyItem>,
    pub current_index: usize,
    pub score: u32,
    pub attempt_count: u8,
    #[serde(default)]
    pub is_answered: bool,
    pub history: Vec<RoundHistoryItem>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl SessionSnapshot {
    /// The index points at an item, and a pending retry has that item's
    /// history entry last.
    fn is_consistent(&self) -> bool {
        let Some(current) = self.items.get(self.current_index) else {
            return false;
        };
        self.attempt_count == 0
            || self
                .history
                .last()
                .is_some_and(|entry| entry.item.id == current.id)
    }
}

#[derive(Debug, Clone)]
struct Round {
    params: RoundParams,
    items: Vec<VocabularyItem>,
    index: usize,
    score: u32,
    attempt_count: u8,
    answered: bool,
    history: Vec<RoundHistoryItem>,
    submitted: bool,
}

impl Round {
    fn new(params: RoundParams, items: Vec<VocabularyItem>) -> Self {
        Self {
            params,
            items,
            index: 0,
            score: 0,
            attempt_count: 0,
            answered: false,
            history: Vec::new(),
            submitted: false,
        }
    }

    fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.index)
    }

    fn snapshot(&self, timestamp: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            params: self.params.clone(),
            items: self.items.clone(),
            current_index: self.index,
            score: self.score,
            attempt_count: self.attempt_count,
            is_answered: self.answered,
            history: self.history.clone(),
            timestamp,
        }
    }

    fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            params: snapshot.params,
            items: snapshot.items,
            index: snapshot.current_index,
            score: snapshot.score,
            attempt_count: snapshot.attempt_count,
            answered: snapshot.is_answered,
            history: snapshot.history,
            submitted: false,
        }
    }
}

/// Drives review rounds over a catalog, backed by a key-value store.
pub struct Session<S> {
    catalog: Catalog,
    progress: ProgressStore<S>,
    leaderboard: Leaderboard<S>,
    scheduler: Scheduler,
    settings: EngineSettings,
    clock: Box<dyn Clock>,
    rng: StdRng,
    phase: Phase,
    round: Option<Round>,
    streak: u32,
}

impl<S: KeyValueStore + Clone> Session<S> {
    pub fn new(catalog: Catalog, store: S, settings: EngineSettings) -> Self {
        let progress = ProgressStore::new(store.clone());
        let streak = progress.current_streak();

        Self {
            catalog,
            leaderboard: Leaderboard::new(store, settings.leaderboard_capacity),
            progress,
            scheduler: Scheduler::new(settings.marathon_size),
            settings,
            clock: Box::new(SystemClock),
            rng: StdRng::from_os_rng(),
            phase: Phase::NotStarted,
            round: None,
            streak,
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Restore a round saved less than the staleness window ago.
    ///
    /// Returns whether a round was restored. Missing, stale or inconsistent
    /// snapshots are discarded.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }

        let Some(snapshot) = load_json::<SessionSnapshot>(self.store(), keys::CURRENT_SESSION) else {
            return false;
        };

        let age = self.clock.now() - snapshot.timestamp;
        let window = Duration::minutes(self.settings.session_staleness_minutes);
        let consistent = snapshot.is_consistent();

        if age >= window || !consistent {
            tracing::debug!(age_minutes = age.num_minutes(), consistent, "discarding saved round");
            self.clear_snapshot();
            return false;
        }

        tracing::info!(
            index = snapshot.current_index,
            items = snapshot.items.len(),
            score = snapshot.score,
            "resumed saved round"
        );
        self.round = Some(Round::from_snapshot(snapshot));
        self.phase = Phase::InRound;
        true
    }

    /// Begin a new round. Counts today towards the streak.
    pub fn start(&mut self, direction: Direction, round_size: usize, categories: Vec<String>) -> Result<Phase> {
        if self.phase == Phase::InRound {
            return Err(self.invalid("start"));
        }

        let now = self.clock.now();
        self.streak = self
            .progress
            .update_streak(study_day(now, self.settings.daily_reset_hour));

        let prefs = Preferences {
            direction,
            round_size,
            selected_categories: categories.clone(),
        };
        if let Err(e) = save_json(self.store(), keys::PREFERENCES, &prefs) {
            tracing::warn!(error = %e, "failed to persist preferences");
        }

        self.begin_round(RoundParams {
            direction,
            round_size,
            selected_categories: categories,
        });
        Ok(self.phase)
    }

    /// Build a fresh round with the parameters of the current one.
    pub fn restart(&mut self) -> Result<Phase> {
        let params = match (&self.phase, &self.round) {
            (Phase::InRound | Phase::RoundOverview, Some(round)) => round.params.clone(),
            _ => return Err(self.invalid("restart")),
        };
        self.begin_round(params);
        Ok(self.phase)
    }

    /// Grade an answer for the current item.
    pub fn submit_answer(&mut self, user_input: &str) -> Result<AnswerOutcome> {
        if self.phase != Phase::InRound {
            return Err(self.invalid("submit_answer"));
        }
        let now = self.clock.now();

        let Some(round) = self.round.as_mut() else {
            return Err(SessionError::InvalidState {
                operation: "submit_answer",
                phase: self.phase,
            });
        };
        let Some(item) = round.current().cloned() else {
            return Err(SessionError::InvalidState {
                operation: "submit_answer",
                phase: self.phase,
            });
        };
        if round.answered {
            return Err(SessionError::AlreadyAnswered);
        }

        let target = round.params.direction.target();
        let correct_answer = item
            .text(target)
            .ok_or_else(|| SessionError::MissingTranslation {
                id: item.id.clone(),
                language: target.code(),
            })?
            .to_string();

        let result = matching::evaluate(user_input, &correct_answer);
        let first_attempt = round.attempt_count == 0;

        let feedback = if first_attempt {
            self.progress
                .update_item_progress(&item.id, result.is_correct, now);

            round.history.push(RoundHistoryItem {
                item: item.clone(),
                user_attempts: vec![user_input.to_string()],
                is_correct_on_first_try: result.is_correct,
                is_correct_on_second_try: false,
                correct_translation: correct_answer.clone(),
            });

            if result.is_correct {
                round.score += 1;
                round.answered = true;
            }
            round.attempt_count = 1;

            match (result.is_correct, result.is_close_call) {
                (true, true) => Feedback::CloseCall,
                (true, false) => Feedback::Perfect,
                (false, _) => Feedback::TryAgain,
            }
        } else {
            match round.history.last_mut().filter(|entry| entry.item.id == item.id) {
                Some(entry) => {
                    entry.user_attempts.push(user_input.to_string());
                    entry.is_correct_on_second_try = result.is_correct;
                }
                None => tracing::warn!(item_id = %item.id, "retry has no history entry, not recorded"),
            }
            round.attempt_count = 2;
            round.answered = true;

            match (result.is_correct, result.is_close_call) {
                (true, true) => Feedback::CloseCall,
                (true, false) => Feedback::Correct,
                (false, _) => Feedback::Incorrect,
            }
        };

        tracing::debug!(
            item_id = %item.id,
            attempt = round.attempt_count,
            is_correct = result.is_correct,
            distance = result.distance,
            "graded answer"
        );

        let outcome = AnswerOutcome {
            is_correct: result.is_correct,
            is_close_call: result.is_close_call,
            attempt: if first_attempt { 1 } else { 2 },
            can_retry: !round.answered,
            correct_answer,
            feedback,
        };

        self.save_snapshot();
        Ok(outcome)
    }

    /// Move to the next item, or to the overview after the last one.
    pub fn advance(&mut self) -> Result<Phase> {
        if self.phase != Phase::InRound {
            return Err(self.invalid("advance"));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(self.invalid("advance"));
        };

        if round.index + 1 < round.items.len() {
            round.index += 1;
            round.attempt_count = 0;
            round.answered = false;
            self.save_snapshot();
        } else {
            self.finish_round();
        }
        Ok(self.phase)
    }

    /// Abandon everything and return to the start.
    pub fn exit(&mut self) {
        self.phase = Phase::NotStarted;
        self.round = None;
        self.clear_snapshot();
        self.streak = self.progress.current_streak();
    }

    /// Put a finished marathon score on the leaderboard, once per round.
    pub fn submit_to_leaderboard(&mut self, name: &str) -> Result<Vec<LeaderboardEntry>> {
        if self.phase != Phase::RoundOverview {
            return Err(self.invalid("submit_to_leaderboard"));
        }
        let summary = self.summary().ok_or_else(|| self.invalid("submit_to_leaderboard"))?;
        if !summary.is_marathon {
            return Err(SessionError::NotMarathon);
        }

        let now = self.clock.now();
        if let Some(round) = self.round.as_mut() {
            if round.submitted {
                return Err(SessionError::AlreadySubmitted);
            }
            round.submitted = true;
        }

        Ok(self
            .leaderboard
            .save_score(name, summary.score, summary.accuracy_percent, now))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_round_complete(&self) -> bool {
        self.phase == Phase::RoundOverview
    }

    pub fn current_item(&self) -> Option<&VocabularyItem> {
        match self.phase {
            Phase::InRound => self.round.as_ref().and_then(Round::current),
            _ => None,
        }
    }

    /// Text shown to the learner for the current item.
    pub fn current_prompt(&self) -> Option<&str> {
        let direction = self.direction()?;
        self.current_item()?.text(direction.source())
    }

    pub fn direction(&self) -> Option<Direction> {
        self.round.as_ref().map(|round| round.params.direction)
    }

    pub fn score(&self) -> u32 {
        self.round.as_ref().map_or(0, |round| round.score)
    }

    pub fn history(&self) -> &[RoundHistoryItem] {
        self.round.as_ref().map_or(&[], |round| round.history.as_slice())
    }

    pub fn round_items(&self) -> &[VocabularyItem] {
        self.round.as_ref().map_or(&[], |round| round.items.as_slice())
    }

    pub fn current_index(&self) -> usize {
        self.round.as_ref().map_or(0, |round| round.index)
    }

    pub fn attempt_count(&self) -> u8 {
        self.round.as_ref().map_or(0, |round| round.attempt_count)
    }

    /// Whether the current item is frozen.
    pub fn is_answered(&self) -> bool {
        self.round.as_ref().is_some_and(|round| round.answered)
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Last round parameters, or defaults.
    pub fn preferences(&self) -> Preferences {
        load_json(self.store(), keys::PREFERENCES).unwrap_or_default()
    }

    /// Overview figures for the current or last round.
    pub fn summary(&self) -> Option<RoundSummary> {
        let round = self.round.as_ref()?;
        let total = round.items.len();

        let count = |outcome: RoundOutcome| round.history.iter().filter(|h| h.outcome() == outcome).count();
        let perfect = count(RoundOutcome::Perfect);
        let second_try = count(RoundOutcome::SecondTry);

        let accuracy_percent = if total == 0 {
            0
        } else {
            ((f64::from(round.score) / total as f64) * 100.0).round() as u32
        };

        Some(RoundSummary {
            score: round.score,
            total,
            accuracy_percent,
            perfect,
            second_try,
            missed: total.saturating_sub(perfect + second_try),
            is_marathon: self.scheduler.is_marathon(round.params.round_size),
        })
    }

    fn store(&self) -> &S {
        self.progress.store()
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            phase: self.phase,
        }
    }

    fn begin_round(&mut self, params: RoundParams) {
        let now = self.clock.now();
        let items = self.scheduler.build_round(
            self.catalog.base_vocabulary(),
            &params.selected_categories,
            params.round_size,
            &self.progress,
            &mut self.rng,
            now,
        );

        tracing::info!(
            direction = params.direction.as_str(),
            requested = params.round_size,
            items = items.len(),
            "started round"
        );

        let empty = items.is_empty();
        self.round = Some(Round::new(params, items));

        if empty {
            self.finish_round();
        } else {
            self.phase = Phase::InRound;
            self.save_snapshot();
        }
    }

    fn finish_round(&mut self) {
        self.phase = Phase::RoundOverview;
        self.clear_snapshot();

        if let Some(summary) = self.summary() {
            tracing::info!(
                score = summary.score,
                total = summary.total,
                accuracy = summary.accuracy_percent,
                "round complete"
            );
        }
    }

    fn save_snapshot(&self) {
        let Some(round) = self.round.as_ref().filter(|_| self.phase == Phase::InRound) else {
            return;
        };
        let snapshot = round.snapshot(self.clock.now());
        if let Err(e) = save_json(self.store(), keys::CURRENT_SESSION, &snapshot) {
            tracing::warn!(error = %e, "failed to save round snapshot");
        }
    }

    fn clear_snapshot(&self) {
        if let Err(e) = self.store().remove(keys::CURRENT_SESSION) {
            tracing::warn!(error = %e, "failed to clear round snapshot");
        }
    }
}
