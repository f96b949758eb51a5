//! Core types for the vocabulary drill engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ParseError;

/// Languages a vocabulary item can carry text for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Latvian,
    Dutch,
    English,
}

impl Language {
    /// Short code used in catalog files.
    pub fn code(self) -> &'static str {
        match self {
            Self::Latvian => "LV",
            Self::Dutch => "NL",
            Self::English => "EN",
        }
    }
}

/// Drill direction: which language is shown and which one is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "LV_TO_NL")]
    LatvianToDutch,
    #[serde(rename = "NL_TO_LV")]
    DutchToLatvian,
    #[serde(rename = "LV_TO_EN")]
    LatvianToEnglish,
}

impl Default for Direction {
    fn default() -> Self {
        Self::LatvianToDutch
    }
}

impl Direction {
    /// Language of the prompt shown to the learner.
    pub fn source(self) -> Language {
        match self {
            Self::LatvianToDutch | Self::LatvianToEnglish => Language::Latvian,
            Self::DutchToLatvian => Language::Dutch,
        }
    }

    /// Language the learner answers in.
    pub fn target(self) -> Language {
        match self {
            Self::LatvianToDutch => Language::Dutch,
            Self::DutchToLatvian => Language::Latvian,
            Self::LatvianToEnglish => Language::English,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatvianToDutch => "lv-nl",
            Self::DutchToLatvian => "nl-lv",
            Self::LatvianToEnglish => "lv-en",
        }
    }

}

/// Parses the short form returned by [`Direction::as_str`], ignoring case.
impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lv-nl" => Ok(Self::LatvianToDutch),
            "nl-lv" => Ok(Self::DutchToLatvian),
            "lv-en" => Ok(Self::LatvianToEnglish),
            _ => Err(ParseError::UnknownDirection(s.to_string())),
        }
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub latvian: String,
    pub dutch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default)]
    pub is_sentence: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl VocabularyItem {
    /// Create an item with the two required translations.
    pub fn new(id: impl Into<String>, latvian: impl Into<String>, dutch: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            latvian: latvian.into(),
            dutch: dutch.into(),
            english: None,
            is_sentence: false,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_english(mut self, english: impl Into<String>) -> Self {
        self.english = Some(english.into());
        self
    }

    /// Text for a language, if the item carries one.
    pub fn text(&self, language: Language) -> Option<&str> {
        match language {
            Language::Latvian => Some(self.latvian.as_str()),
            Language::Dutch => Some(self.dutch.as_str()),
            Language::English => self.english.as_deref(),
        }
    }
}

/// Per-item learner state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProgress {
    pub mastery_level: u8,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub next_review_date: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl ItemProgress {
    /// Whether the item should be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

/// Daily play streak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current_streak: u32,
    #[serde(default, with = "date_or_empty")]
    pub last_played_date: Option<NaiveDate>,
}

/// Everything the progress store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default)]
    pub items: BTreeMap<String, ItemProgress>,
    #[serde(default)]
    pub streak: StreakState,
}

/// Aggregate mastery counts over a vocabulary list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryStats {
    pub mastered: usize,
    pub learning: usize,
    pub new_items: usize,
}

/// How an item ended up in the round overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Perfect,
    SecondTry,
    Missed,
}

/// Record of one item shown in the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundHistoryItem {
    pub item: VocabularyItem,
    pub user_attempts: Vec<String>,
    pub is_correct_on_first_try: bool,
    pub is_correct_on_second_try: bool,
    pub correct_translation: String,
}

impl RoundHistoryItem {
    pub fn outcome(&self) -> RoundOutcome {
        if self.is_correct_on_first_try {
            RoundOutcome::Perfect
        } else if self.is_correct_on_second_try {
            RoundOutcome::SecondTry
        } else {
            RoundOutcome::Missed
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// Percentage, 0-100.
    pub accuracy: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

/// Last round parameters chosen by the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub direction: Direction,
    pub round_size: usize,
    #[serde(default)]
    pub selected_categories: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            round_size: 10,
            selected_categories: Vec::new(),
        }
    }
}

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Round size at or above which the whole filtered catalog is drilled.
    pub marathon_size: usize,
    /// Age after which a saved round is no longer resumed.
    pub session_staleness_minutes: i64,
    /// Hour (UTC, 0-23) at which a new study day begins.
    pub daily_reset_hour: u32,
    pub leaderboard_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            marathon_size: 180,
            session_staleness_minutes: 120,
            daily_reset_hour: 0,
            leaderboard_capacity: 10,
        }
    }
}

/// Serialize an optional date as `YYYY-MM-DD`, or `""` when unset.
mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format(FORMAT)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
