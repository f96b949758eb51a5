//! Error types for vocab-core.

use crate::session::Phase;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a vocabulary catalog.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing ID at line {line}")]
    MissingId { line: usize },

    #[error("missing {field} text at line {line}")]
    MissingField { field: &'static str, line: usize },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: String, line: usize },

    #[error("duplicate ID {id} in entry {entry}")]
    DuplicateEntry { id: String, entry: usize },

    #[error("unknown direction '{0}', expected lv-nl, nl-lv or lv-en")]
    UnknownDirection(String),

    #[error("unknown key {key} at line {line}")]
    UnknownKey { key: String, line: usize },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Orchestration contract violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{operation} is not allowed while {phase:?}")]
    InvalidState { operation: &'static str, phase: Phase },

    #[error("the current item has already been answered")]
    AlreadyAnswered,

    #[error("item {id} has no {language} translation")]
    MissingTranslation { id: String, language: &'static str },

    #[error("only marathon rounds can be submitted to the leaderboard")]
    NotMarathon,

    #[error("this round is already on the leaderboard")]
    AlreadySubmitted,
}
