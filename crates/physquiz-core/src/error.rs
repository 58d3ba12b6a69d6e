//! Error types shared across the physquiz crates.
//!
//! `LoadError` is defined here rather than in `physquiz-delivery` so both the
//! file-based loader and the HTTP question source report failures through the
//! same type.

use thiserror::Error;

/// Errors from the quiz state machine. These indicate contract violations by
/// the caller, not player mistakes.
#[derive(Debug, Error)]
pub enum QuizError {
    /// `start` was called while a session was already running or finished.
    #[error("a quiz session is already active")]
    AlreadyStarted,

    /// An operation that requires an in-progress session was called outside one.
    #[error("no quiz session in progress")]
    NotInProgress,

    /// `start` was called with no questions.
    #[error("cannot start a session with an empty question list")]
    EmptyQuestionList,

    /// The submitted option index does not exist on the current question.
    #[error("option {selected} out of range for question '{question_id}' ({option_count} options)")]
    OptionOutOfRange {
        question_id: String,
        selected: usize,
        option_count: usize,
    },
}

/// Errors loading or parsing the question pool.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the question file.
    #[error("failed to read question file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The question data was not valid JSON of the expected shape.
    #[error("failed to parse question data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A network failure while fetching the question document. Not retried.
    #[error("network error fetching questions: {0}")]
    Network(String),

    /// A question violates the correct-option invariant.
    #[error("question '{id}': correct option {index} out of range ({option_count} options)")]
    InvalidCorrectOption {
        id: String,
        index: usize,
        option_count: usize,
    },
}
