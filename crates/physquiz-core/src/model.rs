//! Core data model types for physquiz.
//!
//! These are the fundamental types the entire system uses to represent
//! questions, the loaded pool, player identity, and recorded answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// The question text shown to the player.
    #[serde(alias = "question")]
    pub prompt: String,
    /// Answer options, rendered in order (normally four).
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    #[serde(alias = "correctAnswer")]
    pub correct_option: usize,
}

impl Question {
    /// Whether `correct_option` actually points at an option.
    pub fn is_well_formed(&self) -> bool {
        self.correct_option < self.options.len()
    }
}

/// The loaded question pool: either a flat list, or partitioned by grade key
/// (e.g. "11-1", "11-2"). Loaded once per session from a static source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionPool {
    Flat(Vec<Question>),
    ByGrade(HashMap<String, Vec<Question>>),
}

impl QuestionPool {
    /// Total question count across all partitions.
    pub fn len(&self) -> usize {
        match self {
            QuestionPool::Flat(list) => list.len(),
            QuestionPool::ByGrade(map) => map.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every question regardless of partitioning.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Question> + '_> {
        match self {
            QuestionPool::Flat(list) => Box::new(list.iter()),
            QuestionPool::ByGrade(map) => Box::new(map.values().flatten()),
        }
    }
}

/// Who is taking the quiz. Captured once per session from the identity form,
/// optionally prefilled from a decoded sign-in token or a previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub grade: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// One answered question. Append-only during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedAnswer {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "selectedIndex")]
    pub selected_option: usize,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}
