//! Scoring: percentage, grade band (nota 1..5), and the derived result.

use serde::{Deserialize, Serialize};

use crate::model::RecordedAnswer;

/// Why a session ended before all questions were answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The page/tab was hidden.
    #[serde(rename = "visibilitychange")]
    PageHidden,
    /// The window lost input focus.
    #[serde(rename = "blur")]
    FocusLost,
    /// Explicitly requested by the operator or player.
    #[serde(rename = "manual")]
    Manual,
}

impl EndReason {
    /// The wire string the result sink expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::PageHidden => "visibilitychange",
            EndReason::FocusLost => "blur",
            EndReason::Manual => "manual",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a percentage to the 1..5 grade band. Boundaries are inclusive.
pub fn grade_band(percentage: f64) -> u8 {
    if percentage >= 90.0 {
        5
    } else if percentage >= 70.0 {
        4
    } else if percentage >= 50.0 {
        3
    } else if percentage >= 30.0 {
        2
    } else {
        1
    }
}

/// The scored outcome of a session. Derived from the recorded answers,
/// never stored in session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Correctly answered questions.
    pub correct_count: usize,
    /// Questions actually answered (the full sample on normal completion).
    pub total_count: usize,
    /// Percentage correct over the answered set; 0 when nothing was answered.
    pub percentage: f64,
    /// Grade band 1..5, forced to 1 on a partial session.
    pub grade_band: u8,
    /// Whether the session ended before all questions were answered.
    pub early_termination: bool,
    /// Trigger of an early termination.
    pub reason: Option<EndReason>,
}

impl ScoredResult {
    /// Score a session.
    ///
    /// `planned` is the number of questions drawn for the session. Ending with
    /// fewer answers than planned forces the minimum band regardless of
    /// accuracy on the answered subset; this is a deliberate penalty, not a
    /// partial-credit average.
    pub fn from_answers(
        answers: &[RecordedAnswer],
        planned: usize,
        reason: Option<EndReason>,
    ) -> Self {
        let total_count = answers.len();
        let correct_count = answers.iter().filter(|a| a.is_correct).count();
        let percentage = if total_count > 0 {
            (correct_count as f64 / total_count as f64) * 100.0
        } else {
            0.0
        };
        let grade_band = if total_count < planned {
            1
        } else {
            grade_band(percentage)
        };

        Self {
            correct_count,
            total_count,
            percentage,
            grade_band,
            early_termination: reason.is_some(),
            reason,
        }
    }
}
