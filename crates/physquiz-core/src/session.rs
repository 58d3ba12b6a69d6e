//! Session state and the start gate.
//!
//! `SessionState` is owned and mutated exclusively by the engine.
//! `SessionGate` implements the two-source join: a session may begin only
//! once the question sample and the player identity have both arrived, in
//! either order.

use uuid::Uuid;

use crate::model::{PlayerIdentity, Question, RecordedAnswer};

/// The state of one quiz run.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Identifies this run in logs and payloads.
    pub session_id: Uuid,
    /// Fixed random sample drawn at session start.
    pub active_questions: Vec<Question>,
    /// Position of the next question to answer; equals
    /// `active_questions.len()` when the session is done.
    pub current_index: usize,
    /// Answers recorded so far, in order.
    pub recorded_answers: Vec<RecordedAnswer>,
    /// Set exactly once, on normal completion or forced termination.
    pub completed: bool,
}

impl SessionState {
    pub fn new(active_questions: Vec<Question>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            active_questions,
            current_index: 0,
            recorded_answers: Vec::new(),
            completed: false,
        }
    }

    /// The question at `current_index`, if any remain.
    pub fn current_question(&self) -> Option<&Question> {
        self.active_questions.get(self.current_index)
    }

    pub fn total_questions(&self) -> usize {
        self.active_questions.len()
    }
}

/// Inputs required before a session can start.
#[derive(Debug, Clone)]
pub struct StartInputs {
    pub questions: Vec<Question>,
    pub identity: PlayerIdentity,
}

/// Two-slot join gate for session start.
///
/// The question fetch and the identity form complete independently; whichever
/// finishes second releases the start inputs. Each gate serves one session.
#[derive(Debug, Default)]
pub struct SessionGate {
    questions: Option<Vec<Question>>,
    identity: Option<PlayerIdentity>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the loaded question sample. Returns the start inputs if the
    /// identity already arrived.
    pub fn supply_questions(&mut self, questions: Vec<Question>) -> Option<StartInputs> {
        self.questions = Some(questions);
        self.take_ready()
    }

    /// Record the submitted identity. Returns the start inputs if the
    /// questions already arrived.
    pub fn supply_identity(&mut self, identity: PlayerIdentity) -> Option<StartInputs> {
        self.identity = Some(identity);
        self.take_ready()
    }

    fn take_ready(&mut self) -> Option<StartInputs> {
        match (self.questions.take(), self.identity.take()) {
            (Some(questions), Some(identity)) => Some(StartInputs {
                questions,
                identity,
            }),
            (questions, identity) => {
                self.questions = questions;
                self.identity = identity;
                None
            }
        }
    }
}
