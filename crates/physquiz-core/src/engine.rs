//! The quiz state machine.
//!
//! Drives the question, answer, advance, score cycle. The presentation layer
//! consumes state changes through [`QuizObserver`] and feeds player actions
//! back in; scoring never depends on rendering.

use crate::error::QuizError;
use crate::model::{Question, RecordedAnswer};
use crate::scoring::{EndReason, ScoredResult};
use crate::session::SessionState;

/// Lifecycle of a session. `Completed` and `AbortedEarly` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    InProgress,
    Completed,
    AbortedEarly,
}

impl QuizPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuizPhase::Completed | QuizPhase::AbortedEarly)
    }
}

impl Default for QuizPhase {
    fn default() -> Self {
        QuizPhase::Idle
    }
}

/// State-change notifications consumed by the presentation layer.
pub trait QuizObserver {
    /// A question should be shown. `index` is zero-based.
    fn on_question(&self, index: usize, total: usize, question: &Question);
    /// The integrity monitor issued its one warning; surface it blockingly.
    fn on_integrity_warning(&self);
    /// The session ended (normally or early); show the feedback screen.
    fn on_result(&self, result: &ScoredResult);
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_question(&self, _: usize, _: usize, _: &Question) {}
    fn on_integrity_warning(&self) {}
    fn on_result(&self, _: &ScoredResult) {}
}

/// What a submitted answer led to.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// More questions remain; the index of the next one was emitted.
    Next(usize),
    /// That was the last question; the session is complete and the result
    /// should be delivered with `early_termination = false`.
    Finished(ScoredResult),
}

/// The quiz state machine. Sole mutator of [`SessionState`].
#[derive(Debug, Default)]
pub struct QuizEngine {
    phase: QuizPhase,
    session: SessionState,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Begin a session with a freshly drawn sample. Valid only from `Idle`.
    pub fn start(
        &mut self,
        questions: Vec<Question>,
        observer: &dyn QuizObserver,
    ) -> Result<(), QuizError> {
        if self.phase != QuizPhase::Idle {
            return Err(QuizError::AlreadyStarted);
        }
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionList);
        }

        self.session = SessionState::new(questions);
        self.phase = QuizPhase::InProgress;
        tracing::info!(
            session_id = %self.session.session_id,
            questions = self.session.total_questions(),
            "session started"
        );

        let total = self.session.total_questions();
        if let Some(question) = self.session.current_question() {
            observer.on_question(0, total, question);
        }
        Ok(())
    }

    /// Record an answer for the current question and advance.
    ///
    /// An out-of-range index is a contract violation: the UI renders options
    /// from the same `Question` it answers against, so this rejects without
    /// touching session state.
    pub fn submit_answer(
        &mut self,
        selected: usize,
        observer: &dyn QuizObserver,
    ) -> Result<SubmitOutcome, QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }

        let question = self
            .session
            .current_question()
            .ok_or(QuizError::NotInProgress)?;
        if selected >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                question_id: question.id.clone(),
                selected,
                option_count: question.options.len(),
            });
        }

        self.session.recorded_answers.push(RecordedAnswer {
            question_id: question.id.clone(),
            selected_option: selected,
            is_correct: selected == question.correct_option,
        });
        self.session.current_index += 1;

        let total = self.session.total_questions();
        if self.session.current_index == total {
            self.session.completed = true;
            self.phase = QuizPhase::Completed;
            let result = ScoredResult::from_answers(&self.session.recorded_answers, total, None);
            tracing::info!(
                session_id = %self.session.session_id,
                correct = result.correct_count,
                nota = result.grade_band,
                "session completed"
            );
            observer.on_result(&result);
            Ok(SubmitOutcome::Finished(result))
        } else {
            let index = self.session.current_index;
            // current_index < total here, so the question exists.
            if let Some(next) = self.session.current_question() {
                observer.on_question(index, total, next);
            }
            Ok(SubmitOutcome::Next(index))
        }
    }

    /// End the session early, scoring whatever was answered so far.
    ///
    /// Idempotent outside `InProgress`: returns `None` and changes nothing.
    pub fn force_end(
        &mut self,
        reason: EndReason,
        observer: &dyn QuizObserver,
    ) -> Option<ScoredResult> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }

        self.session.completed = true;
        self.phase = QuizPhase::AbortedEarly;
        let result = ScoredResult::from_answers(
            &self.session.recorded_answers,
            self.session.total_questions(),
            Some(reason),
        );
        tracing::warn!(
            session_id = %self.session.session_id,
            %reason,
            answered = result.total_count,
            "session terminated early"
        );
        observer.on_result(&result);
        Some(result)
    }

    /// Discard the session and return to `Idle`. Valid from any terminal
    /// state or `Idle`; a fresh start gate must release before the next run.
    pub fn reset(&mut self) {
        self.phase = QuizPhase::Idle;
        self.session = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: format!("q{i}"),
                prompt: format!("Prompt {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                // Correct answer alternates so tests can miss on purpose.
                correct_option: i % 4,
            })
            .collect()
    }

    #[test]
    fn start_is_only_valid_from_idle() {
        let mut engine = QuizEngine::new();
        engine.start(questions(5), &NoopObserver).unwrap();
        let err = engine.start(questions(5), &NoopObserver).unwrap_err();
        assert!(matches!(err, QuizError::AlreadyStarted));
    }

    #[test]
    fn start_rejects_an_empty_sample() {
        let mut engine = QuizEngine::new();
        let err = engine.start(vec![], &NoopObserver).unwrap_err();
        assert!(matches!(err, QuizError::EmptyQuestionList));
        assert_eq!(engine.phase(), QuizPhase::Idle);
    }

    #[test]
    fn completes_exactly_when_all_questions_are_answered() {
        let mut engine = QuizEngine::new();
        engine.start(questions(5), &NoopObserver).unwrap();

        for i in 0..4 {
            match engine.submit_answer(0, &NoopObserver).unwrap() {
                SubmitOutcome::Next(index) => assert_eq!(index, i + 1),
                SubmitOutcome::Finished(_) => panic!("finished after {} answers", i + 1),
            }
            assert_eq!(engine.phase(), QuizPhase::InProgress);
        }

        let outcome = engine.submit_answer(0, &NoopObserver).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Finished(_)));
        assert_eq!(engine.phase(), QuizPhase::Completed);
        assert_eq!(engine.session().recorded_answers.len(), 5);
    }

    #[test]
    fn is_correct_flags_match_the_correct_option() {
        let mut engine = QuizEngine::new();
        engine.start(questions(4), &NoopObserver).unwrap();

        // Questions 0..4 have correct options 0,1,2,3; always answer 1.
        for _ in 0..4 {
            engine.submit_answer(1, &NoopObserver).unwrap();
        }
        let flags: Vec<bool> = engine
            .session()
            .recorded_answers
            .iter()
            .map(|a| a.is_correct)
            .collect();
        assert_eq!(flags, vec![false, true, false, false]);
    }

    #[test]
    fn scoring_four_of_five_gives_band_four() {
        let mut engine = QuizEngine::new();
        engine.start(questions(5), &NoopObserver).unwrap();

        // Correct options are 0,1,2,3,0; answer correctly except question 2.
        for (i, correct) in [0usize, 1, 2, 3, 0].iter().enumerate() {
            let selected = if i == 2 { (correct + 1) % 4 } else { *correct };
            engine.submit_answer(selected, &NoopObserver).unwrap();
        }

        match engine.phase() {
            QuizPhase::Completed => {}
            other => panic!("expected Completed, got {other:?}"),
        }
        let result =
            ScoredResult::from_answers(&engine.session().recorded_answers, 5, None);
        assert_eq!(result.correct_count, 4);
        assert!((result.percentage - 80.0).abs() < f64::EPSILON);
        assert_eq!(result.grade_band, 4);
    }

    #[test]
    fn out_of_range_answer_is_rejected_without_state_change() {
        let mut engine = QuizEngine::new();
        engine.start(questions(5), &NoopObserver).unwrap();

        let err = engine.submit_answer(9, &NoopObserver).unwrap_err();
        assert!(matches!(err, QuizError::OptionOutOfRange { selected: 9, .. }));
        assert_eq!(engine.session().current_index, 0);
        assert!(engine.session().recorded_answers.is_empty());
        assert_eq!(engine.phase(), QuizPhase::InProgress);
    }

    #[test]
    fn submit_outside_in_progress_is_rejected() {
        let mut engine = QuizEngine::new();
        let err = engine.submit_answer(0, &NoopObserver).unwrap_err();
        assert!(matches!(err, QuizError::NotInProgress));
    }

    #[test]
    fn force_end_applies_the_partial_session_penalty() {
        let mut engine = QuizEngine::new();
        engine.start(questions(5), &NoopObserver).unwrap();

        // Two correct answers out of five planned.
        engine.submit_answer(0, &NoopObserver).unwrap();
        engine.submit_answer(1, &NoopObserver).unwrap();

        let result = engine
            .force_end(EndReason::PageHidden, &NoopObserver)
            .expect("was in progress");
        assert_eq!(engine.phase(), QuizPhase::AbortedEarly);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total_count, 2);
        assert_eq!(result.grade_band, 1, "penalty must override accuracy");
        assert!(result.early_termination);
    }

    #[test]
    fn force_end_is_a_noop_in_terminal_states() {
        let mut engine = QuizEngine::new();
        engine.start(questions(1), &NoopObserver).unwrap();
        engine.submit_answer(0, &NoopObserver).unwrap();
        assert_eq!(engine.phase(), QuizPhase::Completed);

        assert!(engine.force_end(EndReason::FocusLost, &NoopObserver).is_none());
        assert_eq!(engine.phase(), QuizPhase::Completed);
    }

    #[test]
    fn reset_returns_to_idle_and_clears_state() {
        let mut engine = QuizEngine::new();
        engine.start(questions(5), &NoopObserver).unwrap();
        engine.submit_answer(0, &NoopObserver).unwrap();
        engine.force_end(EndReason::Manual, &NoopObserver);

        engine.reset();
        assert_eq!(engine.phase(), QuizPhase::Idle);
        assert!(engine.session().recorded_answers.is_empty());
        assert_eq!(engine.session().current_index, 0);

        // A new session can start after reset.
        engine.start(questions(5), &NoopObserver).unwrap();
        assert_eq!(engine.phase(), QuizPhase::InProgress);
    }

    #[test]
    fn observer_sees_each_question_and_the_result() {
        use std::sync::Mutex;

        #[derive(Default)]
        struct Recording {
            questions: Mutex<Vec<usize>>,
            results: Mutex<Vec<ScoredResult>>,
        }

        impl QuizObserver for Recording {
            fn on_question(&self, index: usize, _: usize, _: &Question) {
                self.questions.lock().unwrap().push(index);
            }
            fn on_integrity_warning(&self) {}
            fn on_result(&self, result: &ScoredResult) {
                self.results.lock().unwrap().push(result.clone());
            }
        }

        let observer = Recording::default();
        let mut engine = QuizEngine::new();
        engine.start(questions(3), &observer).unwrap();
        for _ in 0..3 {
            engine.submit_answer(0, &observer).unwrap();
        }

        assert_eq!(*observer.questions.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(observer.results.lock().unwrap().len(), 1);
    }
}
