//! End-to-end session flows: sample, play, score, deliver.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use physquiz_core::bank::{sample, DEFAULT_GRADE_KEY, DEFAULT_SAMPLE_SIZE};
use physquiz_core::engine::{NoopObserver, QuizEngine, QuizPhase, SubmitOutcome};
use physquiz_core::model::{PlayerIdentity, Question, QuestionPool};
use physquiz_core::monitor::{IntegrityMonitor, LeaveSignal, MonitorAction};
use physquiz_delivery::mock::MockSink;
use physquiz_delivery::{ResultPayload, ResultSink};

fn pool() -> QuestionPool {
    let questions: Vec<Question> = (0..12)
        .map(|i| Question {
            id: format!("mech-{i}"),
            prompt: format!("Pregunta {i}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: i % 4,
        })
        .collect();
    QuestionPool::ByGrade(HashMap::from([(DEFAULT_GRADE_KEY.to_string(), questions)]))
}

fn identity() -> PlayerIdentity {
    PlayerIdentity {
        name: "Laura Vélez".into(),
        grade: "11-1".into(),
        email: Some("laura@colegio.edu.co".into()),
    }
}

#[tokio::test]
async fn full_session_scores_and_delivers_once() {
    let mut rng = StdRng::seed_from_u64(7);
    let questions = sample(&pool(), DEFAULT_GRADE_KEY, DEFAULT_SAMPLE_SIZE, &mut rng);
    assert_eq!(questions.len(), DEFAULT_SAMPLE_SIZE);

    let observer = NoopObserver;
    let mut engine = QuizEngine::new();
    engine.start(questions.clone(), &observer).unwrap();

    // Answer everything correctly except the last question.
    let mut final_result = None;
    for (i, q) in questions.iter().enumerate() {
        let selected = if i + 1 < questions.len() {
            q.correct_option
        } else {
            (q.correct_option + 1) % q.options.len()
        };
        match engine.submit_answer(selected, &observer).unwrap() {
            SubmitOutcome::Next(index) => assert_eq!(index, i + 1),
            SubmitOutcome::Finished(result) => final_result = Some(result),
        }
    }

    let result = final_result.expect("last answer finishes the session");
    assert_eq!(engine.phase(), QuizPhase::Completed);
    assert_eq!(result.correct_count, 4);
    assert_eq!(result.total_count, 5);
    assert_eq!(result.grade_band, 4);
    assert!(!result.early_termination);

    let payload =
        ResultPayload::new(&result, &identity(), &engine.session().recorded_answers).unwrap();
    let sink = MockSink::new();
    let outcome = sink.send(&payload).await;

    assert!(outcome.success);
    assert_eq!(sink.call_count(), 1);

    let sent = sink.last_payload().unwrap();
    assert_eq!(sent.nombre, "Laura Vélez");
    assert_eq!(sent.nota, 4);
    assert_eq!(sent.total, 5);
    assert!(sent.early_termination.is_none());

    let answers: serde_json::Value = serde_json::from_str(&sent.respuestas).unwrap();
    assert_eq!(answers.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn leaving_twice_terminates_and_delivers_early_result() {
    let mut rng = StdRng::seed_from_u64(11);
    let questions = sample(&pool(), DEFAULT_GRADE_KEY, DEFAULT_SAMPLE_SIZE, &mut rng);

    let observer = NoopObserver;
    let mut engine = QuizEngine::new();
    let mut monitor = IntegrityMonitor::new();
    assert!(monitor.attach());

    engine.start(questions.clone(), &observer).unwrap();

    // One correct answer, then the player leaves the page twice.
    let first = questions[0].correct_option;
    engine.submit_answer(first, &observer).unwrap();

    let action = monitor.observe(LeaveSignal::PageHidden, &mut engine, &observer);
    assert!(matches!(action, MonitorAction::Warned));
    assert_eq!(engine.phase(), QuizPhase::InProgress);

    let action = monitor.observe(LeaveSignal::PageHidden, &mut engine, &observer);
    let result = match action {
        MonitorAction::Terminated(result) => result,
        other => panic!("expected termination, got {other:?}"),
    };

    assert_eq!(engine.phase(), QuizPhase::AbortedEarly);
    assert_eq!(result.total_count, 1, "only the answered question counts");
    assert_eq!(result.correct_count, 1);
    assert_eq!(result.grade_band, 1, "partial sessions get the minimum band");
    assert!(result.early_termination);

    let payload =
        ResultPayload::new(&result, &identity(), &engine.session().recorded_answers).unwrap();
    let sink = MockSink::new();
    sink.send(&payload).await;
    assert_eq!(sink.call_count(), 1);

    let sent = sink.last_payload().unwrap();
    assert_eq!(sent.early_termination, Some(true));
    assert_eq!(sent.end_reason.as_deref(), Some("visibilitychange"));
    assert_eq!(sent.correctas, 1);
    assert_eq!(sent.total, 1);
    assert_eq!(sent.nota, 1);
}
