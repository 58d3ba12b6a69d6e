//! Question bank: loading, grade selection, and random sampling.
//!
//! The pool document is static JSON, either a bare list of questions or a map
//! from grade key to list. Unknown or empty grade keys fall back to
//! [`DEFAULT_GRADE_KEY`].

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::LoadError;
use crate::model::{Question, QuestionPool};

/// Grade key used when the requested one is missing or empty.
pub const DEFAULT_GRADE_KEY: &str = "11-1";

/// Questions drawn per session.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Load and validate a question pool from a JSON file.
pub fn load_pool(path: &Path) -> Result<QuestionPool, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_pool(&content)
}

/// Parse and validate a question pool from a JSON string.
///
/// Every question must satisfy the correct-option invariant; a violation is a
/// hard load failure, not a warning, because the engine grades by index.
pub fn parse_pool(json: &str) -> Result<QuestionPool, LoadError> {
    let pool: QuestionPool = serde_json::from_str(json)?;

    for question in pool.iter() {
        if !question.is_well_formed() {
            return Err(LoadError::InvalidCorrectOption {
                id: question.id.clone(),
                index: question.correct_option,
                option_count: question.options.len(),
            });
        }
    }

    Ok(pool)
}

/// Draw the session sample: shuffle the grade sub-list uniformly
/// (Fisher-Yates) and take the first `count` questions.
///
/// Sampling is without replacement, so the result never contains duplicates.
/// A sub-list shorter than `count` is returned whole.
pub fn sample(
    pool: &QuestionPool,
    grade_key: &str,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Question> {
    let mut questions: Vec<Question> = grade_slice(pool, grade_key).to_vec();
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}

/// The sub-list for a grade key, falling back to the default key for flat
/// pools and for unknown or empty keys.
fn grade_slice<'a>(pool: &'a QuestionPool, grade_key: &str) -> &'a [Question] {
    match pool {
        QuestionPool::Flat(list) => list,
        QuestionPool::ByGrade(map) => {
            match map.get(grade_key).filter(|list| !list.is_empty()) {
                Some(list) => list,
                None => {
                    if grade_key != DEFAULT_GRADE_KEY {
                        tracing::warn!(
                            "no questions for grade '{grade_key}', falling back to '{DEFAULT_GRADE_KEY}'"
                        );
                    }
                    map.get(DEFAULT_GRADE_KEY).map(Vec::as_slice).unwrap_or(&[])
                }
            }
        }
    }
}

/// A warning from pool validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a pool for issues that load-time checks let through.
pub fn validate_pool(pool: &QuestionPool) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = std::collections::HashSet::new();
    for question in pool.iter() {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    for question in pool.iter() {
        if question.options.len() != 4 {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!(
                    "expected 4 options, found {}",
                    question.options.len()
                ),
            });
        }
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    if let QuestionPool::ByGrade(map) = pool {
        for (grade, list) in map {
            if list.len() < DEFAULT_SAMPLE_SIZE {
                warnings.push(ValidationWarning {
                    question_id: None,
                    message: format!(
                        "grade '{grade}' has only {} questions, sessions draw {DEFAULT_SAMPLE_SIZE}",
                        list.len()
                    ),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Prompt {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: 0,
        }
    }

    fn flat_pool(n: usize) -> QuestionPool {
        QuestionPool::Flat((0..n).map(|i| question(&format!("q{i}"))).collect())
    }

    fn graded_pool() -> QuestionPool {
        let mut map = HashMap::new();
        map.insert(
            "11-1".to_string(),
            (0..8).map(|i| question(&format!("a{i}"))).collect(),
        );
        map.insert(
            "11-2".to_string(),
            (0..6).map(|i| question(&format!("b{i}"))).collect(),
        );
        QuestionPool::ByGrade(map)
    }

    #[test]
    fn sample_returns_five_distinct_questions() {
        let pool = flat_pool(20);
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = sample(&pool, DEFAULT_GRADE_KEY, 5, &mut rng);

        assert_eq!(sampled.len(), 5);
        let ids: HashSet<&str> = sampled.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), 5, "sample contained duplicates");
    }

    #[test]
    fn sample_of_a_short_list_returns_everything() {
        let pool = flat_pool(3);
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = sample(&pool, DEFAULT_GRADE_KEY, 5, &mut rng);
        assert_eq!(sampled.len(), 3);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let pool = flat_pool(10);
        let mut rng = StdRng::seed_from_u64(42);
        let sampled = sample(&pool, DEFAULT_GRADE_KEY, 10, &mut rng);

        let mut before: Vec<String> = pool.iter().map(|q| q.id.clone()).collect();
        let mut after: Vec<String> = sampled.iter().map(|q| q.id.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffle_spreads_first_positions_roughly_uniformly() {
        // Over many trials each of the 5 questions should lead the sample
        // about 1/5 of the time. Loose bounds, this is a sanity check on the
        // permutation being uniform, not a strict statistical test.
        let pool = flat_pool(5);
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 5000;
        let mut first_counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..trials {
            let sampled = sample(&pool, DEFAULT_GRADE_KEY, 5, &mut rng);
            *first_counts.entry(sampled[0].id.clone()).or_default() += 1;
        }

        assert_eq!(first_counts.len(), 5);
        for (id, count) in &first_counts {
            let share = *count as f64 / trials as f64;
            assert!(
                (0.15..0.25).contains(&share),
                "question {id} led {share:.3} of samples"
            );
        }
    }

    #[test]
    fn graded_pool_selects_the_requested_grade() {
        let pool = graded_pool();
        let mut rng = StdRng::seed_from_u64(1);
        let sampled = sample(&pool, "11-2", 5, &mut rng);
        assert_eq!(sampled.len(), 5);
        assert!(sampled.iter().all(|q| q.id.starts_with('b')));
    }

    #[test]
    fn unknown_grade_falls_back_to_the_default() {
        let pool = graded_pool();
        let mut rng = StdRng::seed_from_u64(1);
        let sampled = sample(&pool, "11-9", 5, &mut rng);
        assert_eq!(sampled.len(), 5);
        assert!(sampled.iter().all(|q| q.id.starts_with('a')));
    }

    #[test]
    fn parse_rejects_out_of_range_correct_option() {
        let json = r#"[{"id": "q1", "prompt": "p", "options": ["a", "b"], "correct_option": 2}]"#;
        let err = parse_pool(json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidCorrectOption { .. }));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(parse_pool("not json {"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn load_pool_reports_missing_file() {
        let err = load_pool(Path::new("/nonexistent/questions.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn load_pool_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[{"id": "q1", "prompt": "p", "options": ["a", "b", "c", "d"], "correct_option": 1}]"#,
        )
        .unwrap();

        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn validate_flags_duplicates_and_short_grades() {
        let mut map = HashMap::new();
        map.insert(
            "11-3".to_string(),
            vec![question("dup"), question("dup")],
        );
        let pool = QuestionPool::ByGrade(map);
        let warnings = validate_pool(&pool);

        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("only 2 questions")));
    }
}
