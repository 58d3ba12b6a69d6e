//! The `physquiz play` command.
//!
//! Drives one or more interactive sessions: questions are fetched while the
//! player fills in the identity form, the quiz itself runs on a blocking
//! task reading stdin, and every finished session is delivered before the
//! replay prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use physquiz_core::bank;
use physquiz_core::engine::{QuizEngine, QuizObserver, SubmitOutcome};
use physquiz_core::error::QuizError;
use physquiz_core::model::{PlayerIdentity, Question, QuestionPool};
use physquiz_core::monitor::{IntegrityMonitor, LeaveSignal, MonitorAction};
use physquiz_core::scoring::ScoredResult;
use physquiz_core::session::SessionGate;
use physquiz_delivery::config::load_config_from;
use physquiz_delivery::identity::prefill_from_token;
use physquiz_delivery::source::fetch_pool;
use physquiz_delivery::store::PrefillStore;
use physquiz_delivery::{BackupStore, ResultPayload, ResultSink, SheetsSink};
use physquiz_report::feedback;

/// Observer printing questions and warnings to the terminal.
struct ConsoleView;

impl QuizObserver for ConsoleView {
    fn on_question(&self, index: usize, total: usize, question: &Question) {
        println!("\nPregunta {}/{}: {}", index + 1, total, question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", option_letter(i), option);
        }
    }

    fn on_integrity_warning(&self) {
        println!("\n⚠️  ¡Saliste del quiz! Si vuelve a pasar, la sesión termina y la nota queda en 1.");
    }

    fn on_result(&self, _result: &ScoredResult) {
        // The full feedback screen is rendered after delivery.
    }
}

fn option_letter(index: usize) -> char {
    (b'a' + (index as u8 % 26)) as char
}

/// Parse a typed answer: a letter ("a".."z") or a 1-based number.
fn parse_option(input: &str) -> Option<usize> {
    let input = input.trim();
    if input.len() == 1 {
        let c = input.chars().next()?;
        if c.is_ascii_lowercase() {
            return Some((c as u8 - b'a') as usize);
        }
        if c.is_ascii_uppercase() {
            return Some((c as u8 - b'A') as usize);
        }
    }
    input.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

pub async fn execute(
    questions_file: Option<PathBuf>,
    grade: Option<String>,
    count: Option<usize>,
    no_monitor: bool,
    token: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let grade_key = grade.unwrap_or_else(|| config.default_grade.clone());
    let sample_size = count.unwrap_or(config.sample_size);
    if sample_size == 0 {
        bail!("--count must be at least 1");
    }

    let store = BackupStore::new(&config.store_dir);
    let prefill = PrefillStore::new(config.store_dir.join("identity.json"));
    let sink: Arc<dyn ResultSink> = Arc::new(SheetsSink::new(config.sheets_url.clone(), store));

    // Start the question fetch and the identity form side by side; whichever
    // finishes second releases the session inputs.
    let source_url = questions_file
        .is_none()
        .then(|| config.questions_url.clone())
        .flatten();
    let file = questions_file.unwrap_or_else(|| config.questions_file.clone());
    let mut pool_task = tokio::spawn(async move {
        match source_url {
            Some(url) => fetch_pool(&url).await.map_err(anyhow::Error::from),
            None => bank::load_pool(&file).map_err(anyhow::Error::from),
        }
    });

    let remembered = prefill.recall();
    let default_grade = grade_key.clone();
    let mut identity_task =
        tokio::task::spawn_blocking(move || prompt_identity(remembered, token, &default_grade));

    let mut gate = SessionGate::new();
    let mut rng = StdRng::from_entropy();
    let mut pool = None;
    let mut pool_pending = true;
    let mut identity_pending = true;

    let inputs = loop {
        tokio::select! {
            joined = &mut pool_task, if pool_pending => {
                pool_pending = false;
                let loaded = joined.context("question fetch task failed")??;
                let questions = bank::sample(&loaded, &grade_key, sample_size, &mut rng);
                if questions.is_empty() {
                    bail!("no questions available for grade '{grade_key}'");
                }
                pool = Some(loaded);
                if let Some(inputs) = gate.supply_questions(questions) {
                    break inputs;
                }
            }
            joined = &mut identity_task, if identity_pending => {
                identity_pending = false;
                let identity = joined.context("identity form task failed")??;
                if let Some(inputs) = gate.supply_identity(identity) {
                    break inputs;
                }
            }
        }
    };
    let pool = match pool {
        Some(pool) => pool,
        // The identity branch can only release the gate after the pool
        // branch ran, so this is unreachable; guard anyway.
        None => bail!("question pool missing after session start"),
    };

    let identity = inputs.identity;
    prefill.remember(&identity);

    let mut engine = QuizEngine::new();
    let mut monitor = IntegrityMonitor::new();
    monitor.set_enabled(!no_monitor && config.monitor_enabled);
    monitor.attach();

    let mut questions = inputs.questions;
    loop {
        let planned = questions.len();
        let round = tokio::task::spawn_blocking({
            let questions = questions.clone();
            move || run_round(engine, monitor, questions)
        })
        .await
        .context("quiz task failed")?;
        let (finished_engine, finished_monitor, result) = round?;
        engine = finished_engine;
        monitor = finished_monitor;

        println!("\n{}", feedback::render_result(&result, &identity, planned));

        let payload = ResultPayload::new(&result, &identity, &engine.session().recorded_answers)?;
        let outcome = sink.send(&payload).await;
        if outcome.success {
            println!("Resultado enviado.");
        } else if outcome.local_save {
            println!("Sin conexión. El resultado quedó guardado localmente.");
        } else {
            println!("No se pudo guardar el resultado.");
        }

        if !prompt_replay()? {
            break;
        }
        engine.reset();
        monitor.rearm();
        questions = sample_round(&pool, &grade_key, sample_size, &mut rng)?;
    }

    Ok(())
}

fn sample_round(
    pool: &QuestionPool,
    grade_key: &str,
    sample_size: usize,
    rng: &mut StdRng,
) -> Result<Vec<Question>> {
    let questions = bank::sample(pool, grade_key, sample_size, rng);
    if questions.is_empty() {
        bail!("no questions available for grade '{grade_key}'");
    }
    Ok(questions)
}

/// Run one session to its end, blocking on stdin.
///
/// Typing `!` simulates losing window focus; closing stdin counts as hiding
/// the page. Both go through the integrity monitor.
fn run_round(
    mut engine: QuizEngine,
    mut monitor: IntegrityMonitor,
    questions: Vec<Question>,
) -> Result<(QuizEngine, IntegrityMonitor, ScoredResult)> {
    let view = ConsoleView;
    engine.start(questions, &view)?;

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\nRespuesta (letra o número, ! simula salir de la ventana): ");
        io::stdout().flush()?;

        line.clear();
        let read = stdin.lock().read_line(&mut line)?;
        if read == 0 {
            // stdin closed: the page went hidden.
            match monitor.observe(LeaveSignal::PageHidden, &mut engine, &view) {
                MonitorAction::Terminated(result) => return Ok((engine, monitor, result)),
                MonitorAction::Warned => continue,
                MonitorAction::Ignored => bail!("input closed before the session ended"),
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "!" {
            match monitor.observe(LeaveSignal::FocusLost, &mut engine, &view) {
                MonitorAction::Terminated(result) => return Ok((engine, monitor, result)),
                _ => continue,
            }
        }

        let Some(selected) = parse_option(input) else {
            println!("Respuesta no válida. Escribe la letra o el número de la opción.");
            continue;
        };

        match engine.submit_answer(selected, &view) {
            Ok(SubmitOutcome::Next(_)) => {}
            Ok(SubmitOutcome::Finished(result)) => return Ok((engine, monitor, result)),
            Err(QuizError::OptionOutOfRange { option_count, .. }) => {
                println!("Esa opción no existe, elige entre a y {}.", option_letter(option_count.saturating_sub(1)));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Blocking identity form. Remembered or token-decoded values become
/// defaults that an empty answer keeps.
fn prompt_identity(
    remembered: Option<PlayerIdentity>,
    token: Option<String>,
    default_grade: &str,
) -> Result<PlayerIdentity> {
    let mut identity = remembered.unwrap_or_default();
    if identity.grade.trim().is_empty() {
        identity.grade = default_grade.to_string();
    }
    if let Some(token) = token {
        prefill_from_token(&mut identity, &token);
    }

    println!("Antes de empezar, cuéntanos quién eres (Enter conserva el valor entre corchetes).");
    identity.name = prompt_field("Nombre", &identity.name)?;
    identity.grade = prompt_field("Grado", &identity.grade)?;
    let email = prompt_field("Email", identity.email.as_deref().unwrap_or(""))?;
    identity.email = (!email.is_empty()).then_some(email);

    Ok(identity)
}

fn prompt_field(label: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let typed = line.trim();
    Ok(if typed.is_empty() {
        current.to_string()
    } else {
        typed.to_string()
    })
}

fn prompt_replay() -> Result<bool> {
    print!("\n¿Jugar de nuevo? (s/n): ");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    Ok(read > 0 && matches!(line.trim(), "s" | "S" | "si" | "sí"))
}
