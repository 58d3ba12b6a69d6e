//! End-of-session feedback text.
//!
//! Player-facing strings stay in Spanish, matching the audience of the
//! quiz (Colombian secondary-school physics students).

use physquiz_core::model::PlayerIdentity;
use physquiz_core::scoring::ScoredResult;

/// The congratulation line for a grade band.
pub fn congratulations(grade_band: u8) -> &'static str {
    match grade_band {
        5 => {
            "🏆✨ ¡INCREÍBLE! ¡PUNTUACIÓN PERFECTA! ✨🏆\n\
             🔥 ¡Eres un GENIO de la Física! 🔥\n\
             🎯 ¡Dominas completamente estos conceptos!"
        }
        4 => "🎉 ¡Excelente trabajo! Dominas muy bien los conceptos de física.",
        3 => "👏 ¡Buen trabajo! Tienes una base sólida en física.",
        _ => "💪 ¡No te desanimes! La física requiere práctica constante.",
    }
}

/// Render the end-of-session screen.
///
/// `planned` is the number of questions drawn for the session; an early
/// termination shows answered-of-planned instead of the congratulation line.
pub fn render_result(result: &ScoredResult, identity: &PlayerIdentity, planned: usize) -> String {
    let mut out = String::new();

    let mut student = Vec::new();
    if !identity.name.trim().is_empty() {
        student.push(identity.name.clone());
    }
    if !identity.grade.trim().is_empty() {
        student.push(identity.grade.clone());
    }
    if let Some(email) = identity.email.as_deref().filter(|e| !e.is_empty()) {
        student.push(email.to_string());
    }
    if !student.is_empty() {
        out.push_str(&format!("👤 Estudiante: {}\n\n", student.join(" | ")));
    }

    if result.early_termination {
        let reason = result.reason.map(|r| r.as_str()).unwrap_or("manual");
        out.push_str(&format!("Fin anticipado ({reason}).\n"));
        out.push_str(&format!(
            "Preguntas respondidas: {} / {}\n",
            result.total_count, planned
        ));
        out.push_str(&format!("Correctas: {}\n", result.correct_count));
        out.push_str(&format!("Nota: {}/5\n", result.grade_band));
    } else {
        out.push_str(&format!("{}\n\n", congratulations(result.grade_band)));
        out.push_str(&format!(
            "Respuestas correctas: {} de {}\n",
            result.correct_count, result.total_count
        ));
        out.push_str(&format!("Puntuación: {:.1}%\n", result.percentage));
        out.push_str(&format!("Nota: {}/5\n", result.grade_band));
    }

    out
}
