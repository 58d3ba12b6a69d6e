//! The `physquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use physquiz_core::bank;

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let pool = bank::load_pool(&questions_path)?;
    println!(
        "Question pool: {} ({} questions)",
        questions_path.display(),
        pool.len()
    );

    let warnings = bank::validate_pool(&pool);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Pool valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
