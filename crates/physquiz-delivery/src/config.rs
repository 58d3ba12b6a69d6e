//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use physquiz_core::bank::{DEFAULT_GRADE_KEY, DEFAULT_SAMPLE_SIZE};

/// Top-level physquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysquizConfig {
    /// Google Apps Script web-app URL results are posted to.
    /// Results are only saved locally when unset.
    #[serde(default)]
    pub sheets_url: Option<String>,
    /// Remote question source URL. The local questions file is used when unset.
    #[serde(default)]
    pub questions_url: Option<String>,
    /// Local questions file, used when `questions_url` is unset.
    #[serde(default = "default_questions_file")]
    pub questions_file: PathBuf,
    /// Directory for locally saved results and the identity prefill file.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Grade key to draw questions from.
    #[serde(default = "default_grade")]
    pub default_grade: String,
    /// Questions per session.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Whether leaving the quiz triggers the warn-then-terminate policy.
    #[serde(default = "default_monitor_enabled")]
    pub monitor_enabled: bool,
}

fn default_questions_file() -> PathBuf {
    PathBuf::from("questions.json")
}
fn default_store_dir() -> PathBuf {
    PathBuf::from("./physquiz-results")
}
fn default_grade() -> String {
    DEFAULT_GRADE_KEY.to_string()
}
fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}
fn default_monitor_enabled() -> bool {
    true
}

impl Default for PhysquizConfig {
    fn default() -> Self {
        Self {
            sheets_url: None,
            questions_url: None,
            questions_file: default_questions_file(),
            store_dir: default_store_dir(),
            default_grade: default_grade(),
            sample_size: default_sample_size(),
            monitor_enabled: default_monitor_enabled(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `physquiz.toml` in the current directory
/// 2. `~/.config/physquiz/config.toml`
///
/// Environment variable overrides: `PHYSQUIZ_SHEETS_URL`, `PHYSQUIZ_QUESTIONS_URL`.
pub fn load_config() -> Result<PhysquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PhysquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("physquiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PhysquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PhysquizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("PHYSQUIZ_SHEETS_URL") {
        config.sheets_url = Some(url);
    }
    if let Ok(url) = std::env::var("PHYSQUIZ_QUESTIONS_URL") {
        config.questions_url = Some(url);
    }

    config.sheets_url = config.sheets_url.as_deref().map(resolve_env_vars);
    config.questions_url = config.questions_url.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("physquiz"))
}
