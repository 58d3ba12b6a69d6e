//! Durable local fallback store and the session-scoped identity prefill.
//!
//! The backup store is a directory of JSON files keyed by a prefix plus a
//! millisecond timestamp, mirroring the key scheme the export tooling
//! enumerates. The prefill store remembers the last identity form between
//! runs; it is best-effort and never fatal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use physquiz_core::model::PlayerIdentity;

use crate::payload::ResultPayload;

/// Key prefix for fallback entries.
pub const BACKUP_KEY_PREFIX: &str = "quiz_result_";

/// One locally stored result.
#[derive(Debug, Clone)]
pub struct StoredResult {
    pub key: String,
    pub payload: ResultPayload,
}

/// Directory-backed key-value store for undelivered results.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a payload under a fresh timestamped key and return the key.
    /// The stored copy carries the `savedLocally` marker.
    pub fn save(&self, payload: &ResultPayload) -> Result<String> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create backup dir {}", self.dir.display()))?;

        let mut stored = payload.clone();
        stored.saved_locally = Some(true);

        // Bump the key on collision so rapid saves never overwrite each other.
        let mut millis = Utc::now().timestamp_millis();
        let path = loop {
            let candidate = self.dir.join(format!("{BACKUP_KEY_PREFIX}{millis}.json"));
            if !candidate.exists() {
                break candidate;
            }
            millis += 1;
        };

        let json = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write backup {}", path.display()))?;

        let key = format!("{BACKUP_KEY_PREFIX}{millis}");
        tracing::info!(%key, "result saved to local backup store");
        Ok(key)
    }

    /// All stored results, most recent first. Unparseable entries are
    /// skipped with a warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<StoredResult>> {
        let mut results = Vec::new();

        if !self.dir.is_dir() {
            return Ok(results);
        }

        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read backup dir {}", self.dir.display()))?
        {
            let path = entry?.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !stem.starts_with(BACKUP_KEY_PREFIX) {
                continue;
            }

            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read backup {}", path.display()))?;
            match serde_json::from_str::<ResultPayload>(&content) {
                Ok(payload) => results.push(StoredResult {
                    key: stem.to_string(),
                    payload,
                }),
                Err(e) => {
                    tracing::warn!("skipping unreadable backup {}: {e}", path.display());
                }
            }
        }

        results.sort_by(|a, b| {
            let ts = |r: &StoredResult| {
                DateTime::parse_from_rfc3339(&r.payload.timestamp)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC)
            };
            ts(b).cmp(&ts(a)).then_with(|| b.key.cmp(&a.key))
        });

        Ok(results)
    }
}

/// Remembers the last submitted identity between runs of the same player.
#[derive(Debug, Clone)]
pub struct PrefillStore {
    path: PathBuf,
}

impl PrefillStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the identity for the next run. Failures are logged only.
    pub fn remember(&self, identity: &PlayerIdentity) {
        let write = || -> Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(identity)?;
            std::fs::write(&self.path, json)?;
            Ok(())
        };
        if let Err(e) = write() {
            tracing::warn!("could not remember player identity: {e:#}");
        }
    }

    /// The identity from the previous run, if any survives and parses.
    pub fn recall(&self) -> Option<PlayerIdentity> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!("ignoring corrupt prefill file: {e}");
                None
            }
        }
    }
}
