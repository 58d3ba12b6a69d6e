//! The wire payload the spreadsheet endpoint consumes.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use physquiz_core::model::{PlayerIdentity, RecordedAnswer};
use physquiz_core::scoring::ScoredResult;

/// JSON body POSTed to the result sink. Field names match what the
/// spreadsheet web app ingests, so they stay in Spanish on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPayload {
    /// RFC 3339 submission time.
    pub timestamp: String,
    pub nombre: String,
    pub email: String,
    pub grado: String,
    pub correctas: usize,
    pub total: usize,
    pub porcentaje: f64,
    pub nota: u8,
    /// The detailed answers, JSON-encoded as a single string.
    pub respuestas: String,
    #[serde(
        rename = "finAnticipado",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub early_termination: Option<bool>,
    #[serde(rename = "razonFin", default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<String>,
    /// Set only on payloads written to the local fallback store.
    #[serde(
        rename = "savedLocally",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_locally: Option<bool>,
}

impl ResultPayload {
    /// Build the payload for a scored session. Missing identity fields take
    /// the same placeholders the sink always received.
    pub fn new(
        result: &ScoredResult,
        identity: &PlayerIdentity,
        answers: &[RecordedAnswer],
    ) -> Result<Self, serde_json::Error> {
        let nombre = if identity.name.trim().is_empty() {
            "Anónimo".to_string()
        } else {
            identity.name.clone()
        };
        let grado = if identity.grade.trim().is_empty() {
            "N/A".to_string()
        } else {
            identity.grade.clone()
        };

        Ok(Self {
            timestamp: Utc::now().to_rfc3339(),
            nombre,
            email: identity.email.clone().unwrap_or_default(),
            grado,
            correctas: result.correct_count,
            total: result.total_count,
            porcentaje: result.percentage,
            nota: result.grade_band,
            respuestas: serde_json::to_string(answers)?,
            early_termination: result.early_termination.then_some(true),
            end_reason: result.reason.map(|r| r.as_str().to_string()),
            saved_locally: None,
        })
    }
}
