//! The spreadsheet result sink.
//!
//! Delivery is fire-and-forget: the web app's response body is never parsed
//! and an opaque response still counts as best-effort success. Transport
//! failures are recovered through the local backup store; `send` never
//! returns an error to the caller and is never retried.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::payload::ResultPayload;
use crate::store::BackupStore;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// What became of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// The payload reached the remote endpoint.
    pub success: bool,
    /// The payload was written to the local fallback store instead.
    pub local_save: bool,
}

impl DeliveryOutcome {
    pub fn delivered() -> Self {
        Self {
            success: true,
            local_save: false,
        }
    }

    pub fn saved_locally() -> Self {
        Self {
            success: false,
            local_save: true,
        }
    }

    /// Delivery failed and the fallback write failed too.
    pub fn lost() -> Self {
        Self {
            success: false,
            local_save: false,
        }
    }
}

/// A destination for scored results.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Attempt delivery. Must not fail; recovery happens inside.
    async fn send(&self, payload: &ResultPayload) -> DeliveryOutcome;
}

/// Sink POSTing to a Google Apps Script web app (or anything shaped like it).
pub struct SheetsSink {
    endpoint: Option<String>,
    client: reqwest::Client,
    store: BackupStore,
}

impl SheetsSink {
    /// `endpoint` of `None` means delivery is unconfigured; every result
    /// goes straight to the backup store.
    pub fn new(endpoint: Option<String>, store: BackupStore) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint,
            client,
            store,
        }
    }

    fn save_fallback(&self, payload: &ResultPayload) -> DeliveryOutcome {
        match self.store.save(payload) {
            Ok(key) => {
                tracing::info!(%key, "result kept in local fallback store");
                DeliveryOutcome::saved_locally()
            }
            Err(e) => {
                tracing::error!("local fallback save failed: {e:#}");
                DeliveryOutcome::lost()
            }
        }
    }
}

#[async_trait]
impl ResultSink for SheetsSink {
    #[instrument(skip(self, payload), fields(nota = payload.nota))]
    async fn send(&self, payload: &ResultPayload) -> DeliveryOutcome {
        let Some(endpoint) = &self.endpoint else {
            tracing::warn!("result endpoint not configured, saving locally");
            return self.save_fallback(payload);
        };

        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("could not serialize result payload: {e}");
                return self.save_fallback(payload);
            }
        };

        // The Apps Script reads the raw request body, so the body is sent as
        // plain text rather than with a JSON content type.
        match self.client.post(endpoint).body(body).send().await {
            Ok(response) => {
                // Any completed exchange counts; the response is not trusted.
                tracing::info!(status = %response.status(), "result delivered");
                DeliveryOutcome::delivered()
            }
            Err(e) => {
                tracing::error!("result delivery failed: {e}");
                self.save_fallback(payload)
            }
        }
    }
}
