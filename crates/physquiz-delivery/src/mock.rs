//! Mock result sink for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::payload::ResultPayload;
use crate::sheets::{DeliveryOutcome, ResultSink};

/// A mock sink for testing the session flow without real network calls.
pub struct MockSink {
    outcome: DeliveryOutcome,
    /// Number of sends made.
    call_count: AtomicU32,
    /// Last payload received.
    last_payload: Mutex<Option<ResultPayload>>,
}

impl MockSink {
    /// Create a mock that reports successful delivery.
    pub fn new() -> Self {
        Self::with_outcome(DeliveryOutcome::delivered())
    }

    /// Create a mock reporting the given outcome on every send.
    pub fn with_outcome(outcome: DeliveryOutcome) -> Self {
        Self {
            outcome,
            call_count: AtomicU32::new(0),
            last_payload: Mutex::new(None),
        }
    }

    /// Get the number of sends made to this sink.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last payload sent to this sink.
    pub fn last_payload(&self) -> Option<ResultPayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultSink for MockSink {
    async fn send(&self, payload: &ResultPayload) -> DeliveryOutcome {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        self.outcome
    }
}
