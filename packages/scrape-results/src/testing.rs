//! Testing utilities including a mock transport.
//!
//! Lets applications exercise the submission flow without a live backend.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use crate::credentials::BearerToken;
use crate::error::{TransportError, TransportResult};
use crate::submit::{BasePersistenceTransport, TransportResponse};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub token: String,
    /// Parsed JSON, or the raw text as a string value if it was not JSON
    pub body: serde_json::Value,
}

/// Mock transport with canned responses and call tracking.
///
/// Responses are returned in the order they were queued; once the queue is
/// drained every call gets `200` with an empty body. Clones share state, so
/// keep a clone around to inspect calls after handing one to a coordinator.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<TransportResult<TransportResponse>>>>,
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    /// Queue a failure where no response is received.
    pub fn with_error(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Wait this long after recording a call before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<RecordedRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl BasePersistenceTransport for MockTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        token: &BearerToken,
        body: String,
    ) -> TransportResult<TransportResponse> {
        // Coordinators always send JSON; keep anything else verbatim.
        let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        self.calls.lock().unwrap().push(RecordedRequest {
            endpoint: endpoint.to_string(),
            token: token.expose().to_string(),
            body,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(TransportResponse::new(200, "")))
    }
}
