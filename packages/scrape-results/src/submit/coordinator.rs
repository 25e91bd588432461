use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::transport::{BasePersistenceTransport, HttpTransport, TransportResponse};
use crate::config::SubmitConfig;
use crate::credentials::BearerToken;
use crate::error::ConfigResult;
use crate::normalize::{prepare_batch_with, HeadingLimits};
use crate::types::{
    CancellableSubmission, RawArticle, SubmissionBatch, SubmissionOutcome, UNREACHABLE_MESSAGE,
};

/// Sends normalized batches to the persistence backend.
///
/// Holds only immutable configuration, so calls are independent of each
/// other: no batching, deduplication, caching, or retries. Keeping a single
/// batch from being submitted twice concurrently is up to the caller.
pub struct SubmissionCoordinator<T = HttpTransport> {
    transport: T,
    endpoint: Url,
    heading_limits: HeadingLimits,
}

impl SubmissionCoordinator<HttpTransport> {
    pub fn from_config(config: &SubmitConfig) -> ConfigResult<Self> {
        Ok(Self::new(
            HttpTransport::from_config(config)?,
            config.endpoint.clone(),
        ))
    }
}

impl<T: BasePersistenceTransport> SubmissionCoordinator<T> {
    pub fn new(transport: T, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
            heading_limits: HeadingLimits::default(),
        }
    }

    pub fn with_heading_limits(mut self, limits: HeadingLimits) -> Self {
        self.heading_limits = limits;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Persist a batch with exactly one request.
    ///
    /// Empty batches and blank tokens are rejected without touching the
    /// network.
    pub async fn submit(&self, batch: SubmissionBatch, token: &BearerToken) -> SubmissionOutcome {
        if batch.is_empty() {
            debug!(project_id = batch.project_id, "Refusing to submit empty batch");
            return SubmissionOutcome::validation("no articles to submit");
        }
        if token.is_blank() {
            debug!(project_id = batch.project_id, "Refusing to submit without a session token");
            return SubmissionOutcome::validation("missing session token");
        }

        let project_id = batch.project_id;
        let article_count = batch.len();

        let body = match serde_json::to_string(&batch) {
            Ok(body) => body,
            Err(e) => {
                return SubmissionOutcome::validation(format!("failed to serialize batch: {e}"))
            }
        };

        info!(
            project_id,
            article_count,
            endpoint = %self.endpoint,
            "Submitting scrape results"
        );

        match self.transport.post_json(&self.endpoint, token, body).await {
            Ok(response) if response.is_success() => {
                info!(project_id, article_count, status = response.status, "Scrape results saved");
                SubmissionOutcome::Success
            }
            Ok(response) => {
                let message = rejection_message(&response);
                warn!(
                    project_id,
                    status = response.status,
                    message = %message,
                    "Backend rejected scrape results"
                );
                SubmissionOutcome::TransportFailure {
                    status_code: Some(response.status),
                    message,
                }
            }
            Err(e) => {
                warn!(project_id, error = %e, "Could not reach persistence backend");
                SubmissionOutcome::TransportFailure {
                    status_code: None,
                    message: format!("{UNREACHABLE_MESSAGE}: {e}"),
                }
            }
        }
    }

    /// Normalize raw scrape results and submit them.
    ///
    /// Any normalization failure becomes a `ValidationFailure` and nothing is
    /// sent. `raw` is only borrowed, so the caller's result set is intact
    /// whatever the outcome.
    pub async fn submit_raw(
        &self,
        project_id: i64,
        raw: &[RawArticle],
        token: &BearerToken,
    ) -> SubmissionOutcome {
        match prepare_batch_with(project_id, raw, self.heading_limits) {
            Ok(batch) => self.submit(batch, token).await,
            Err(e) => e.into(),
        }
    }

    /// Submit, giving up when `cancel` fires first.
    ///
    /// A cancelled submission may or may not have been persisted; callers must
    /// not report it as either.
    pub async fn submit_cancellable(
        &self,
        batch: SubmissionBatch,
        token: &BearerToken,
        cancel: &CancellationToken,
    ) -> CancellableSubmission {
        let project_id = batch.project_id;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(project_id, "Submission cancelled before a response; persistence unknown");
                CancellableSubmission::Cancelled
            }
            outcome = self.submit(batch, token) => CancellableSubmission::Completed(outcome),
        }
    }
}

/// Pull `message` (or `error`) out of a JSON error body, falling back to a
/// generic text carrying the status code.
fn rejection_message(response: &TransportResponse) -> String {
    serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["message", "error"].iter().find_map(|key| {
                body.get(*key)
                    .and_then(|v| v.as_str())
                    .filter(|m| !m.trim().is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("request failed with status {}", response.status))
}
