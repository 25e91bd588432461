use serde::{Deserialize, Serialize};

use super::record::ArticleRecord;
use crate::error::NormalizeError;

/// Articles persisted together in one request.
///
/// Built fresh for every submission and consumed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionBatch {
    pub project_id: i64,
    pub articles: Vec<ArticleRecord>,
}

impl SubmissionBatch {
    pub fn new(project_id: i64, articles: Vec<ArticleRecord>) -> Self {
        Self {
            project_id,
            articles,
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Message shown when the backend could not be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "could not reach server";

/// Result of one submission attempt. Never retried by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SubmissionOutcome {
    Success,

    /// Rejected locally; no request was sent
    ValidationFailure { message: String },

    /// `status_code` is `None` when no response was received
    #[serde(rename_all = "camelCase")]
    TransportFailure {
        status_code: Option<u16>,
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::TransportFailure { status_code, .. } => *status_code,
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::ValidationFailure { message } | Self::TransportFailure { message, .. } => {
                Some(message)
            }
        }
    }

    /// Text for an error banner, `None` on success.
    ///
    /// Connectivity failures collapse to [`UNREACHABLE_MESSAGE`]; the detailed
    /// message stays available through [`message`](Self::message).
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::TransportFailure {
                status_code: None, ..
            } => Some(UNREACHABLE_MESSAGE),
            other => other.message(),
        }
    }
}

impl From<NormalizeError> for SubmissionOutcome {
    fn from(err: NormalizeError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result of a submission raced against a cancellation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellableSubmission {
    Completed(SubmissionOutcome),

    /// Cancelled before a response arrived. The backend may or may not have
    /// persisted the batch, so this is neither success nor failure.
    Cancelled,
}
