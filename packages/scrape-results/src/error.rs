//! Typed errors for the scrape-results library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Normalization and
//! transport errors are folded into a [`SubmissionOutcome`] at the
//! coordinator boundary, so callers only ever see values.
//!
//! [`SubmissionOutcome`]: crate::types::SubmissionOutcome

use thiserror::Error;

/// Errors raised while normalizing raw scrape results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A required structural field is absent or blank
    #[error("{location}: missing required field `{field}`")]
    MissingField {
        location: String,
        field: &'static str,
    },

    /// Heading nesting is deeper than the configured bound
    #[error("{location}: heading nesting exceeds depth limit of {limit}")]
    HeadingDepthExceeded { location: String, limit: usize },

    /// Heading tree has more nodes than the configured budget
    #[error("{location}: heading tree exceeds node limit of {limit}")]
    HeadingNodeLimitExceeded { location: String, limit: usize },

    /// Raw input could not be parsed as JSON
    #[error("invalid scrape result JSON: {0}")]
    InvalidJson(String),
}

impl NormalizeError {
    /// Prefix the error location with an outer record path.
    ///
    /// Used when a link or heading error bubbles up into an article.
    pub(crate) fn within(self, outer: &str) -> Self {
        let join = |inner: String| {
            if inner.is_empty() {
                outer.to_string()
            } else if inner.starts_with('[') {
                format!("{outer}{inner}")
            } else {
                format!("{outer}.{inner}")
            }
        };
        match self {
            Self::MissingField { location, field } => Self::MissingField {
                location: join(location),
                field,
            },
            Self::HeadingDepthExceeded { location, limit } => Self::HeadingDepthExceeded {
                location: join(location),
                limit,
            },
            Self::HeadingNodeLimitExceeded { location, limit } => {
                Self::HeadingNodeLimitExceeded {
                    location: join(location),
                    limit,
                }
            }
            other @ Self::InvalidJson(_) => other,
        }
    }
}

/// Errors at the transport seam, before any HTTP response exists.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not connect to the backend
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Any other client-side failure
    #[error("request failed: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(Box::new(err))
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("{0} must be set")]
    MissingVar(&'static str),

    /// Environment variable is set but not parseable
    #[error("{name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    /// Endpoint is not a valid http(s) URL
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Endpoint uses a scheme other than http or https
    #[error("endpoint scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    /// HTTP client could not be built
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Result type alias for configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
