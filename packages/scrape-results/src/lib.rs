//! Scrape Results Persistence
//!
//! Turns the raw output of a scraping run (page metadata, internal and outer
//! links, heading outlines, JSON-LD blocks) into canonical records and saves
//! them to the backend in a single request per user action.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scrape_results::{BearerToken, RawArticle, SubmissionCoordinator, SubmitConfig};
//!
//! let config = SubmitConfig::from_env()?;
//! let coordinator = SubmissionCoordinator::from_config(&config)?;
//!
//! let raw = RawArticle::from_json_array(&scraper_output)?;
//! let outcome = coordinator
//!     .submit_raw(project_id, &raw, &BearerToken::new(session_token))
//!     .await;
//!
//! if let Some(message) = outcome.user_message() {
//!     show_error_banner(message);
//! }
//! ```
//!
//! # Modules
//!
//! - [`types`] - Raw input, canonical records, batches and outcomes
//! - [`normalize`] - Pure raw → canonical conversion
//! - [`submit`] - Submission coordinator and transport seam
//! - [`config`] - Endpoint configuration from the environment
//! - [`credentials`] - Redacting bearer token wrapper
//! - [`testing`] - Mock transport for tests

pub mod config;
pub mod credentials;
pub mod error;
pub mod normalize;
pub mod submit;
pub mod testing;
pub mod types;

pub use config::SubmitConfig;
pub use credentials::BearerToken;
pub use error::{ConfigError, NormalizeError, TransportError};
pub use normalize::{
    normalize_article, normalize_headings, normalize_link, prepare_batch, HeadingLimits,
};
pub use submit::{BasePersistenceTransport, HttpTransport, SubmissionCoordinator, TransportResponse};
pub use testing::MockTransport;
pub use types::{
    ArticleRecord, CancellableSubmission, HeadingNode, LinkRecord, LinkStatus, RawArticle,
    RawHeading, RawLink, RawLinkStatus, SubmissionBatch, SubmissionOutcome,
};
