use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

pub const ENDPOINT_VAR: &str = "SCRAPE_RESULTS_ENDPOINT";
pub const TIMEOUT_VAR: &str = "SCRAPE_RESULTS_TIMEOUT_SECS";
pub const PROJECT_ID_VAR: &str = "SCRAPE_RESULTS_PROJECT_ID";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how scrape results are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Persistence endpoint that receives the `POST`
    pub endpoint: Url,

    /// Whole-request timeout for the HTTP client
    pub timeout: Duration,

    /// Project used when the caller does not pick one
    pub default_project_id: Option<i64>,
}

impl SubmitConfig {
    pub fn new(endpoint: &str) -> ConfigResult<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_project_id: None,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let endpoint = lookup(ENDPOINT_VAR).ok_or(ConfigError::MissingVar(ENDPOINT_VAR))?;
        let mut config = Self::new(&endpoint)?;

        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|e| ConfigError::InvalidVar {
                name: TIMEOUT_VAR,
                reason: format!("{e}"),
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(id) = lookup(PROJECT_ID_VAR) {
            let id: i64 = id.trim().parse().map_err(|e| ConfigError::InvalidVar {
                name: PROJECT_ID_VAR,
                reason: format!("{e}"),
            })?;
            config = config.with_default_project_id(id);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_project_id(mut self, project_id: i64) -> Self {
        self.default_project_id = Some(project_id);
        self
    }
}

fn parse_endpoint(raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
