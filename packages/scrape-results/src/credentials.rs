//! Session credential for the persistence backend.
//!
//! The token comes from the caller's session provider on every submit call
//! and is never stored, refreshed, or logged by this crate.

use secrecy::{ExposeSecret, SecretString};

/// Bearer token sent in the `Authorization` header.
///
/// `Debug` prints `BearerToken(SecretBox<str>([REDACTED]))`; the raw value is
/// only reachable through [`BearerToken::expose`].
#[derive(Debug)]
pub struct BearerToken(SecretString);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Raw token for the transport's `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// A signed-out session hands over an empty or whitespace-only token.
    /// The coordinator refuses to send those.
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for BearerToken {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
