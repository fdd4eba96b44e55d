//! Upstream API settings resolved from the environment.

use crate::error::{ApiError, Result};
use std::fmt;

/// Default upstream used when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://staging.docdocdoc.com";

pub const API_KEY_ENV: &str = "API_KEY";
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Connection settings for the DocDocDoc API.
///
/// Built once at startup and handed to the gateway. A blank API key is treated as unset.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSettings {
    api_key: Option<String>,
    base_url: String,
}

impl ApiSettings {
    #[must_use]
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let base_url = base_url.into();
        let base_url = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url.trim().to_string()
        };
        Self { api_key, base_url }
    }

    /// Resolve settings from `API_KEY` and `BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::new(
            lookup(API_KEY_ENV),
            lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether live calls are possible (an API key is present).
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotConfigured`] when no API key was resolved.
    pub fn validate(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ApiError::NotConfigured)
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::new(None, DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}
