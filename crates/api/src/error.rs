//! Error types for `docdocdoc-api`.

use crate::transport::sanitize_reqwest_error;
use crate::validation::ValidationError;
use thiserror::Error;

/// Hint attached to every transport failure.
pub const FALLBACK_MESSAGE: &str = "Could not connect to DocDocDoc API";

/// Everything that can stop a DocDocDoc operation.
///
/// The `Display` output of each variant is exactly the `error` text surfaced to callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API key resolved; nothing is sent.
    #[error("API_KEY not configured")]
    NotConfigured,

    /// Input rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Startup configuration problems (e.g. an unparseable base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection errors, timeouts, non-2xx statuses and unreadable bodies.
    #[error("API request failed: {0}")]
    Transport(String),

    /// Anything else that went wrong while dispatching.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Secondary message for callers; only transport failures carry one.
    #[must_use]
    pub fn fallback_message(&self) -> Option<&'static str> {
        match self {
            Self::Transport(_) => Some(FALLBACK_MESSAGE),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_builder() {
            Self::Unexpected(sanitize_reqwest_error(&value))
        } else {
            Self::Transport(sanitize_reqwest_error(&value))
        }
    }
}

/// Result type alias for DocDocDoc API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
