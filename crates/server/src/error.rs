//! Error types for the MCP server.

use docdocdoc_api::ApiError;
use thiserror::Error;

/// Main error type for the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration errors (invalid flags, unusable base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Startup errors (transport failed to initialize)
    #[error("Startup error: {0}")]
    Startup(String),

    /// Runtime errors (session ended abnormally)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for ServerError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Config(msg) => Self::Config(msg),
            other => Self::Runtime(other.to_string()),
        }
    }
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
