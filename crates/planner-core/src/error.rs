//! Error types for planner-core.

use thiserror::Error;

/// Result type alias using planner-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for planner operations
#[derive(Error, Debug)]
pub enum Error {
    // Back-end API errors
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    // Auth errors
    #[error("No user identity on request")]
    MissingIdentity,

    #[error("Unknown authorization policy: {0}")]
    UnknownPolicy(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an error from a non-success API response
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Whether the failure came from the back-end rather than this process
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Api { .. } | Error::NotFound(_) | Error::Decode(_)
        )
    }
}
