//! Error types for the tutor service.
//!
//! [`TutorError`] is what [`crate::ChatService`] returns and what the HTTP layer turns into a
//! response. Upstream failures keep their [`LlmError`] so the cause stays visible in logs.

use llm_client::LlmError;
use thiserror::Error;

/// Top-level error for the service (config, request validation, completion gateway, internal).
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Upstream(#[from] LlmError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TutorError {
    /// Failure category reported to callers: `configuration`, `invalid_request`, `upstream` or `internal`.
    pub fn kind(&self) -> &'static str {
        match self {
            TutorError::Config(_) | TutorError::Upstream(LlmError::Configuration(_)) => {
                "configuration"
            }
            TutorError::InvalidRequest(_) => "invalid_request",
            TutorError::Upstream(_) => "upstream",
            TutorError::Internal(_) => "internal",
        }
    }
}

impl From<std::io::Error> for TutorError {
    fn from(err: std::io::Error) -> Self {
        TutorError::Internal(err.to_string())
    }
}

/// Result type for service operations; uses [`TutorError`].
pub type Result<T> = std::result::Result<T, TutorError>;
