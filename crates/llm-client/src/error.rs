//! Completion gateway error taxonomy and its mapping from async-openai errors.

use openai_client::{ApiError, OpenAIClientError, OpenAIError};
use thiserror::Error;

/// Why a completion could not be produced.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing or invalid credential / endpoint configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Endpoint unreachable or failing server-side.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Credential rejected by the endpoint.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Endpoint answered with something that is not a usable completion.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request refused for another reason (bad model id, oversized prompt, ...).
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl LlmError {
    /// Short stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Configuration(_) => "configuration",
            LlmError::UpstreamUnavailable(_) => "upstream_unavailable",
            LlmError::AuthenticationFailed(_) => "authentication_failed",
            LlmError::RateLimited(_) => "rate_limited",
            LlmError::InvalidResponse(_) => "invalid_response",
            LlmError::Rejected(_) => "rejected",
        }
    }
}

fn contains_any(haystack: Option<&str>, needles: &[&str]) -> bool {
    haystack
        .map(|h| {
            let h = h.to_ascii_lowercase();
            needles.iter().any(|n| h.contains(n))
        })
        .unwrap_or(false)
}

/// Classifies an API error body. Server errors reach us without `type` or `code`.
fn classify_api_error(api: ApiError) -> LlmError {
    let code = api.code.as_deref();
    let kind = api.r#type.as_deref();
    let message = Some(api.message.as_str());

    let rate_limited = contains_any(code, &["rate_limit"])
        || contains_any(kind, &["rate_limit", "tokens", "requests"])
        || contains_any(message, &["rate limit"]);
    let unauthorized = contains_any(code, &["invalid_api_key", "unauthorized"])
        || contains_any(kind, &["authentication", "permission"])
        || contains_any(message, &["api key", "unauthorized"]);
    let untyped = code.is_none() && kind.is_none();

    if rate_limited {
        LlmError::RateLimited(api.message)
    } else if unauthorized {
        LlmError::AuthenticationFailed(api.message)
    } else if untyped {
        LlmError::UpstreamUnavailable(api.message)
    } else {
        LlmError::Rejected(api.message)
    }
}

impl From<OpenAIError> for LlmError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => classify_api_error(api),
            OpenAIError::Reqwest(e) => LlmError::UpstreamUnavailable(e.to_string()),
            OpenAIError::JSONDeserialize(e) => LlmError::InvalidResponse(e.to_string()),
            OpenAIError::InvalidArgument(msg) => LlmError::Rejected(msg),
            other => LlmError::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<OpenAIClientError> for LlmError {
    fn from(err: OpenAIClientError) -> Self {
        match err {
            OpenAIClientError::Api(e) => e.into(),
            OpenAIClientError::EmptyResponse => {
                LlmError::InvalidResponse("completion had no choices".to_string())
            }
        }
    }
}
