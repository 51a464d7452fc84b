//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for non-streaming chat completion against any
//! OpenAI-compatible endpoint (Groq in production). Provides token masking for safe logging.
//!
//! async-openai retries rate-limited and server-error responses with exponential backoff by
//! default; this client installs a zero-budget backoff so every call is attempted exactly once.

use std::sync::Arc;
use std::time::Duration;

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use thiserror::Error;

pub use async_openai::error::{ApiError, OpenAIError};
pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Errors from a single chat completion call.
#[derive(Debug, Error)]
pub enum OpenAIClientError {
    /// Request building, transport, API or deserialization error from async-openai.
    #[error(transparent)]
    Api(#[from] OpenAIError),

    /// The endpoint answered but returned no choices.
    #[error("No response from model: completion had no choices")]
    EmptyResponse,
}

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Backoff that gives up before the first retry.
fn no_retry_backoff() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(1))
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Chat client for an OpenAI-compatible endpoint. Holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
    base_url: String,
}

impl OpenAIClient {
    /// Builds a client for `base_url` (e.g. `https://api.groq.com/openai/v1`).
    pub fn new(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url.clone());
        let client = Client::with_config(config).with_backoff(no_retry_backoff());
        Self {
            client: Arc::new(client),
            api_key_for_logging: api_key,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Logs masked API key, message count and token usage. A missing `content` on the first
    /// choice yields an empty string; no choices at all is [`OpenAIClientError::EmptyResponse`].
    pub async fn chat_completion(
        &self,
        model: &str,
        temperature: f32,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, OpenAIClientError> {
        tracing::info!(
            model = %model,
            temperature = temperature,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .temperature(temperature)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => Err(OpenAIClientError::EmptyResponse),
        }
    }
}
