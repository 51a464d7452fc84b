//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the completion gateway seen by the tutor service), the
//! [`LlmError`] taxonomy and an OpenAI-compatible implementation. Transport-agnostic callers
//! depend only on the trait so tests can swap in scripted clients.

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, OpenAIError,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod error;
mod openai_llm;

pub use config::{
    validate_config, EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
pub use error::LlmError;
pub use openai_llm::OpenAILlmClient;

/// Completion gateway: turns an assembled message list into the model's reply text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the reply for `messages` (system, history, new question, in order).
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;

    /// Model identifier used for every request.
    fn model(&self) -> &str;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
