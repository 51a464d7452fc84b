//! OpenAI-compatible [`LlmClient`]: wraps openai-client with a fixed model and temperature.

use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{
    chat_message_to_openai, validate_config, LlmClient, LlmConfig, LlmError, DEFAULT_TEMPERATURE,
};

/// LlmClient backed by an OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    temperature: f32,
}

impl OpenAILlmClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key, base_url),
            model: super::DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Builds a client from config after validating it.
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self, LlmError> {
        validate_config(config)?;
        Ok(
            Self::new(config.api_key().to_string(), config.base_url().to_string())
                .with_model(config.model().to_string())
                .with_temperature(config.temperature()),
        )
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>, _>>()?;
        self.client
            .chat_completion(&self.model, self.temperature, openai_messages)
            .await
            .map_err(LlmError::from)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
