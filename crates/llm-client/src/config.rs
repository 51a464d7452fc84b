//! LLM configuration: trait and env-based implementation.

use std::env;

use crate::error::LlmError;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
/// Low randomness favours short, predictable tutoring replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub system_prompt: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn temperature(&self) -> f32 {
        self.temperature
    }
    fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `GROQ_API_KEY` (or `OPENAI_API_KEY`) is required; a missing or blank key is
    /// [`LlmError::Configuration`].
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env::var("GROQ_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                LlmError::Configuration("Missing GROQ_API_KEY in environment variables".to_string())
            })?;
        let base_url = env::var("LLM_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = match env::var("LLM_TEMPERATURE") {
            Ok(raw) => raw.trim().parse::<f32>().map_err(|_| {
                LlmError::Configuration(format!("LLM_TEMPERATURE is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };
        let system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            system_prompt,
        })
    }

    /// Validate config; see [`validate_config`].
    pub fn validate(&self) -> Result<(), LlmError> {
        validate_config(self)
    }
}

/// Checks any [`LlmConfig`]: non-blank API key, parseable base URL, temperature within the API's
/// 0..=2 range.
pub fn validate_config(config: &dyn LlmConfig) -> Result<(), LlmError> {
    if config.api_key().trim().is_empty() {
        return Err(LlmError::Configuration(
            "Missing GROQ_API_KEY in environment variables".to_string(),
        ));
    }
    if reqwest::Url::parse(config.base_url()).is_err() {
        return Err(LlmError::Configuration(format!(
            "LLM_BASE_URL is not a valid URL: {}",
            config.base_url()
        )));
    }
    if !(0.0..=2.0).contains(&config.temperature()) {
        return Err(LlmError::Configuration(format!(
            "LLM_TEMPERATURE must be between 0 and 2, got {}",
            config.temperature()
        )));
    }
    Ok(())
}
