//! TutorConfig: ServerConfig + LLM config. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};
use prompt::DEFAULT_TUTOR_INSTRUCTION;

use super::ServerConfig;

/// Full service config. A missing API key fails [`TutorConfig::load`], so the server never starts
/// without a credential.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub server: ServerConfig,
    pub llm: EnvLlmConfig,
}

impl TutorConfig {
    /// Load full config from environment variables. `bind_addr` overrides BIND_ADDR if provided.
    /// Call validate() after load to check config before serving.
    pub fn load(bind_addr: Option<String>) -> Result<Self> {
        let server = ServerConfig::load(bind_addr)?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self { server, llm })
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.llm.validate()?;
        Ok(())
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }

    /// System instruction: LLM_SYSTEM_PROMPT when set, else the built-in tutor instruction.
    pub fn system_instruction(&self) -> &str {
        self.llm.system_prompt().unwrap_or(DEFAULT_TUTOR_INSTRUCTION)
    }
}
