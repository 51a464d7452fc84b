//! Service configuration: ServerConfig (HTTP, logging, conversation window) + LLM config from llm-client.

mod base;
mod tutor_config;

#[cfg(test)]
mod tests;

pub use base::{ServerConfig, MAX_HISTORY_WINDOW};
pub use tutor_config::TutorConfig;
