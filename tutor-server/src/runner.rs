//! Wiring: config → components → HTTP server.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use llm_client::{LlmClient, OpenAILlmClient};
use memory_core::ConversationStore;
use prompt::PromptAssembler;

use crate::chat::ChatService;
use crate::config::TutorConfig;
use crate::core::init_tracing;
use crate::http::{router, run_http, HttpOptions};

/// Builds the chat service from config with the given completion gateway.
pub fn build_chat_service(config: &TutorConfig, llm: Arc<dyn LlmClient>) -> ChatService {
    let server = config.server();
    let store = ConversationStore::new(
        server.history_window,
        Duration::from_secs(server.session_idle_ttl_secs),
    );
    let assembler = PromptAssembler::new(config.system_instruction());
    ChatService::new(llm, assembler, store)
}

/// HTTP options derived from config.
pub fn http_options(config: &TutorConfig) -> HttpOptions {
    HttpOptions {
        index_html_path: config.server().index_html_path.clone(),
        debug_endpoint: config.server().debug_endpoint,
    }
}

/// Main entry: validate config, init logging, build the OpenAI-compatible client and serve.
#[instrument(skip(config))]
pub async fn run_server(config: TutorConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.server())?;

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(config.llm())?);

    info!(
        bind_addr = %config.server().bind_addr,
        base_url = %config.llm().base_url,
        model = %config.llm().model,
        temperature = config.llm().temperature,
        history_window = config.server().history_window,
        session_idle_ttl_secs = config.server().session_idle_ttl_secs,
        debug_endpoint = config.server().debug_endpoint,
        "Initializing tutor server"
    );

    let chat = Arc::new(build_chat_service(&config, llm));
    let app = router(chat, http_options(&config));
    run_http(app, &config.server().bind_addr).await
}
