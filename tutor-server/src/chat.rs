//! Chat service: one tutoring turn from question to recorded answer.
//!
//! Sequence per call: lock the session's buffer, read its history, assemble the prompt, ask the
//! completion gateway, and only on success record the turn. The session lock is held for the
//! whole sequence, so a failed or cancelled call leaves the buffer exactly as it was.

use std::sync::Arc;

use llm_client::LlmClient;
use memory_core::{ConversationStore, Turn, DEFAULT_SESSION_ID};
use prompt::PromptAssembler;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::core::Result;

/// Question and the tutor's answer for one successful turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub question: String,
    pub answer: String,
}

/// Binds conversation memory, prompt assembly and the completion gateway.
pub struct ChatService {
    store: ConversationStore,
    assembler: PromptAssembler,
    llm: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmClient>, assembler: PromptAssembler, store: ConversationStore) -> Self {
        Self {
            store,
            assembler,
            llm,
        }
    }

    /// Runs one turn for `session_id` (the shared default conversation when `None`).
    #[instrument(skip(self, question), fields(session_id = session_id.unwrap_or(DEFAULT_SESSION_ID)))]
    pub async fn ask(&self, session_id: Option<&str>, question: &str) -> Result<ChatReply> {
        let session_id = session_id.unwrap_or(DEFAULT_SESSION_ID);
        let session = self.store.session(session_id).await;
        let mut buffer = session.lock().await;

        let messages = self.assembler.assemble(buffer.iter(), question);
        info!(
            history_len = buffer.len(),
            message_count = messages.len(),
            model = %self.llm.model(),
            "Requesting completion"
        );

        let answer = self.llm.complete(messages).await.map_err(|e| {
            error!(error = %e, kind = e.kind(), "Completion failed; history left unchanged");
            e
        })?;

        buffer.record(question, answer.as_str());
        info!(history_len = buffer.len(), answer_len = answer.len(), "Turn recorded");

        Ok(ChatReply {
            question: question.to_string(),
            answer,
        })
    }

    /// Snapshot of a session's retained turns, oldest first. Unknown sessions read as empty and
    /// are not created.
    pub async fn history(&self, session_id: Option<&str>) -> Vec<Turn> {
        match self.store.peek(session_id.unwrap_or(DEFAULT_SESSION_ID)).await {
            Some(session) => {
                let buffer = session.lock().await;
                buffer.history()
            }
            None => Vec::new(),
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }
}
