//! # Prompt
//!
//! Assembles the ordered message list sent to the completion service.
//!
//! ## Format
//!
//! - **System**: the tutor instruction (one message)
//! - **History**: for each retained turn, the user's input then the model's reply
//! - **Question**: the new user input as the final message
//!
//! ## Usage
//!
//! The tutor service calls [`PromptAssembler::assemble`] with the history of the caller's
//! session; the result is converted to OpenAI-compatible messages by `llm-client`.

use memory_core::Turn;
use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Instruction for the beginner English tutor persona.
pub const DEFAULT_TUTOR_INSTRUCTION: &str = "You are a friendly English tutor for beginners chatting about hobbies.
Use very simple English, very short answers (1-3 sentences).
Do not talk about yourself; talk more about the user.
If the user makes a mistake, correct gently:
Start with: 'You mean \"...?\"' and give the corrected version.
Keep conversation warm and friendly.";

/// Combines a fixed system instruction with conversation history and the new user input.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_instruction: String,
}

impl PromptAssembler {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Builds `1 + 2 * history.len() + 1` messages: system, each turn as user/assistant, then
    /// `user_input`. Empty input is forwarded as is.
    pub fn assemble<'a, I>(&self, history: I, user_input: &str) -> Vec<ChatMessage>
    where
        I: IntoIterator<Item = &'a Turn>,
    {
        let history = history.into_iter();
        let mut messages = Vec::with_capacity(2 + 2 * history.size_hint().0);
        messages.push(ChatMessage::system(self.system_instruction.as_str()));
        for turn in history {
            messages.push(ChatMessage::user(turn.user_input()));
            messages.push(ChatMessage::assistant(turn.model_output()));
        }
        messages.push(ChatMessage::user(user_input));
        messages
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_TUTOR_INSTRUCTION)
    }
}
