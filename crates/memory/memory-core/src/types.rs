//! # Core Types
//!
//! ## Turn
//!
//! One exchange in a conversation: what the user said and what the model
//! answered. A turn is only created once the model reply exists.

use serde::{Deserialize, Serialize};

/// One user-input / model-output pair. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    user_input: String,
    model_output: String,
}

impl Turn {
    /// Creates a turn from the user's message and the model's reply.
    pub fn new(user_input: impl Into<String>, model_output: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            model_output: model_output.into(),
        }
    }

    /// The message the user sent.
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    /// The reply the model produced for [`Self::user_input`].
    pub fn model_output(&self) -> &str {
        &self.model_output
    }
}
