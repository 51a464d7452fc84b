//! # memory-core
//!
//! Conversation memory for the tutor service: [`Turn`], the bounded
//! [`ConversationBuffer`] (sliding window of the most recent K turns) and the
//! [`ConversationStore`] that keys buffers by session id.

mod buffer;
mod store;
mod types;

pub use buffer::{ConversationBuffer, DEFAULT_WINDOW};
pub use store::{ConversationStore, SessionHandle, DEFAULT_SESSION_ID};
pub use types::Turn;
