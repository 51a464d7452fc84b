//! # Tutor server
//!
//! HTTP chat backend for a beginner English tutor. A question arrives on `POST /ask`, the
//! session's recent turns are assembled into a prompt, an OpenAI-compatible model answers, and
//! the turn is recorded in a bounded per-session history.

pub mod chat;
pub mod cli;
pub mod config;
pub mod core;
pub mod http;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use chat::{ChatReply, ChatService};
pub use config::{ServerConfig, TutorConfig};
pub use crate::core::{init_tracing, Result, TutorError};
pub use http::{router, run_http, AskRequest, AskResponse, HttpOptions};
pub use runner::{build_chat_service, http_options, run_server};
