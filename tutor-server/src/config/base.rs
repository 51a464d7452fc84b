//! Base config: HTTP listener, logging, static page, conversation window. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use memory_core::DEFAULT_WINDOW;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_FILE: &str = "logs/tutor-server.log";
pub const DEFAULT_INDEX_HTML_PATH: &str = "public/index.html";
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 3600;
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Largest accepted HISTORY_WINDOW.
pub const MAX_HISTORY_WINDOW: usize = 100;

/// Server-side settings that are not about the model.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// BIND_ADDR (CLI `--bind` overrides)
    pub bind_addr: String,
    /// LOG_FILE
    pub log_file: String,
    /// LOG_LEVEL: tracing filter directive used when RUST_LOG is unset
    pub log_level: String,
    /// INDEX_HTML_PATH, served on `GET /`
    pub index_html_path: PathBuf,
    /// HISTORY_WINDOW: turns kept per conversation (K)
    pub history_window: usize,
    /// SESSION_IDLE_TTL_SECS: idle conversations older than this are dropped
    pub session_idle_ttl_secs: u64,
    /// DEBUG_ENDPOINT: expose `GET /debug`
    pub debug_endpoint: bool,
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// Load from environment variables. `bind_addr` overrides BIND_ADDR if provided.
    pub fn load(bind_addr: Option<String>) -> Result<Self> {
        let bind_addr = bind_addr
            .or_else(|| env::var("BIND_ADDR").ok())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        let index_html_path = env::var("INDEX_HTML_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_INDEX_HTML_PATH));
        let history_window = parse_env("HISTORY_WINDOW", DEFAULT_WINDOW)?;
        let session_idle_ttl_secs =
            parse_env("SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL_SECS)?;
        let debug_endpoint = parse_env("DEBUG_ENDPOINT", true)?;

        Ok(Self {
            bind_addr,
            log_file,
            log_level,
            index_html_path,
            history_window,
            session_idle_ttl_secs,
            debug_endpoint,
        })
    }

    /// Validate config: bind address must be `host:port`, the window within 1..=MAX_HISTORY_WINDOW,
    /// the idle TTL non-zero and LOG_LEVEL a valid filter directive.
    pub fn validate(&self) -> Result<()> {
        if SocketAddr::from_str(&self.bind_addr).is_err() {
            anyhow::bail!("BIND_ADDR is not a valid socket address: {}", self.bind_addr);
        }
        if !(1..=MAX_HISTORY_WINDOW).contains(&self.history_window) {
            anyhow::bail!(
                "HISTORY_WINDOW must be between 1 and {}, got {}",
                MAX_HISTORY_WINDOW,
                self.history_window
            );
        }
        if self.session_idle_ttl_secs == 0 {
            anyhow::bail!("SESSION_IDLE_TTL_SECS must be at least 1");
        }
        if EnvFilter::try_new(&self.log_level).is_err() {
            anyhow::bail!("LOG_LEVEL is not a valid filter: {}", self.log_level);
        }
        Ok(())
    }
}
