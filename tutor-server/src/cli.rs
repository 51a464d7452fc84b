//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::TutorConfig;

#[derive(Parser)]
#[command(name = "tutor")]
#[command(about = "English tutor chat server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (config from env; --bind overrides BIND_ADDR).
    Serve {
        #[arg(short, long)]
        bind: Option<String>,
    },
}

/// Load TutorConfig from environment. If `bind` is provided it overrides BIND_ADDR.
pub fn load_config(bind: Option<String>) -> Result<TutorConfig> {
    TutorConfig::load(bind)
}
