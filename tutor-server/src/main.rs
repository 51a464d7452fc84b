//! Binary for the tutor chat server.

use anyhow::Result;
use clap::Parser;
use tutor_server::{load_config, run_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let config = load_config(bind)?;
            run_server(config).await
        }
    }
}
