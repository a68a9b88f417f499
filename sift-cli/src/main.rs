//! Sift CLI
//!
//! Command-line interface for starting analysis sessions and watching
//! their results arrive.

mod commands;
mod config;
mod display;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Sift analysis session CLI", long_about = None)]
struct Cli {
    /// Lookup service URL
    #[arg(long, env = "SIFT_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Chat session service URL
    #[arg(long, env = "SIFT_CHAT_URL", default_value = "http://localhost:8000")]
    chat_url: String,

    /// Bearer token sent to both services
    #[arg(long, env = "SIFT_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sift_cli=info,sift_poller=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        chat_url: cli.chat_url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
