//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod chat;
mod get;
mod watch;

pub use chat::ChatCommands;
pub use watch::WatchArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Poll a session until its analysis is complete
    Watch(WatchArgs),
    /// Look up a session once
    Get {
        /// Session identifier
        session_id: String,
    },
    /// Chat session management
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Watch(args) => watch::handle_watch_command(args, config).await,
        Commands::Get { session_id } => get::handle_get_command(&session_id, config).await,
        Commands::Chat { command } => chat::handle_chat_command(command, config).await,
    }
}
