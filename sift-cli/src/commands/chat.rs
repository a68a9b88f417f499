//! Chat command handlers
//!
//! Opens conversations with the chat service and relays messages. A
//! conversation that gathered enough information kicks off the analysis
//! pipeline for its session, which `sift watch` then follows.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use sift_core::dto::chat::ChatMessageResponse;

use crate::commands::watch::{WatchArgs, handle_watch_command};
use crate::config::Config;

/// Chat subcommands
#[derive(Subcommand)]
pub enum ChatCommands {
    /// Start a new conversation
    Start {
        /// Optional first message to send right away
        message: Option<String>,

        /// Watch the session once the conversation completes
        #[arg(short, long)]
        watch: bool,
    },
    /// Send a message within a conversation
    Send {
        /// Session identifier returned by `chat start`
        session_id: String,

        /// Message text
        message: String,

        /// Watch the session once the conversation completes
        #[arg(short, long)]
        watch: bool,
    },
}

/// Handle chat commands
pub async fn handle_chat_command(command: ChatCommands, config: &Config) -> Result<()> {
    let client = config.chat_client();

    let (reply, watch) = match command {
        ChatCommands::Start { message, watch } => {
            let started = client
                .start_chat()
                .await
                .context("Failed to start chat session")?;

            println!("{} {}", "Session:".bold(), started.session_id.cyan());
            print_bot_message(&started.message);

            let Some(message) = message else {
                return Ok(());
            };
            print_user_message(&message);
            let reply = client
                .send_message(&started.session_id, &message)
                .await
                .context("Failed to send message")?;
            (reply, watch)
        }
        ChatCommands::Send {
            session_id,
            message,
            watch,
        } => {
            let reply = client
                .send_message(&session_id, &message)
                .await
                .context("Failed to send message")?;
            (reply, watch)
        }
    };

    print_bot_message(&reply.message);

    if !reply.is_complete {
        return Ok(());
    }

    print_references(&reply);

    if watch {
        println!();
        handle_watch_command(WatchArgs::for_session(&reply.session_id), config).await
    } else {
        println!();
        println!(
            "{}",
            format!(
                "Analysis started. Run `sift watch {}` to follow it.",
                reply.session_id
            )
            .dimmed()
        );
        Ok(())
    }
}

fn print_bot_message(message: &str) {
    println!("  {} {}", "bot ›".green(), message);
}

fn print_user_message(message: &str) {
    println!("  {} {}", "you ›".cyan(), message);
}

/// Print the videos found for a completed conversation
fn print_references(reply: &ChatMessageResponse) {
    let Some(videos) = reply.youtube_results.as_ref().filter(|v| !v.is_empty()) else {
        return;
    };

    println!();
    println!("{}", format!("Found {} reference video(s):", videos.len()).bold());
    for video in videos {
        println!("  {} {}", "▸".cyan(), video.title);
        if !video.link.is_empty() {
            println!("    {}", video.link.dimmed());
        }
    }
}
