//! Get command handler
//!
//! Performs a single lookup and prints whatever the service knows so far.

use anyhow::{Context, Result};
use colored::*;
use sift_core::domain::poll::PollState;

use crate::config::Config;
use crate::display::{print_analysis, print_header};

/// Look up a session once
pub async fn handle_get_command(session_id: &str, config: &Config) -> Result<()> {
    let client = config.lookup_client();

    let reply = match client.lookup_session(session_id).await {
        Ok(reply) => reply,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("No such session: {}", session_id);
        }
        Err(e) => return Err(e).context("Failed to look up session"),
    };

    let mut state = PollState::new(session_id);
    state.merge(reply.into_partial());

    print_header(&state, state.is_complete());
    if state.is_complete() {
        print_analysis(&state);
    } else {
        println!();
        println!(
            "{}",
            format!("Still processing. Run `sift watch {}` to wait for it.", session_id).dimmed()
        );
    }

    Ok(())
}
