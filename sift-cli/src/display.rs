//! Terminal rendering of session state

use colored::*;
use sift_core::domain::poll::{PollState, PollStatus};
use sift_core::domain::record::is_present;

/// Print the session summary block
pub fn print_header(state: &PollState, complete: bool) {
    println!("{}", "Session:".bold());
    println!("  ID:       {}", state.session_id.cyan());
    if let Some(query) = &state.query {
        println!("  Query:    \"{}\"", query);
    }
    if let Some(created_at) = state.created_at {
        println!(
            "  Created:  {}",
            created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!("  Status:   {}", progress_label(complete));
    println!("  YouTube:  {}", channel_label(&state.youtube_analysis));
    println!("  Reddit:   {}", channel_label(&state.reddit_insight));
}

/// Print one line per poll update
pub fn print_update(state: &PollState, complete: bool) {
    println!(
        "  {} {}  youtube: {}  reddit: {}",
        "▸".cyan(),
        progress_label(complete),
        channel_label(&state.youtube_analysis),
        channel_label(&state.reddit_insight)
    );
}

/// Print both analysis channels in full
pub fn print_analysis(state: &PollState) {
    for (title, body) in [
        ("YouTube Analysis", &state.youtube_analysis),
        ("Reddit Analysis", &state.reddit_insight),
    ] {
        println!();
        println!("{}", title.bold());
        println!("{}", "─".repeat(80).dimmed());
        println!("{}", body.as_deref().unwrap_or_default());
        println!("{}", "─".repeat(80).dimmed());
    }
}

pub fn progress_label(complete: bool) -> ColoredString {
    if complete {
        "Completed".green()
    } else {
        "Processing...".yellow()
    }
}

fn channel_label(field: &Option<String>) -> ColoredString {
    if is_present(field) {
        "ready".green()
    } else {
        "pending".dimmed()
    }
}

/// Colorize poll status for display
pub fn colorize_status(status: PollStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        PollStatus::Idle | PollStatus::Polling => label.yellow(),
        PollStatus::Complete => label.green(),
        PollStatus::Cancelled => label.dimmed(),
        PollStatus::NotFound | PollStatus::Rejected | PollStatus::TimedOut => label.red(),
    }
}
