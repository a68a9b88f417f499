//! Watch command handler
//!
//! Runs the result poller for one session and renders each update until the
//! session completes, disappears, times out or the user presses Ctrl-C.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use sift_core::domain::poll::{PollState, PollStatus};
use sift_poller::{PollerConfig, ResultPoller};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::Config;
use crate::display::{colorize_status, print_analysis, print_header, print_update};

/// Arguments of `sift watch`
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Session identifier
    pub session_id: String,

    /// Seconds between lookups (overrides SIFT_POLL_INTERVAL)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Seconds a single lookup may take (overrides SIFT_REQUEST_TIMEOUT)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Give up after this many consecutive failed lookups (overrides SIFT_MAX_FAILURES)
    #[arg(long)]
    pub max_failures: Option<u32>,

    /// Give up after this many seconds without completion (overrides SIFT_MAX_DURATION)
    #[arg(long)]
    pub max_duration: Option<u64>,
}

impl WatchArgs {
    pub fn for_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            interval: None,
            timeout: None,
            max_failures: None,
            max_duration: None,
        }
    }

    /// Poller configuration from the environment, overridden by flags
    fn poller_config(&self) -> Result<PollerConfig> {
        let base =
            PollerConfig::from_env().context("Invalid poller configuration in environment")?;
        self.apply(base)
    }

    /// Overrides the given configuration with the flags that were set
    fn apply(&self, mut poller_config: PollerConfig) -> Result<PollerConfig> {
        if let Some(secs) = self.interval {
            poller_config.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout {
            poller_config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_failures {
            poller_config = poller_config.with_max_failures(max);
        }
        if let Some(secs) = self.max_duration {
            poller_config = poller_config.with_max_duration(Duration::from_secs(secs));
        }

        poller_config.validate()?;
        Ok(poller_config)
    }
}

/// Watch a session until it reaches a terminal status
pub async fn handle_watch_command(args: WatchArgs, config: &Config) -> Result<()> {
    let poller_config = args.poller_config()?;
    debug!("Poller configuration: {:?}", poller_config);

    let poller = ResultPoller::new(Arc::new(config.lookup_client()), poller_config);

    let (tx, mut rx) = mpsc::unbounded_channel::<(PollState, bool)>();
    let handle = poller.start(&args.session_id, move |state, complete| {
        let _ = tx.send((state.clone(), complete));
    })?;

    println!(
        "{}",
        format!("Watching session {} (Ctrl-C to stop)", args.session_id).bold()
    );

    let interrupt = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let mut last: Option<(PollState, bool)> = None;
    let mut render = |update: (PollState, bool)| {
        if last.as_ref() != Some(&update) {
            print_update(&update.0, update.1);
        }
        last = Some(update);
    };

    let status = loop {
        tokio::select! {
            Some(update) = rx.recv() => render(update),
            status = handle.wait() => break status,
        }
    };
    while let Ok(update) = rx.try_recv() {
        render(update);
    }

    println!();
    match status {
        PollStatus::Complete => {
            let state = handle.state();
            print_header(&state, true);
            print_analysis(&state);
            Ok(())
        }
        PollStatus::Cancelled => {
            println!("{}", "Stopped watching.".dimmed());
            Ok(())
        }
        PollStatus::NotFound => {
            anyhow::bail!(
                "No such session: {}. Check the session id and try again.",
                args.session_id
            )
        }
        PollStatus::Rejected => {
            anyhow::bail!(
                "The lookup service rejected session {}. Check --token and the session id.",
                args.session_id
            )
        }
        other => {
            anyhow::bail!(
                "Session {} did not complete: {}",
                args.session_id,
                colorize_status(other)
            )
        }
    }
}
