//! Result poller
//!
//! Polls the lookup collaborator for a session until its record is complete,
//! the session turns out not to exist, a stop bound is hit, or the caller
//! cancels. Each handle runs in its own task and owns its merge state.

use sift_core::domain::poll::{PartialRecord, PollState, PollStatus};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

use crate::config::PollerConfig;
use crate::lookup::{LookupError, RecordLookup};

/// Errors returned when starting a poll
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("session_id cannot be empty")]
    EmptySessionId,
}

type UpdateFn = Box<dyn FnMut(&PollState, bool) + Send>;

/// State guarded by the handle lock
///
/// Emitting an update and cancelling both take this lock, so no update can
/// be delivered once `cancel` has returned.
struct Shared {
    status: PollStatus,
    state: PollState,
    on_update: UpdateFn,
}

/// Handle to a running poll
///
/// Cloning yields another handle to the same poll.
#[derive(Clone)]
pub struct PollHandle {
    session_id: Arc<str>,
    shared: Arc<Mutex<Shared>>,
    status_tx: Arc<watch::Sender<PollStatus>>,
}

impl PollHandle {
    /// Session this handle polls for
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current status
    pub fn status(&self) -> PollStatus {
        *self.status_tx.borrow()
    }

    /// Snapshot of the merged state
    pub fn state(&self) -> PollState {
        lock(&self.shared).state.clone()
    }

    /// Stops all further lookups and updates
    ///
    /// Idempotent; a no-op once the handle reached any terminal status.
    /// Must not be called from inside the handle's own update callback.
    pub fn cancel(&self) {
        let mut shared = lock(&self.shared);
        if transition(&mut shared, &self.status_tx, PollStatus::Cancelled) {
            info!("Cancelled polling for session {}", self.session_id);
        }
    }

    /// Waits until the handle reaches a terminal status and returns it
    pub async fn wait(&self) -> PollStatus {
        let mut rx = self.status_tx.subscribe();
        stopped(&mut rx).await;
        self.status()
    }
}

impl std::fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandle")
            .field("session_id", &self.session_id)
            .field("status", &self.status())
            .finish()
    }
}

/// Polls a record lookup for eventually-complete analysis results
pub struct ResultPoller {
    lookup: Arc<dyn RecordLookup>,
    config: PollerConfig,
}

impl ResultPoller {
    /// Creates a poller over an injected lookup collaborator
    pub fn new(lookup: Arc<dyn RecordLookup>, config: PollerConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Starts polling for a session
    ///
    /// Performs a lookup immediately, then one lookup per `interval` after the
    /// previous one finished. `on_update` receives the merged state and the
    /// completeness flag after every successful lookup. It runs while the
    /// handle lock is held and must not call back into the handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&self, session_id: &str, on_update: F) -> Result<PollHandle, PollError>
    where
        F: FnMut(&PollState, bool) + Send + 'static,
    {
        if session_id.is_empty() {
            return Err(PollError::EmptySessionId);
        }

        let (status_tx, _) = watch::channel(PollStatus::Idle);
        let handle = PollHandle {
            session_id: Arc::from(session_id),
            shared: Arc::new(Mutex::new(Shared {
                status: PollStatus::Idle,
                state: PollState::new(session_id),
                on_update: Box::new(on_update),
            })),
            status_tx: Arc::new(status_tx),
        };

        transition(&mut lock(&handle.shared), &handle.status_tx, PollStatus::Polling);
        info!(
            "Polling session {} (interval: {:?})",
            session_id, self.config.interval
        );

        let task = PollTask {
            handle: handle.clone(),
            lookup: Arc::clone(&self.lookup),
            config: self.config.clone(),
        };
        tokio::spawn(task.run());

        Ok(handle)
    }

    /// Cancels a handle; see [`PollHandle::cancel`]
    pub fn cancel(&self, handle: &PollHandle) {
        handle.cancel();
    }
}

/// Single logical timeline of one handle
struct PollTask {
    handle: PollHandle,
    lookup: Arc<dyn RecordLookup>,
    config: PollerConfig,
}

impl PollTask {
    async fn run(self) {
        let session_id = self.handle.session_id.clone();
        let mut status_rx = self.handle.status_tx.subscribe();
        let started = Instant::now();
        let mut failures: u32 = 0;

        loop {
            debug!("Looking up session {}", session_id);

            let outcome = tokio::select! {
                _ = stopped(&mut status_rx) => return,
                outcome = time::timeout(self.config.request_timeout, self.lookup.lookup(&session_id)) => outcome,
            };

            match outcome {
                Ok(Ok(reply)) => {
                    failures = 0;
                    if reply.processed {
                        debug!("Session {} reported as processed", session_id);
                    }
                    if self.apply(reply.into_partial()) {
                        return;
                    }
                }
                Ok(Err(LookupError::NotFound(msg))) => {
                    warn!("Session {} not found: {}", session_id, msg);
                    self.finish(PollStatus::NotFound);
                    return;
                }
                Ok(Err(LookupError::Rejected(msg))) => {
                    error!("Lookup for session {} rejected: {}", session_id, msg);
                    self.finish(PollStatus::Rejected);
                    return;
                }
                Ok(Err(LookupError::Transient(msg))) => {
                    failures += 1;
                    warn!("Lookup for session {} failed: {}", session_id, msg);
                }
                Ok(Err(LookupError::Malformed(msg))) => {
                    failures += 1;
                    error!("Malformed lookup response for session {}: {}", session_id, msg);
                }
                Err(_) => {
                    failures += 1;
                    warn!(
                        "Lookup for session {} timed out after {:?}",
                        session_id, self.config.request_timeout
                    );
                }
            }

            if self
                .config
                .max_consecutive_failures
                .is_some_and(|max| failures >= max)
            {
                warn!(
                    "Giving up on session {} after {} consecutive failures",
                    session_id, failures
                );
                self.finish(PollStatus::TimedOut);
                return;
            }

            if self
                .config
                .max_duration
                .is_some_and(|max| started.elapsed() >= max)
            {
                warn!(
                    "Giving up on session {} after {:?}",
                    session_id,
                    started.elapsed()
                );
                self.finish(PollStatus::TimedOut);
                return;
            }

            tokio::select! {
                _ = stopped(&mut status_rx) => return,
                _ = time::sleep(self.config.interval) => {}
            }
        }
    }

    /// Merges a reply and reports it; returns true once the handle is terminal
    fn apply(&self, partial: PartialRecord) -> bool {
        let mut guard = lock(&self.handle.shared);
        if guard.status.is_terminal() {
            debug!(
                "Discarding lookup result for finished session {}",
                self.handle.session_id
            );
            return true;
        }

        let shared = &mut *guard;
        shared.state.merge(partial);
        let complete = shared.state.is_complete();
        (shared.on_update)(&shared.state, complete);

        if complete {
            transition(shared, &self.handle.status_tx, PollStatus::Complete);
            info!("Session {} complete", self.handle.session_id);
        }

        complete
    }

    fn finish(&self, status: PollStatus) {
        transition(&mut lock(&self.handle.shared), &self.handle.status_tx, status);
    }
}

/// Resolves once the status is terminal
async fn stopped(status_rx: &mut watch::Receiver<PollStatus>) {
    let _ = status_rx.wait_for(|status| status.is_terminal()).await;
}

/// Applies a status change if the status machine allows it
fn transition(shared: &mut Shared, status_tx: &watch::Sender<PollStatus>, next: PollStatus) -> bool {
    if !shared.status.can_transition_to(next) {
        return false;
    }
    shared.status = next;
    status_tx.send_replace(next);
    true
}

/// A panicking update callback poisons the lock; the state itself is still
/// consistent, so recover it rather than propagating the panic.
fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
