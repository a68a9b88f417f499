//! Poll domain types
//!
//! The accumulated, client-side view of a record that is still being
//! produced, and the status machine of a single polling handle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::record::is_present;

/// Subset of record fields carried by a single lookup response
///
/// Any field may be absent. Absent fields carry no information and must
/// never erase what a previous response already delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRecord {
    pub query: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub youtube_analysis: Option<String>,
    pub reddit_insight: Option<String>,
}

/// Accumulated record state for one session
///
/// Owned exclusively by one poll handle. Updated field-wise on every
/// successful lookup; fields are only ever added or refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollState {
    pub session_id: String,
    pub query: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub youtube_analysis: Option<String>,
    pub reddit_insight: Option<String>,
}

impl PollState {
    /// Creates an empty state for a session
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    /// Merges a partial record into the accumulated state
    ///
    /// Present incoming values overwrite; absent or empty ones are ignored.
    /// Returns whether any field changed.
    pub fn merge(&mut self, partial: PartialRecord) -> bool {
        let mut changed = false;
        changed |= merge_text(&mut self.query, partial.query);
        changed |= merge_field(&mut self.created_at, partial.created_at);
        changed |= merge_text(&mut self.youtube_analysis, partial.youtube_analysis);
        changed |= merge_text(&mut self.reddit_insight, partial.reddit_insight);
        changed
    }

    /// Both analysis channels have been delivered
    pub fn is_complete(&self) -> bool {
        is_present(&self.youtube_analysis) && is_present(&self.reddit_insight)
    }
}

fn merge_text(slot: &mut Option<String>, incoming: Option<String>) -> bool {
    merge_field(slot, incoming.filter(|value| !value.is_empty()))
}

fn merge_field<T: PartialEq>(slot: &mut Option<T>, incoming: Option<T>) -> bool {
    match incoming {
        Some(value) if slot.as_ref() != Some(&value) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// Status of a poll handle
///
/// Every status except `Idle` and `Polling` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PollStatus {
    Idle,
    Polling,
    Complete,
    Cancelled,
    NotFound,
    Rejected,
    TimedOut,
}

impl PollStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PollStatus::Idle | PollStatus::Polling)
    }

    /// Whether the status machine allows moving from `self` to `next`
    pub fn can_transition_to(self, next: PollStatus) -> bool {
        match self {
            PollStatus::Idle => next == PollStatus::Polling,
            PollStatus::Polling => next != PollStatus::Idle,
            _ => false,
        }
    }
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PollStatus::Idle => "idle",
            PollStatus::Polling => "polling",
            PollStatus::Complete => "complete",
            PollStatus::Cancelled => "cancelled",
            PollStatus::NotFound => "not found",
            PollStatus::Rejected => "rejected",
            PollStatus::TimedOut => "timed out",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(yt: Option<&str>, reddit: Option<&str>) -> PartialRecord {
        PartialRecord {
            youtube_analysis: yt.map(str::to_string),
            reddit_insight: reddit.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_never_erases_present_fields() {
        let mut state = PollState::new("S1");
        state.merge(partial(Some("yt-analysis"), None));
        state.merge(partial(None, None));
        state.merge(partial(Some(""), None));

        assert_eq!(state.youtube_analysis.as_deref(), Some("yt-analysis"));
        assert_eq!(state.reddit_insight, None);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let responses = [
            partial(None, None),
            partial(Some("yt-analysis"), None),
            partial(None, Some("reddit-insight")),
            partial(Some("yt-analysis"), Some("reddit-insight")),
        ];

        let mut forward = PollState::new("S1");
        for r in responses.iter().cloned() {
            forward.merge(r);
        }

        let mut backward = PollState::new("S1");
        for r in responses.iter().rev().cloned() {
            backward.merge(r);
        }

        assert_eq!(forward, backward);
        assert!(forward.is_complete());
    }

    #[test]
    fn test_merge_reports_changes() {
        let mut state = PollState::new("S1");
        assert!(!state.merge(partial(None, None)));
        assert!(state.merge(partial(Some("yt"), None)));
        assert!(!state.merge(partial(Some("yt"), None)));
    }

    #[test]
    fn test_completeness_is_monotonic_under_merge() {
        let mut state = PollState::new("S1");
        state.merge(partial(Some("a"), Some("b")));
        assert!(state.is_complete());

        state.merge(partial(None, None));
        state.merge(partial(Some(""), Some("")));
        assert!(state.is_complete());
    }

    #[test]
    fn test_status_transitions() {
        assert!(PollStatus::Idle.can_transition_to(PollStatus::Polling));
        assert!(!PollStatus::Idle.can_transition_to(PollStatus::Complete));

        assert!(PollStatus::Polling.can_transition_to(PollStatus::Polling));
        assert!(PollStatus::Polling.can_transition_to(PollStatus::Complete));
        assert!(PollStatus::Polling.can_transition_to(PollStatus::Cancelled));
        assert!(PollStatus::Polling.can_transition_to(PollStatus::NotFound));
        assert!(PollStatus::Polling.can_transition_to(PollStatus::Rejected));
        assert!(PollStatus::Polling.can_transition_to(PollStatus::TimedOut));
        assert!(!PollStatus::Polling.can_transition_to(PollStatus::Idle));

        for terminal in [
            PollStatus::Complete,
            PollStatus::Cancelled,
            PollStatus::NotFound,
            PollStatus::Rejected,
            PollStatus::TimedOut,
        ] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(PollStatus::Polling));
            assert!(!terminal.can_transition_to(PollStatus::Cancelled));
        }
    }
}
