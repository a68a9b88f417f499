//! Record lookup seam
//!
//! The poller only ever reads through this trait, which keeps the HTTP
//! transport replaceable in tests and in other front ends.

use async_trait::async_trait;
use sift_client::{ClientError, SiftClient};
use sift_core::dto::lookup::LookupResponse;
use thiserror::Error;

/// Outcome classes of a failed lookup
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The session has no record. Terminal for a poll handle.
    #[error("session not found: {0}")]
    NotFound(String),

    /// The service refused the request (bad credentials, invalid id).
    /// Terminal, since the same request will be refused again.
    #[error("lookup rejected: {0}")]
    Rejected(String),

    /// Network or server failure; the next tick may succeed
    #[error("transient lookup failure: {0}")]
    Transient(String),

    /// The reply did not have the expected shape
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// Source of analysis records keyed by session identifier
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Fetches the current, possibly partial, record of a session
    async fn lookup(&self, session_id: &str) -> Result<LookupResponse, LookupError>;
}

#[async_trait]
impl RecordLookup for SiftClient {
    async fn lookup(&self, session_id: &str) -> Result<LookupResponse, LookupError> {
        self.lookup_session(session_id)
            .await
            .map_err(LookupError::from)
    }
}

impl From<ClientError> for LookupError {
    fn from(err: ClientError) -> Self {
        match err {
            e if e.is_not_found() => LookupError::NotFound(e.to_string()),
            ClientError::ParseError(msg) => LookupError::Malformed(msg),
            e if e.is_retryable() => LookupError::Transient(e.to_string()),
            e => LookupError::Rejected(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(matches!(
            LookupError::from(ClientError::api_error(404, "Document not found")),
            LookupError::NotFound(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::NotFound("session S2".to_string())),
            LookupError::NotFound(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::api_error(500, "Internal server error")),
            LookupError::Transient(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::ParseError("expected struct".to_string())),
            LookupError::Malformed(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::api_error(429, "slow down")),
            LookupError::Transient(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::api_error(401, "Unauthorized")),
            LookupError::Rejected(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::api_error(400, "session_id cannot be empty")),
            LookupError::Rejected(_)
        ));
        assert!(matches!(
            LookupError::from(ClientError::InvalidRequest("empty".to_string())),
            LookupError::Rejected(_)
        ));
    }
}
