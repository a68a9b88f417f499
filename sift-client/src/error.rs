//! Client errors
//!
//! Every failure of a lookup or chat call lands in [`ClientError`]. Callers
//! that retry (the result poller) only need [`ClientError::is_not_found`] and
//! [`ClientError::is_retryable`] to decide whether another attempt makes sense.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connect, timeout or body read
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the raw body the service sent back
    #[error("service replied {status}: {message}")]
    ApiError { status: u16, message: String },

    /// 2xx reply whose body is not the expected JSON shape
    #[error("unexpected response body: {0}")]
    ParseError(String),

    /// The service has no record for the requested session
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected locally before anything was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || self.status() == Some(404)
    }

    /// Whether repeating the same request later may succeed
    ///
    /// Only transport failures, `5xx`, `408 Request Timeout` and
    /// `429 Too Many Requests` qualify. Any other `4xx` means the request or
    /// its credentials are wrong and will be refused again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) => self.status().is_none_or(is_retryable_status),
            Self::ApiError { status, .. } => is_retryable_status(*status),
            Self::ParseError(_) | Self::NotFound(_) | Self::InvalidRequest(_) => false,
        }
    }
}

fn is_retryable_status(status: u16) -> bool {
    status >= 500 || status == 408 || status == 429
}
