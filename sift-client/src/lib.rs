//! Sift HTTP Client
//!
//! Type-safe HTTP clients for the two services a Sift session talks to:
//! the lookup service that serves analysis records (`SiftClient`) and the
//! conversational service that issues session identifiers (`ChatClient`).
//!
//! Addresses and credentials are always supplied by the caller.
//!
//! # Example
//!
//! ```no_run
//! use sift_client::SiftClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sift_client::ClientError> {
//!     let client = SiftClient::new("http://localhost:3000");
//!
//!     let reply = client.lookup_session("20250119_041143").await?;
//!     println!("processed: {}", reply.processed);
//!     Ok(())
//! }
//! ```

mod chat;
pub mod error;
mod lookup;

// Re-export commonly used types
pub use chat::ChatClient;
pub use error::{ClientError, Result};
pub use sift_core::dto::lookup::LookupResponse;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request timeout applied by the default HTTP client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Sift lookup service
///
/// Covers record lookups (`/api/db`) and the search ingestion endpoints.
#[derive(Debug, Clone)]
pub struct SiftClient {
    /// Base URL of the lookup service (e.g., "http://localhost:3000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token sent with every request, if any
    token: Option<String>,
}

impl SiftClient {
    /// Create a new client with the default 10 second request timeout
    ///
    /// # Example
    /// ```
    /// use sift_client::SiftClient;
    ///
    /// let client = SiftClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, default_http_client())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the lookup service
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the lookup service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        authorize(request, self.token.as_deref())
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid_base =
            || ClientError::InvalidRequest(format!("invalid base URL: {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Builds the reqwest client used when the caller does not supply one
pub(crate) fn default_http_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
            Client::new()
        })
}

pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    let body = response.bytes().await?;

    serde_json::from_slice(&body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SiftClient::new("http://localhost:3000");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = SiftClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = SiftClient::with_client("http://localhost:3000", http_client);
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_client_with_token() {
        let client = SiftClient::new("http://localhost:3000").with_token("secret");
        assert_eq!(client.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = SiftClient::new("http://localhost:3000/prefix");
        let url = client.endpoint(&["api", "searches", "a/b?c", "analysis"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/prefix/api/searches/a%2Fb%3Fc/analysis"
        );
    }
}
