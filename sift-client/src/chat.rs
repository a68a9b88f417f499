//! Chat session endpoints
//!
//! The chat service runs the requirement-gathering conversation and issues
//! the session identifier that analysis records are keyed by.

use reqwest::Client;
use sift_core::dto::chat::{ChatMessageRequest, ChatMessageResponse, StartChatResponse};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{authorize, default_http_client, handle_response};

/// HTTP client for the chat session service
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl ChatClient {
    /// Create a new chat client with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, default_http_client())
    }

    /// Create a new chat client with a custom HTTP client
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

    /// Get the base URL of the chat service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open a new conversation
    ///
    /// # Returns
    /// The greeting and the freshly issued session identifier
    pub async fn start_chat(&self) -> Result<StartChatResponse> {
        let url = format!("{}/chat/start", self.base_url);
        let response = authorize(self.client.post(&url), self.token.as_deref())
            .send()
            .await?;

        let started: StartChatResponse = handle_response(response).await?;
        debug!("Started chat session {}", started.session_id);

        Ok(started)
    }

    /// Send a user message within a conversation
    ///
    /// # Arguments
    /// * `session_id` - Session returned by [`ChatClient::start_chat`]
    /// * `message` - The user's message
    pub async fn send_message(&self, session_id: &str, message: &str) -> Result<ChatMessageResponse> {
        if session_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "session_id cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/chat/message", self.base_url);
        let response = authorize(self.client.post(&url), self.token.as_deref())
            .json(&ChatMessageRequest {
                message: message.to_string(),
                session_id: session_id.to_string(),
            })
            .send()
            .await?;

        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn start() -> Json<Value> {
        Json(json!({
            "message": "Hello! What would you like to create an ad for?",
            "session_id": "20250119_041143",
            "is_complete": false
        }))
    }

    async fn message(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["session_id"] != "20250119_041143" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Invalid or missing session ID"})),
            );
        }

        (
            StatusCode::OK,
            Json(json!({
                "message": "[SUFFICIENT] reusable water bottle review",
                "is_complete": true,
                "session_id": "20250119_041143",
                "youtube_results": [
                    {"id": "abc", "title": "Top bottles", "link": "https://youtu.be/abc"}
                ],
                "processed": false
            })),
        )
    }

    async fn client() -> ChatClient {
        let router = Router::new()
            .route("/chat/start", post(start))
            .route("/chat/message", post(message));
        ChatClient::new(spawn_server(router).await)
    }

    #[tokio::test]
    async fn test_start_and_complete_conversation() {
        let client = client().await;

        let started = client.start_chat().await.unwrap();
        assert_eq!(started.session_id, "20250119_041143");
        assert!(!started.is_complete);

        let reply = client
            .send_message(&started.session_id, "a water bottle")
            .await
            .unwrap();
        assert!(reply.is_complete);
        let videos = reply.youtube_results.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].link, "https://youtu.be/abc");
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected() {
        let err = client().await.send_message("nope", "hi").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_chat_client_trims_trailing_slash() {
        let client = ChatClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
