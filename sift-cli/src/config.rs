//! Configuration module
//!
//! Handles CLI configuration: service addresses and credentials.

use sift_client::{ChatClient, SiftClient};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the lookup service
    pub api_url: String,
    /// URL of the chat session service
    pub chat_url: String,
    /// Bearer token for both services
    pub token: Option<String>,
}

impl Config {
    /// Client for record lookups
    pub fn lookup_client(&self) -> SiftClient {
        let client = SiftClient::new(&self.api_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }

    /// Client for the chat session service
    pub fn chat_client(&self) -> ChatClient {
        let client = ChatClient::new(&self.chat_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }
}
