//! Lookup service endpoints

use sift_core::domain::record::AnalysisRecord;
use sift_core::dto::lookup::{LookupRequest, LookupResponse};
use sift_core::dto::search::{AttachAnalysis, CreateSearch};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{SiftClient, handle_response};

impl SiftClient {
    // =============================================================================
    // Record Lookup
    // =============================================================================

    /// Look up the analysis record of a session
    ///
    /// # Arguments
    /// * `session_id` - The session identifier issued by the chat service
    ///
    /// # Returns
    /// The record as currently known, possibly without analysis output.
    /// A `404` from the service is reported as [`ClientError::NotFound`].
    pub async fn lookup_session(&self, session_id: &str) -> Result<LookupResponse> {
        if session_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "session_id cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/api/db", self.base_url);
        debug!("Looking up session {}", session_id);

        let response = self
            .authorize(self.client.post(&url))
            .json(&LookupRequest {
                session_id: session_id.to_string(),
            })
            .send()
            .await?;

        handle_response(response).await.map_err(|e| {
            if e.is_not_found() {
                ClientError::NotFound(format!("session {}", session_id))
            } else {
                e
            }
        })
    }

    // =============================================================================
    // Search Ingestion
    // =============================================================================

    /// Register a new search and return the stored record
    pub async fn create_search(&self, req: CreateSearch) -> Result<AnalysisRecord> {
        let url = format!("{}/api/searches", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&req)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Attach analysis output to an existing search
    ///
    /// # Arguments
    /// * `session_id` - The session the search belongs to
    /// * `req` - Output for one or both analysis channels
    pub async fn attach_analysis(
        &self,
        session_id: &str,
        req: AttachAnalysis,
    ) -> Result<AnalysisRecord> {
        if session_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "session_id cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["api", "searches", session_id, "analysis"])?;
        let response = self
            .authorize(self.client.put(url))
            .json(&req)
            .send()
            .await?;

        handle_response(response).await
    }
}
