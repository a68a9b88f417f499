//! Search Service
//!
//! Business logic for looking up searches and recording analysis output.

use chrono::{DateTime, Utc};
use sift_core::domain::record::AnalysisRecord;
use sift_core::dto::search::{AttachAnalysis, CreateSearch};
use sqlx::PgPool;

use crate::repository::search_repository;

/// Attempts at finding a free session id within the same second
const MAX_ID_ATTEMPTS: u32 = 10;

/// Service error type
#[derive(Debug)]
pub enum SearchError {
    NotFound(String),
    ValidationError(String),
    /// Every candidate session id for this second is already taken
    IdExhausted(String),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for SearchError {
    fn from(err: sqlx::Error) -> Self {
        SearchError::DatabaseError(err)
    }
}

/// Get a search by session id
pub async fn get_search(pool: &PgPool, session_id: &str) -> Result<AnalysisRecord, SearchError> {
    validate_session_id(session_id)?;

    search_repository::find_by_id(pool, session_id)
        .await?
        .ok_or_else(|| SearchError::NotFound(session_id.to_string()))
}

/// Register a new search under a timestamp-derived session id
pub async fn create_search(pool: &PgPool, req: CreateSearch) -> Result<AnalysisRecord, SearchError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(SearchError::ValidationError(
            "query cannot be empty".to_string(),
        ));
    }

    let mut record = AnalysisRecord::new(String::new(), query);

    for attempt in 0..MAX_ID_ATTEMPTS {
        record.session_id = session_id_for(record.created_at, attempt);

        if search_repository::create(pool, &record).await? {
            tracing::info!("Search created: {}", record.session_id);
            return Ok(record);
        }
    }

    Err(SearchError::IdExhausted(session_id_for(record.created_at, 0)))
}

/// Attach analysis output to an existing search
pub async fn attach_analysis(
    pool: &PgPool,
    session_id: &str,
    req: AttachAnalysis,
) -> Result<AnalysisRecord, SearchError> {
    validate_session_id(session_id)?;

    if req.is_empty() {
        return Err(SearchError::ValidationError(
            "at least one analysis field is required".to_string(),
        ));
    }

    let record = search_repository::attach_analysis(pool, session_id, &req)
        .await?
        .ok_or_else(|| SearchError::NotFound(session_id.to_string()))?;

    tracing::info!(
        "Analysis attached to {} (complete: {})",
        session_id,
        record.is_complete()
    );

    Ok(record)
}

pub fn validate_session_id(session_id: &str) -> Result<(), SearchError> {
    if session_id.trim().is_empty() {
        return Err(SearchError::ValidationError(
            "session_id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Session ids have the form `YYYYmmdd_HHMMSS`, suffixed on collision
fn session_id_for(created_at: DateTime<Utc>, attempt: u32) -> String {
    let base = created_at.format("%Y%m%d_%H%M%S").to_string();
    if attempt == 0 {
        base
    } else {
        format!("{}_{}", base, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_id_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 19, 4, 11, 43).unwrap();
        assert_eq!(session_id_for(at, 0), "20250119_041143");
        assert_eq!(session_id_for(at, 2), "20250119_041143_2");
    }

    #[test]
    fn test_validate_session_id() {
        assert!(validate_session_id("20250119_041143").is_ok());
        assert!(matches!(
            validate_session_id("  "),
            Err(SearchError::ValidationError(_))
        ));
    }
}
