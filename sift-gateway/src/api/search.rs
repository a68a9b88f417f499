//! Search API Handlers
//!
//! The record lookup polled by clients, plus ingestion endpoints used by
//! the analysis pipeline.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sift_core::domain::record::AnalysisRecord;
use sift_core::dto::lookup::{LookupRequest, LookupResponse};
use sift_core::dto::search::{AttachAnalysis, CreateSearch};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::service::search_service;

/// POST /api/db
/// Look up the record of a session
///
/// The reply carries `processed` (both analysis channels present) and
/// `_polling`, its negation, for clients that poll until completion.
pub async fn lookup(
    State(pool): State<PgPool>,
    Json(req): Json<LookupRequest>,
) -> ApiResult<Json<LookupResponse>> {
    tracing::debug!("Polling for session: {}", req.session_id);

    let record = search_service::get_search(&pool, &req.session_id).await?;

    Ok(Json(LookupResponse::from(record)))
}

/// POST /api/searches
/// Register a new search
pub async fn create_search(
    State(pool): State<PgPool>,
    Json(req): Json<CreateSearch>,
) -> ApiResult<(StatusCode, Json<AnalysisRecord>)> {
    tracing::info!("Creating search for query: {}", req.query);

    let record = search_service::create_search(&pool, req).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/searches/{id}/analysis
/// Attach analysis output to a search
pub async fn attach_analysis(
    State(pool): State<PgPool>,
    Path(session_id): Path<String>,
    Json(req): Json<AttachAnalysis>,
) -> ApiResult<Json<AnalysisRecord>> {
    tracing::debug!("Attaching analysis to session: {}", session_id);

    let record = search_service::attach_analysis(&pool, &session_id, req).await?;

    Ok(Json(record))
}
