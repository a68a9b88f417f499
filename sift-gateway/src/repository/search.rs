//! Search Repository
//!
//! Handles all database operations related to searches.

use sift_core::domain::record::AnalysisRecord;
use sift_core::dto::search::AttachAnalysis;
use sqlx::PgPool;

/// Insert a new search; returns false if the session id is already taken
pub async fn create(pool: &PgPool, record: &AnalysisRecord) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO searches (session_id, query, created_at, youtube_groq_analysis, reddit_groq_insight)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (session_id) DO NOTHING
        "#,
    )
    .bind(&record.session_id)
    .bind(&record.query)
    .bind(record.created_at)
    .bind(&record.youtube_analysis)
    .bind(&record.reddit_insight)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Find a search by session id
pub async fn find_by_id(pool: &PgPool, session_id: &str) -> Result<Option<AnalysisRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, SearchRow>(
        r#"
        SELECT session_id, query, created_at, youtube_groq_analysis, reddit_groq_insight
        FROM searches
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Attach analysis output; blank or missing values never clear stored ones
pub async fn attach_analysis(
    pool: &PgPool,
    session_id: &str,
    analysis: &AttachAnalysis,
) -> Result<Option<AnalysisRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, SearchRow>(
        r#"
        UPDATE searches
        SET youtube_groq_analysis = COALESCE(NULLIF($2, ''), youtube_groq_analysis),
            reddit_groq_insight = COALESCE(NULLIF($3, ''), reddit_groq_insight)
        WHERE session_id = $1
        RETURNING session_id, query, created_at, youtube_groq_analysis, reddit_groq_insight
        "#,
    )
    .bind(session_id)
    .bind(&analysis.youtube_analysis)
    .bind(&analysis.reddit_insight)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

#[derive(sqlx::FromRow)]
struct SearchRow {
    session_id: String,
    query: String,
    created_at: chrono::DateTime<chrono::Utc>,
    youtube_groq_analysis: Option<String>,
    reddit_groq_insight: Option<String>,
}

impl From<SearchRow> for AnalysisRecord {
    fn from(row: SearchRow) -> Self {
        AnalysisRecord {
            session_id: row.session_id,
            query: row.query,
            created_at: row.created_at,
            youtube_analysis: row.youtube_groq_analysis,
            reddit_insight: row.reddit_groq_insight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = SearchRow {
            session_id: "20250119_041143".to_string(),
            query: "eco bottle".to_string(),
            created_at: chrono::Utc::now(),
            youtube_groq_analysis: Some("yt".to_string()),
            reddit_groq_insight: None,
        };

        let record: AnalysisRecord = row.into();
        assert_eq!(record.session_id, "20250119_041143");
        assert_eq!(record.youtube_analysis.as_deref(), Some("yt"));
        assert!(!record.is_complete());
    }
}
