use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // One row per session; analysis columns stay NULL until the pipeline fills them
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS searches (
            session_id VARCHAR(255) PRIMARY KEY,
            query TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            youtube_groq_analysis TEXT,
            reddit_groq_insight TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_searches_created_at ON searches(created_at DESC)")
        .execute(pool)
        .await?;

    Ok(())
}
