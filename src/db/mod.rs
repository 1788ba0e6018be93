//! Database module for SQLite persistence

pub mod models;
pub mod repository;

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Database file created inside the data directory.
pub const DB_FILE_NAME: &str = "data.db";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Create a new database connection pool
pub async fn create_pool(data_dir: &Path) -> Result<SqlitePool, DbError> {
    let db_path = data_dir.join(DB_FILE_NAME);

    tracing::debug!(path = %db_path.display(), "Opening SQLite database");

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(path = %db_path.display(), "SQLite connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS symptom_reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            predicted_category TEXT,
            symptom TEXT,
            other_description TEXT,
            user_agent TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_symptom_reports_created_at ON symptom_reports(created_at)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
