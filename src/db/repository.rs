//! Repository for symptom report database operations

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{NewSymptomReport, SymptomReport};
use super::DbError;

/// Repository for symptom report operations
#[derive(Clone)]
pub struct SymptomReportRepository {
    pool: SqlitePool,
}

impl SymptomReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new symptom report, returning its assigned id
    pub async fn insert(&self, report: NewSymptomReport) -> Result<i64, DbError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO symptom_reports (
                text, predicted_category, symptom, other_description, user_agent, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&report.text)
        .bind(&report.predicted_category)
        .bind(&report.symptom)
        .bind(&report.other_description)
        .bind(&report.user_agent)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id = id, "Stored symptom report");
        Ok(id)
    }

    /// List the most recent symptom reports, newest first
    pub async fn list(&self, limit: u32) -> Result<Vec<SymptomReport>, DbError> {
        let rows: Vec<SymptomReport> = sqlx::query_as(
            r#"
            SELECT id, text, predicted_category, symptom, other_description, user_agent, created_at
            FROM symptom_reports
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total number of stored symptom reports
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM symptom_reports")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init_schema};
    use tempfile::TempDir;

    async fn test_repository() -> (TempDir, SymptomReportRepository) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(dir.path()).await.unwrap();
        init_schema(&pool).await.unwrap();
        (dir, SymptomReportRepository::new(pool))
    }

    fn report(text: &str) -> NewSymptomReport {
        NewSymptomReport {
            text: text.to_string(),
            predicted_category: Some("Hardware".to_string()),
            symptom: Some("pc_no_enciende".to_string()),
            other_description: None,
            user_agent: Some("test-agent".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let (_dir, repo) = test_repository().await;

        let first = repo.insert(report("la impresora hace ruidos")).await.unwrap();
        let second = repo.insert(report("pantalla parpadea")).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_returns_newest_first_and_honors_limit() {
        let (_dir, repo) = test_repository().await;

        for text in ["primero", "segundo", "tercero"] {
            repo.insert(report(text)).await.unwrap();
        }

        let rows = repo.list(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "tercero");
        assert_eq!(rows[1].text, "segundo");
    }

    #[tokio::test]
    async fn test_count_tracks_inserts() {
        let (_dir, repo) = test_repository().await;

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(report("uno")).await.unwrap();
        repo.insert(report("dos")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_optional_fields_round_trip_as_null() {
        let (_dir, repo) = test_repository().await;

        repo.insert(NewSymptomReport {
            text: "sin contexto".to_string(),
            predicted_category: None,
            symptom: None,
            other_description: None,
            user_agent: None,
        })
        .await
        .unwrap();

        let rows = repo.list(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].predicted_category, None);
        assert_eq!(rows[0].user_agent, None);
    }
}
