//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use sqlx::SqlitePool;

use crate::db::repository::SymptomReportRepository;
use crate::model::Config;
use crate::service::{FeedbackLog, QueryLog, TriageService};

/// Application state containing all services and shared resources
///
/// This struct centralizes service initialization and makes it easy to inject
/// dependencies into Actix-web handlers.
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,
    /// Rule-based classification service
    pub triage: TriageService,
    /// Append-only query log with daily rotation
    pub query_log: QueryLog,
    /// Append-only user feedback log
    pub feedback_log: FeedbackLog,
    /// Symptom report persistence
    pub symptom_reports: SymptomReportRepository,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Data directory creation
    /// 2. Database connection and schema initialization
    /// 3. Knowledge base loading and validation
    /// 4. Log file preparation (touch plus legacy cleanup)
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| AppError::DataDir(config.data_dir.display().to_string(), e.to_string()))?;

        let db_pool = crate::db::create_pool(&config.data_dir)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let triage = TriageService::new().map_err(|e| AppError::Knowledge(e.to_string()))?;

        let query_log =
            QueryLog::open(&config.data_dir).map_err(|e| AppError::LogInit(e.to_string()))?;
        let feedback_log =
            FeedbackLog::open(&config.data_dir).map_err(|e| AppError::LogInit(e.to_string()))?;

        let symptom_reports = SymptomReportRepository::new(db_pool.clone());

        tracing::info!(data_dir = %config.data_dir.display(), "Application state initialized");

        Ok(Self {
            db_pool,
            triage,
            query_log,
            feedback_log,
            symptom_reports,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Data directory could not be created
    #[error("Data directory '{0}' could not be created: {1}")]
    DataDir(String, String),

    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Knowledge base failed validation
    #[error("Knowledge base failed validation: {0}")]
    Knowledge(String),

    /// Log file preparation failed
    #[error("Log file preparation failed: {0}")]
    LogInit(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::CorsConfig;

    #[tokio::test]
    async fn test_app_state_initializes_in_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: dir.path().join("data"),
            cors: CorsConfig::default(),
        };

        let state = AppState::new(&config).await.unwrap();

        assert!(config.data_dir.join("data.db").exists());
        assert!(config.data_dir.join("feedback.jsonl").exists());
        // Today's query file is touched on startup.
        assert_eq!(state.query_log.file_names().unwrap().len(), 1);
    }
}
