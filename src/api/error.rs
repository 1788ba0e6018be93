//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use uuid::Uuid;

use crate::db::DbError;
use crate::service::feedback::FeedbackError;
use crate::service::query_log::QueryLogError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Log storage error (500)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Database(_) => "database_error",
            ApiError::Storage(_) => "storage_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<QueryLogError> for ApiError {
    fn from(err: QueryLogError) -> Self {
        match err {
            QueryLogError::InvalidDate(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Storage(err.to_string()),
        }
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        ApiError::Storage(err.to_string())
    }
}
