//! Database models for symptom reports

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A stored "new symptom" submission
///
/// Users file these when none of the known symptom flags fits their problem;
/// the predicted category and symptom of the classification they were looking
/// at are stored alongside for later curation of the rule table.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct SymptomReport {
    pub id: i64,
    pub text: String,
    pub predicted_category: Option<String>,
    pub symptom: Option<String>,
    pub other_description: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields of a symptom report before it is assigned an id
#[derive(Debug, Clone)]
pub struct NewSymptomReport {
    pub text: String,
    pub predicted_category: Option<String>,
    pub symptom: Option<String>,
    pub other_description: Option<String>,
    pub user_agent: Option<String>,
}
