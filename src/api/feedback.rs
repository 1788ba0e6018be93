//! REST API endpoints for user feedback on classifications

use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::ApiError;
use crate::app::AppState;
use crate::service::feedback::FeedbackMetrics;

/// Acknowledgement of a stored feedback record
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackSavedResponse {
    pub saved: bool,
}

/// Store one feedback record
///
/// The body is any JSON object; the UI usually sends `predicted_category`,
/// `correct_category`, `symptom` and a free-text `observation`. It is stored
/// as-is with a source marker, nothing is validated beyond being an object.
#[utoipa::path(
    post,
    path = "/v1/feedback",
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackSavedResponse),
        (status = 400, description = "Body is not a JSON object")
    ),
    tag = "feedback"
)]
#[post("/v1/feedback")]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    state.feedback_log.append(body.into_inner())?;
    Ok(HttpResponse::Ok().json(FeedbackSavedResponse { saved: true }))
}

/// Agreement counts between predicted and corrected categories
#[utoipa::path(
    get,
    path = "/v1/feedback/metrics",
    responses(
        (status = 200, description = "Aggregated feedback counts", body = FeedbackMetrics)
    ),
    tag = "feedback"
)]
#[get("/v1/feedback/metrics")]
pub async fn feedback_metrics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let metrics = state.feedback_log.metrics()?;
    Ok(HttpResponse::Ok().json(metrics))
}

/// Configure feedback routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_feedback).service(feedback_metrics);
}
