//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::classify::classify_ticket,
        crate::api::classify::classify_ticket_iterative,
        crate::api::queries::list_queries,
        crate::api::queries::query_metrics,
        crate::api::queries::export_queries_html,
        crate::api::queries::export_queries_csv,
        crate::api::queries::list_query_files,
        crate::api::queries::purge_queries,
        crate::api::feedback::submit_feedback,
        crate::api::feedback::feedback_metrics,
        crate::api::symptoms::submit_symptom_report,
        crate::api::symptoms::list_symptom_reports,
        crate::api::symptoms::export_symptom_reports_html,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        crate::model::triage::TicketFacts,
        crate::model::triage::RuleExplanation,
        crate::model::triage::ClassifyResponse,
        crate::model::triage::IterativeClassifyRequest,
        crate::model::triage::IterativeExplanation,
        crate::model::triage::IterativeClassifyResponse,
        crate::service::query_log::QueryListItem,
        crate::service::query_log::QueryPage,
        crate::service::query_log::QueryMetrics,
        crate::service::feedback::FeedbackMetrics,
        crate::db::models::SymptomReport,
        crate::api::queries::QueryFilesResponse,
        crate::api::queries::PurgeResponse,
        crate::api::feedback::FeedbackSavedResponse,
        crate::api::symptoms::SubmitSymptomReportRequest,
        crate::api::symptoms::SubmitSymptomReportResponse,
        crate::api::symptoms::SymptomReportsResponse,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus,
        crate::api::health::DependencyHealth,
    )),
    tags(
        (name = "tickets", description = "Ticket classification"),
        (name = "queries", description = "Recorded query log"),
        (name = "feedback", description = "User feedback on classifications"),
        (name = "symptom-reports", description = "Free-text symptom reports"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/yaml")
        .body(ApiDoc::openapi().to_yaml().unwrap())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_covers_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/v1/tickets/classify",
            "/v1/tickets/classify:iterative",
            "/v1/queries",
            "/v1/queries/metrics",
            "/v1/queries/export/html",
            "/v1/queries/export/csv",
            "/v1/queries/files",
            "/v1/queries/purge",
            "/v1/feedback",
            "/v1/feedback/metrics",
            "/v1/symptom-reports",
            "/v1/symptom-reports/export/html",
            "/health/live",
            "/health/ready",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[test]
    fn test_openapi_yaml_renders() {
        assert!(ApiDoc::openapi().to_yaml().is_ok());
    }
}
