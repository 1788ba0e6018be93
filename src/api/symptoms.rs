//! REST API endpoints for free-text symptom reports

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{html_table_page, ApiError};
use crate::app::AppState;
use crate::db::models::{NewSymptomReport, SymptomReport};

const DEFAULT_LIST_LIMIT: u32 = 50;
const EXPORT_LIMIT: u32 = 1000;

const EXPORT_TITLE: &str = "Nuevos Síntomas";
const EXPORT_HEADERS: [&str; 6] = [
    "ID",
    "Texto",
    "Categoría predicha",
    "Síntoma",
    "Otra descripción",
    "Creado",
];

/// Body of a new symptom report
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitSymptomReportRequest {
    /// Free-text description of the unrecognized problem.
    pub text: String,
    /// Category the system predicted when the user gave up.
    pub predicted_category: Option<String>,
    /// Active symptom flag at the time, if any.
    pub symptom: Option<String>,
    /// The `otra_descripcion` text the user had typed, if any.
    pub other_description: Option<String>,
}

/// Acknowledgement with the new row id
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitSymptomReportResponse {
    pub saved: bool,
    pub id: i64,
}

/// Query parameters for listing symptom reports
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSymptomReportsParams {
    /// Maximum reports returned (default: 50)
    pub limit: Option<u32>,
}

/// A page of symptom reports plus the overall count
#[derive(Debug, Serialize, ToSchema)]
pub struct SymptomReportsResponse {
    pub items: Vec<SymptomReport>,
    pub total: i64,
}

/// Store a free-text symptom report
#[utoipa::path(
    post,
    path = "/v1/symptom-reports",
    request_body = SubmitSymptomReportRequest,
    responses(
        (status = 200, description = "Report stored", body = SubmitSymptomReportResponse),
        (status = 400, description = "Empty report text")
    ),
    tag = "symptom-reports"
)]
#[post("/v1/symptom-reports")]
pub async fn submit_symptom_report(
    state: web::Data<AppState>,
    request: HttpRequest,
    body: web::Json<SubmitSymptomReportRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let text = body.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest(
            "Symptom report text must not be empty".to_string(),
        ));
    }

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let id = state
        .symptom_reports
        .insert(NewSymptomReport {
            text: text.to_string(),
            predicted_category: body.predicted_category,
            symptom: body.symptom,
            other_description: body.other_description,
            user_agent,
        })
        .await?;

    Ok(HttpResponse::Ok().json(SubmitSymptomReportResponse { saved: true, id }))
}

/// List stored symptom reports, newest first
#[utoipa::path(
    get,
    path = "/v1/symptom-reports",
    params(ListSymptomReportsParams),
    responses(
        (status = 200, description = "Stored reports", body = SymptomReportsResponse)
    ),
    tag = "symptom-reports"
)]
#[get("/v1/symptom-reports")]
pub async fn list_symptom_reports(
    state: web::Data<AppState>,
    params: web::Query<ListSymptomReportsParams>,
) -> Result<HttpResponse, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let items = state.symptom_reports.list(limit).await?;
    let total = state.symptom_reports.count().await?;

    Ok(HttpResponse::Ok().json(SymptomReportsResponse { items, total }))
}

/// HTML export of symptom reports, suitable for print-to-PDF
#[utoipa::path(
    get,
    path = "/v1/symptom-reports/export/html",
    responses(
        (status = 200, description = "HTML table of stored reports", body = String, content_type = "text/html")
    ),
    tag = "symptom-reports"
)]
#[get("/v1/symptom-reports/export/html")]
pub async fn export_symptom_reports_html(
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let items = state.symptom_reports.list(EXPORT_LIMIT).await?;

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|report| {
            vec![
                report.id.to_string(),
                report.text.clone(),
                report.predicted_category.clone().unwrap_or_default(),
                report.symptom.clone().unwrap_or_default(),
                report.other_description.clone().unwrap_or_default(),
                report.created_at.to_rfc3339(),
            ]
        })
        .collect();

    let html = html_table_page(EXPORT_TITLE, &EXPORT_HEADERS, &rows);
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Configure symptom report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_symptom_report)
        .service(list_symptom_reports)
        .service(export_symptom_reports_html);
}
