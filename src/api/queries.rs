//! REST API endpoints for the recorded query log

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{csv_document, html_table_page, ApiError};
use crate::app::AppState;
use crate::service::query_log::{QueryListItem, QueryMetrics, QueryPage, QuerySelection};

const DEFAULT_LIST_LIMIT: usize = 100;
const DEFAULT_EXPORT_LIMIT: usize = 1000;

const EXPORT_TITLE: &str = "Consultas realizadas";
const EXPORT_HEADERS: [&str; 4] = ["Fecha (UTC)", "Categoría", "Síntoma", "Regla"];
const CSV_HEADERS: [&str; 4] = ["timestamp", "category", "symptom", "rule_id"];

/// Query parameters for listing recorded queries
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQueriesParams {
    /// Maximum records returned (default: 100 for listings, 1000 for exports)
    pub limit: Option<usize>,
    /// Restrict to one UTC day (YYYY-MM-DD)
    pub date: Option<String>,
    /// Read every day file instead of just today's
    pub all: Option<bool>,
}

/// Query parameters selecting which day files to read
#[derive(Debug, Deserialize, IntoParams)]
pub struct QueryWindowParams {
    /// Restrict to one UTC day (YYYY-MM-DD)
    pub date: Option<String>,
    /// Operate on every day file
    pub all: Option<bool>,
}

/// Day files currently present
#[derive(Debug, Serialize, ToSchema)]
pub struct QueryFilesResponse {
    pub files: Vec<String>,
}

/// Outcome of a purge request
#[derive(Debug, Serialize, ToSchema)]
pub struct PurgeResponse {
    /// Number of day files removed.
    pub deleted: usize,
}

fn selection(date: Option<&str>, all: Option<bool>) -> Result<QuerySelection, ApiError> {
    Ok(QuerySelection::from_params(date, all.unwrap_or(false))?)
}

/// List recorded queries, newest first
#[utoipa::path(
    get,
    path = "/v1/queries",
    params(ListQueriesParams),
    responses(
        (status = 200, description = "Recorded queries", body = QueryPage),
        (status = 400, description = "Invalid date parameter")
    ),
    tag = "queries"
)]
#[get("/v1/queries")]
pub async fn list_queries(
    state: web::Data<AppState>,
    params: web::Query<ListQueriesParams>,
) -> Result<HttpResponse, ApiError> {
    let selection = selection(params.date.as_deref(), params.all)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let page = state.query_log.list(selection, limit)?;
    Ok(HttpResponse::Ok().json(page))
}

/// Aggregated per-category and per-symptom counts
#[utoipa::path(
    get,
    path = "/v1/queries/metrics",
    params(QueryWindowParams),
    responses(
        (status = 200, description = "Aggregated counts", body = QueryMetrics),
        (status = 400, description = "Invalid date parameter")
    ),
    tag = "queries"
)]
#[get("/v1/queries/metrics")]
pub async fn query_metrics(
    state: web::Data<AppState>,
    params: web::Query<QueryWindowParams>,
) -> Result<HttpResponse, ApiError> {
    let selection = selection(params.date.as_deref(), params.all)?;
    let metrics = state.query_log.metrics(selection)?;
    Ok(HttpResponse::Ok().json(metrics))
}

fn item_row(item: &QueryListItem) -> Vec<String> {
    vec![
        item.timestamp.clone().unwrap_or_default(),
        item.category.clone().unwrap_or_default(),
        item.symptom.clone().unwrap_or_default(),
        item.rule_id.clone().unwrap_or_default(),
    ]
}

fn export_page(state: &AppState, params: &ListQueriesParams) -> Result<QueryPage, ApiError> {
    let selection = selection(params.date.as_deref(), params.all)?;
    let limit = params.limit.unwrap_or(DEFAULT_EXPORT_LIMIT);
    Ok(state.query_log.list(selection, limit)?)
}

/// HTML export of recorded queries, suitable for print-to-PDF
#[utoipa::path(
    get,
    path = "/v1/queries/export/html",
    params(ListQueriesParams),
    responses(
        (status = 200, description = "HTML table of recorded queries", body = String, content_type = "text/html"),
        (status = 400, description = "Invalid date parameter")
    ),
    tag = "queries"
)]
#[get("/v1/queries/export/html")]
pub async fn export_queries_html(
    state: web::Data<AppState>,
    params: web::Query<ListQueriesParams>,
) -> Result<HttpResponse, ApiError> {
    let page = export_page(&state, &params)?;
    let rows: Vec<Vec<String>> = page.items.iter().map(item_row).collect();

    let html = html_table_page(EXPORT_TITLE, &EXPORT_HEADERS, &rows);
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// CSV export of recorded queries
#[utoipa::path(
    get,
    path = "/v1/queries/export/csv",
    params(ListQueriesParams),
    responses(
        (status = 200, description = "CSV file of recorded queries", body = String, content_type = "text/csv"),
        (status = 400, description = "Invalid date parameter")
    ),
    tag = "queries"
)]
#[get("/v1/queries/export/csv")]
pub async fn export_queries_csv(
    state: web::Data<AppState>,
    params: web::Query<ListQueriesParams>,
) -> Result<HttpResponse, ApiError> {
    let page = export_page(&state, &params)?;
    let rows: Vec<Vec<String>> = page.items.iter().map(item_row).collect();

    let csv = csv_document(&CSV_HEADERS, &rows);
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=queries.csv"))
        .body(csv))
}

/// List the day files backing the query log
#[utoipa::path(
    get,
    path = "/v1/queries/files",
    responses(
        (status = 200, description = "Available day files", body = QueryFilesResponse)
    ),
    tag = "queries"
)]
#[get("/v1/queries/files")]
pub async fn list_query_files(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let files = state.query_log.file_names()?;
    Ok(HttpResponse::Ok().json(QueryFilesResponse { files }))
}

/// Delete recorded queries by day file
///
/// Without parameters only today's file is removed; `all=true` wipes the
/// whole log.
#[utoipa::path(
    post,
    path = "/v1/queries/purge",
    params(QueryWindowParams),
    responses(
        (status = 200, description = "Purge outcome", body = PurgeResponse),
        (status = 400, description = "Invalid date parameter")
    ),
    tag = "queries"
)]
#[post("/v1/queries/purge")]
pub async fn purge_queries(
    state: web::Data<AppState>,
    params: web::Query<QueryWindowParams>,
) -> Result<HttpResponse, ApiError> {
    let selection = selection(params.date.as_deref(), params.all)?;
    let deleted = state.query_log.purge(selection)?;
    Ok(HttpResponse::Ok().json(PurgeResponse { deleted }))
}

/// Configure query log routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_queries)
        .service(query_metrics)
        .service(export_queries_html)
        .service(export_queries_csv)
        .service(list_query_files)
        .service(purge_queries);
}
