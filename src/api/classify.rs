//! REST API endpoints for ticket classification

use actix_web::{post, web, HttpResponse, Responder};

use crate::app::AppState;
use crate::model::triage::{
    ClassifyResponse, IterativeClassifyRequest, IterativeClassifyResponse, TicketFacts,
};
use crate::service::query_log::QueryRecord;

/// Classify a ticket from its symptom flags
#[utoipa::path(
    post,
    path = "/v1/tickets/classify",
    request_body = TicketFacts,
    responses(
        (status = 200, description = "Ticket classified", body = ClassifyResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "tickets"
)]
#[post("/v1/tickets/classify")]
pub async fn classify_ticket(
    state: web::Data<AppState>,
    facts: web::Json<TicketFacts>,
) -> impl Responder {
    let response = state.triage.classify(&facts);

    // Recording is best-effort; a log failure never blocks the answer.
    let record = QueryRecord::single_shot(&facts, &response);
    if let Err(e) = state.query_log.append(&record) {
        tracing::warn!(error = %e, "Failed to record query");
    }

    HttpResponse::Ok().json(response)
}

/// One round of iterative classification
///
/// Re-runs the rule table while skipping every rule id in `history`, so a
/// client can walk through alternative diagnoses until the table is
/// exhausted.
#[utoipa::path(
    post,
    path = "/v1/tickets/classify:iterative",
    request_body = IterativeClassifyRequest,
    responses(
        (status = 200, description = "Next matching rule or terminal outcome", body = IterativeClassifyResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "tickets"
)]
#[post("/v1/tickets/classify:iterative")]
pub async fn classify_ticket_iterative(
    state: web::Data<AppState>,
    body: web::Json<IterativeClassifyRequest>,
) -> impl Responder {
    let request = body.into_inner();
    let response = state
        .triage
        .classify_iterative(&request.facts, &request.history);

    let record = QueryRecord::iterative(&request.facts, &request.history, &response);
    if let Err(e) = state.query_log.append(&record) {
        tracing::warn!(error = %e, "Failed to record query");
    }

    HttpResponse::Ok().json(response)
}

/// Configure classification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(classify_ticket).service(classify_ticket_iterative);
}
