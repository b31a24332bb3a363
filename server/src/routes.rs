//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::info;

use casegen_core::Credentials;
use casegen_protocol::{SearchRequest, SearchResponse, TicketRecord, TicketRequest};

use crate::AppState;
use crate::csv::render_test_cases;
use crate::error::ApiError;

/// `GET /`: service banner.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Casegen Test Case Generator API" }))
}

/// `GET /health`: liveness plus embedding-model readiness.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Backend API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "model_loaded": state.orchestrator.is_ready(),
    }))
}

/// `POST /generate-test-case`: generate (or return cached) test cases for a
/// ticket.
pub async fn generate_test_case(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TicketRequest>,
) -> Result<Json<TicketRecord>, ApiError> {
    info!("Generation requested for ticket {}", request.ticket_id);

    // Request-supplied credentials win; configured defaults fill the gaps.
    let credentials = Credentials::new(
        request
            .username
            .unwrap_or_else(|| state.config.tracker_username.clone()),
        request
            .api_token
            .unwrap_or_else(|| state.config.tracker_api_token.clone()),
        request
            .base_url
            .unwrap_or_else(|| state.config.tracker_base_url.clone()),
    );

    let record = state
        .orchestrator
        .generate_or_fetch(&request.ticket_id, &credentials)
        .await?;
    Ok(Json(record))
}

/// `GET /fetch-stored-case/{ticket_id}`: stored record lookup.
pub async fn fetch_stored_case(
    State(state): State<Arc<AppState>>,
    Path(ticket_id): Path<String>,
) -> Result<Json<TicketRecord>, ApiError> {
    match state.orchestrator.get_stored(&ticket_id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound(format!(
            "No test cases found for ticket: {ticket_id}"
        ))),
    }
}

/// `POST /search-test-cases`: semantic search over stored records.
pub async fn search_test_cases(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state
        .orchestrator
        .search_similar(&request.query, request.limit)
        .await?;

    let message = results
        .is_empty()
        .then(|| "No matching test cases found".to_string());
    Ok(Json(SearchResponse { results, message }))
}

/// `GET /get-test-case-csv/{ticket_id}`: stored record as a CSV download.
pub async fn get_test_case_csv(
    State(state): State<Arc<AppState>>,
    Path(ticket_id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(record) = state.orchestrator.get_stored(&ticket_id).await? else {
        return Err(ApiError::NotFound(format!(
            "No test cases found for ticket: {ticket_id}"
        )));
    };

    let body = render_test_cases(&record.test_cases);
    let disposition = format!("attachment; filename=\"test_cases_{ticket_id}.csv\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
