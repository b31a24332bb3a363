//! # Server
//!
//! The HTTP boundary over the orchestrator: generation, stored-case lookup,
//! semantic search, CSV export, and health reporting.

pub mod csv;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use casegen_core::{Config, Orchestrator};

/// Shared state behind every handler.
pub struct AppState {
    /// The use-case coordinator.
    pub orchestrator: Orchestrator,

    /// Service configuration (tracker credential defaults).
    pub config: Config,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/generate-test-case", post(routes::generate_test_case))
        .route("/fetch-stored-case/{ticket_id}", get(routes::fetch_stored_case))
        .route("/search-test-cases", post(routes::search_test_cases))
        .route("/get-test-case-csv/{ticket_id}", get(routes::get_test_case_csv))
        .with_state(state)
}
