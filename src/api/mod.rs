// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ingest::IngestPipeline;
use crate::reporting::SearchService;

pub mod errors;
pub mod handlers;

use handlers::{employees, search};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestPipeline>,
    pub search: Arc<SearchService>,
}

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(employees::health_check))
        // Ingestion routes
        .route("/api/employees", post(employees::add_employee))
        .route("/api/employees/bulk", post(employees::bulk_add_employees))
        // Search routes
        .route("/api/employees/search", get(search::search_by_skill))
        .route("/api/employees/skill-gap", get(search::skill_gap_report))
        .with_state(state)
}
