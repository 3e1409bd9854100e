use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::employee::Employee;
use crate::ingest::IngestSummary;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Ingest a single employee record with its skills
///
/// POST /api/employees
pub async fn add_employee(
    State(state): State<AppState>,
    Json(record): Json<Employee>,
) -> Result<Json<Value>, ApiError> {
    let message = state.ingest.ingest_one(record).await?;
    Ok(Json(json!({ "message": message })))
}

/// Ingest a collection of employee records
///
/// POST /api/employees/bulk
///
/// Always answers 200 with a full accounting: per-record validation
/// failures, identity conflicts, and failed batches are reported in
/// `failedRecords`, never as a request-level error.
pub async fn bulk_add_employees(
    State(state): State<AppState>,
    Json(records): Json<Vec<Employee>>,
) -> Json<IngestSummary> {
    Json(state.ingest.ingest_bulk(records).await)
}
