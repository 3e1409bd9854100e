use serde::Serialize;

use crate::domain::employee::Employee;

/// Aggregated result of a bulk ingest call.
///
/// Every input record is accounted for exactly once:
/// `employees_added + employees_updated + failed_records.len()` equals the
/// input length. Each failed record carries a human-readable rejection
/// reason in its `error` annotation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub employees_added: u64,
    pub employees_updated: u64,
    pub failed_records: Vec<Employee>,
}
