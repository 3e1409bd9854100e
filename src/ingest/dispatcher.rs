use std::sync::Arc;

use crate::domain::employee::Employee;
use crate::domain::repositories::{EmployeeRepository, REASON_NAME_CONFLICT};

use super::types::IngestSummary;

/// Default number of records per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Partitions validated records into fixed-size batches, submits every
/// batch to the repository concurrently, and reduces the results.
///
/// Batches are independent transactions: a storage failure in one batch
/// rejects that batch's records and leaves every other batch untouched.
#[derive(Debug, Clone)]
pub struct BatchDispatcher {
    batch_size: usize,
}

impl BatchDispatcher {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Fan-out/fan-in over the batch upsert operation.
    ///
    /// Partitioning is contiguous and order-preserving; for N records and
    /// batch size B exactly `ceil(N/B)` repository calls are issued. An
    /// empty input performs zero repository calls. Aggregation tolerates
    /// arbitrary batch completion order.
    pub async fn dispatch(
        &self,
        repo: &Arc<dyn EmployeeRepository>,
        valid: Vec<Employee>,
    ) -> IngestSummary {
        let mut summary = IngestSummary::default();
        if valid.is_empty() {
            return summary;
        }

        let batches: Vec<Vec<Employee>> = valid
            .chunks(self.batch_size)
            .map(<[Employee]>::to_vec)
            .collect();
        tracing::debug!(
            records = batches.iter().map(Vec::len).sum::<usize>(),
            batches = batches.len(),
            batch_size = self.batch_size,
            "dispatching batch upserts"
        );

        let mut in_flight = Vec::with_capacity(batches.len());
        for batch in batches {
            let repo = Arc::clone(repo);
            // Snapshot kept so a failed batch can be reported record by record.
            let snapshot = batch.clone();
            let handle = tokio::spawn(async move { repo.upsert_batch(batch).await });
            in_flight.push((handle, snapshot));
        }

        for (handle, snapshot) in in_flight {
            match handle.await {
                Ok(Ok(result)) => {
                    summary.employees_added += result.added;
                    summary.employees_updated += result.updated;
                    summary.failed_records.extend(
                        result
                            .conflicts
                            .into_iter()
                            .map(|employee| employee.with_error(REASON_NAME_CONFLICT)),
                    );
                }
                Ok(Err(err)) => {
                    tracing::error!(
                        batch_len = snapshot.len(),
                        error = %err,
                        "batch upsert failed, rejecting its records"
                    );
                    let reason = format!("Storage error: {err}");
                    summary.failed_records.extend(
                        snapshot
                            .into_iter()
                            .map(|employee| employee.with_error(reason.clone())),
                    );
                }
                Err(join_err) => {
                    tracing::error!(
                        batch_len = snapshot.len(),
                        error = %join_err,
                        "batch task aborted, rejecting its records"
                    );
                    summary.failed_records.extend(
                        snapshot
                            .into_iter()
                            .map(|employee| employee.with_error("Storage error: batch task aborted")),
                    );
                }
            }
        }

        summary
    }
}

impl Default for BatchDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}
