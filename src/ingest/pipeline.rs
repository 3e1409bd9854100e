use std::sync::Arc;

use crate::domain::employee::Employee;
use crate::domain::repositories::EmployeeRepository;

use super::dispatcher::BatchDispatcher;
use super::errors::{IngestError, IngestResult};
use super::types::IngestSummary;
use super::validator::{validate_records, ValidationPolicy, REASON_INVALID_IDENTITY};

/// Entry point for record ingestion: validation/normalization followed by
/// concurrent batch dispatch.
pub struct IngestPipeline {
    repo: Arc<dyn EmployeeRepository>,
    policy: ValidationPolicy,
    dispatcher: BatchDispatcher,
}

impl IngestPipeline {
    pub fn new(repo: Arc<dyn EmployeeRepository>, policy: ValidationPolicy, batch_size: usize) -> Self {
        Self {
            repo,
            policy,
            dispatcher: BatchDispatcher::new(batch_size),
        }
    }

    /// Ingests a single record.
    ///
    /// Returns the storage layer's confirmation message, or a validation
    /// error when the record is rejected locally or the storage layer
    /// reports a conflict.
    pub async fn ingest_one(&self, record: Employee) -> IngestResult<String> {
        let (valid, mut rejected) = validate_records(vec![record], &self.policy);
        if let Some(reject) = rejected.pop() {
            let reason = reject
                .error
                .unwrap_or_else(|| REASON_INVALID_IDENTITY.to_string());
            return Err(IngestError::Validation(reason));
        }
        let Some(employee) = valid.into_iter().next() else {
            return Err(IngestError::Validation(REASON_INVALID_IDENTITY.to_string()));
        };

        let outcome = self.repo.upsert_one(&employee).await?;
        if outcome.validation_error {
            Err(IngestError::Validation(outcome.message))
        } else {
            Ok(outcome.message)
        }
    }

    /// Ingests a collection of records, returning a full accounting of the
    /// outcome. Storage failures never abort the call; they surface as
    /// rejections for the affected batch.
    pub async fn ingest_bulk(&self, records: Vec<Employee>) -> IngestSummary {
        let total = records.len();
        let (valid, rejected) = validate_records(records, &self.policy);
        tracing::info!(
            total,
            valid = valid.len(),
            rejected = rejected.len(),
            "bulk ingest validated"
        );

        let mut summary = self.dispatcher.dispatch(&self.repo, valid).await;
        summary.failed_records.extend(rejected);

        tracing::info!(
            added = summary.employees_added,
            updated = summary.employees_updated,
            failed = summary.failed_records.len(),
            "bulk ingest completed"
        );
        summary
    }
}
