use async_trait::async_trait;
use thiserror::Error;

use crate::domain::employee::Employee;
use crate::domain::search::NormalizedCriteria;

/// Rejection reason for an identity conflict: the id already exists in
/// storage under a different name.
pub const REASON_NAME_CONFLICT: &str = "EmployeeId exists but Name does not match";

/// Storage-side failure. Validation and conflict outcomes are data, not
/// errors; only collaborator failures surface through this type.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),
}

/// Outcome of a single-record upsert.
///
/// Mirrors the persistence contract: the storage layer performs its own
/// conflict detection and reports it back as a validation outcome rather
/// than a failure.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub validation_error: bool,
    pub message: String,
}

/// Result of one batch upsert: counts of inserted and updated rows plus the
/// records whose id already existed under a different name.
#[derive(Debug, Clone, Default)]
pub struct BatchUpsert {
    pub added: u64,
    pub updated: u64,
    pub conflicts: Vec<Employee>,
}

/// Repository contract for employee persistence and the two read paths.
///
/// Implementations must detect identity conflicts (existing id with a
/// mismatched name) and report them per record instead of overwriting.
/// Each `upsert_batch` call is one transaction; batches submitted
/// concurrently are independent of each other.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Upserts a single employee and its skills.
    async fn upsert_one(&self, employee: &Employee) -> Result<UpsertOutcome, RepositoryError>;

    /// Upserts a batch of employees atomically, collecting identity
    /// conflicts instead of failing on them.
    async fn upsert_batch(&self, employees: Vec<Employee>) -> Result<BatchUpsert, RepositoryError>;

    /// Employees that have a skill matching the criteria, paginated and
    /// sorted. Soft-deleted employees are excluded.
    async fn search_by_skill(
        &self,
        criteria: &NormalizedCriteria,
    ) -> Result<Vec<Employee>, RepositoryError>;

    /// Employees that lack a skill matching the criteria, paginated and
    /// sorted. Soft-deleted employees are excluded.
    async fn search_missing_skill(
        &self,
        criteria: &NormalizedCriteria,
    ) -> Result<Vec<Employee>, RepositoryError>;
}
