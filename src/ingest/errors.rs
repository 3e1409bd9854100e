use thiserror::Error;

use crate::domain::repositories::RepositoryError;

/// Errors surfaced by single-record ingestion.
///
/// Bulk ingestion never returns these: validation and conflict outcomes
/// flow through `IngestSummary` as data, and storage failures are confined
/// to the batch they occurred in.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

pub type IngestResult<T> = Result<T, IngestError>;
