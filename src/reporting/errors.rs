use thiserror::Error;

use crate::domain::repositories::RepositoryError;
use crate::domain::sinks::SinkError;

/// Errors surfaced by the search and skill-gap report flows.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("export error: {0}")]
    Export(#[from] SinkError),

    #[error("a recipient email is required when generating a report")]
    MissingRecipient,
}

pub type ReportResult<T> = Result<T, ReportError>;
