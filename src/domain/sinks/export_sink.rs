use async_trait::async_trait;
use thiserror::Error;

use super::email::Email;
use crate::domain::employee::Employee;

/// Export/notification failure.
///
/// Upload failures are reportable to the caller; notification failures are
/// handled inside sink implementations (logged, never propagated) so a sent
/// artifact's location stays usable.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("employee list cannot be empty")]
    EmptyExport,

    #[error("artifact upload failed: {0}")]
    Upload(String),

    #[error("notification failed: {0}")]
    Notify(String),
}

/// Sink that turns a result set into a downloadable artifact and,
/// optionally, notifies a recipient with its location.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Exports the given employees as a downloadable artifact and returns
    /// its location. Fails with [`SinkError::EmptyExport`] on empty input.
    async fn export(&self, employees: &[Employee]) -> Result<String, SinkError>;

    /// Exports the given employees, then sends a best-effort notification
    /// carrying the artifact location. A notification failure must not fail
    /// the export; implementations log it and still return the location.
    async fn export_and_notify(
        &self,
        employees: &[Employee],
        recipient: &Email,
    ) -> Result<String, SinkError>;
}

/// Outbound email delivery, treated as an opaque collaborator.
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), SinkError>;
}
