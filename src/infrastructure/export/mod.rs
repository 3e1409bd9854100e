// Export/notification adapters (object storage + mail relay)

pub mod csv;
pub mod gcs;
pub mod mailer;

pub use gcs::GcsExportSink;
pub use mailer::HttpEmailNotifier;
