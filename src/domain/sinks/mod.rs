// Export/notification sink contracts (consumed collaborators)

pub mod email;
pub mod export_sink;

pub use email::Email;
pub use export_sink::{EmailNotifier, ExportSink, SinkError};
