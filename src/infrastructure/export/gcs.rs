use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::domain::employee::Employee;
use crate::domain::sinks::{Email, EmailNotifier, ExportSink, SinkError};

use super::csv::render_employees_csv;

/// Export sink backed by Google Cloud Storage.
///
/// Uploads the CSV artifact through the JSON media endpoint and returns the
/// object's public location. Notification delivery is best-effort: failures
/// are logged and swallowed so the artifact location stays usable.
pub struct GcsExportSink {
    http: reqwest::Client,
    bucket: String,
    endpoint: String,
    auth_token: Option<String>,
    notifier: Arc<dyn EmailNotifier>,
}

impl GcsExportSink {
    pub fn new(bucket: String, auth_token: Option<String>, notifier: Arc<dyn EmailNotifier>) -> Self {
        Self {
            http: reqwest::Client::new(),
            bucket,
            endpoint: "https://storage.googleapis.com".to_string(),
            auth_token,
            notifier,
        }
    }

    /// Points the sink at a different storage endpoint (an emulator such as
    /// fake-gcs-server). Artifact locations are rewritten to match.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ExportSink for GcsExportSink {
    async fn export(&self, employees: &[Employee]) -> Result<String, SinkError> {
        if employees.is_empty() {
            tracing::warn!("export requested with no employees");
            return Err(SinkError::EmptyExport);
        }

        let object = format!(
            "employees_{}_{}.csv",
            Utc::now().format("%Y%m%d%H%M%S"),
            Uuid::new_v4().simple()
        );
        let body = render_employees_csv(employees);

        let upload_url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.endpoint, self.bucket, object
        );
        let mut request = self
            .http
            .post(&upload_url)
            .header(CONTENT_TYPE, "text/csv")
            .body(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::Upload(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SinkError::Upload(format!(
                "upload returned status {}",
                response.status()
            )));
        }

        tracing::info!(bucket = %self.bucket, object = %object, "employee export uploaded");
        Ok(format!("{}/{}/{}", self.endpoint, self.bucket, object))
    }

    async fn export_and_notify(
        &self,
        employees: &[Employee],
        recipient: &Email,
    ) -> Result<String, SinkError> {
        let location = self.export(employees).await?;

        let body = format!(
            "The Skill Gap Report you requested is ready. \
             Please click the link below to download it:\n\n{location}"
        );
        if let Err(err) = self.notifier.send(recipient, "Skill Gap Report", &body).await {
            tracing::error!(
                recipient = %recipient,
                error = %err,
                "report notification failed, artifact remains available"
            );
        }

        Ok(location)
    }
}
