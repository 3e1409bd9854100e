use async_trait::async_trait;
use serde_json::json;

use crate::domain::sinks::{Email, EmailNotifier, SinkError};

/// Notifier that posts messages to an HTTP mail relay.
pub struct HttpEmailNotifier {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEmailNotifier {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl EmailNotifier for HttpEmailNotifier {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), SinkError> {
        let payload = json!({
            "to": to.as_str(),
            "subject": subject,
            "body": body,
        });

        let mut request = self.http.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::Notify(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SinkError::Notify(format!(
                "mail relay returned status {}",
                response.status()
            )));
        }

        tracing::info!(recipient = %to, subject, "notification sent");
        Ok(())
    }
}
