use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

/// Value sent in place of the logs when the container produced none.
pub const NO_LOGS: &str = "No logs available";

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub container_name: Option<String>,
    pub status: String,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub logs: String,
}

impl NotificationPayload {
    pub fn new(
        container_name: Option<String>,
        status: &str,
        started_at: Option<String>,
        finished_at: Option<String>,
        logs: Option<String>,
    ) -> Self {
        Self {
            container_name,
            status: status.to_string(),
            started_at,
            finished_at,
            logs: logs
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| NO_LOGS.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Error sending webhook: {0}")]
    Request(#[from] reqwest::Error),
}

/// Response accepted from the webhook (any non-error status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Where notifications are delivered.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<WebhookResponse, WebhookError>;
}

/// Posts notifications as JSON to a fixed URL. One attempt per call.
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl WebhookSink for WebhookClient {
    async fn send(&self, payload: &NotificationPayload) -> Result<WebhookResponse, WebhookError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        // Already delivered; an unreadable body does not undo that
        let body = response.text().await.unwrap_or_default();
        Ok(WebhookResponse { status, body })
    }
}
