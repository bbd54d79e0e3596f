use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::error::ApiError;
use super::types::{ChatRequest, ChatResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const CHAT_PATH: &str = "/api/chat";
const HEALTH_PATH: &str = "/health";

/// The network-facing seam of the conversation view.
///
/// Implemented by [`ChatClient`] for the real service and by mocks in tests.
pub trait ChatSender {
    /// Send one query and map the reply into [`ChatResponse`].
    /// Every failure is returned as an [`ApiError`]; nothing is retried.
    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ApiError>>;

    /// `true` iff the service answered the health probe with exactly 200.
    fn health_check(&self) -> impl Future<Output = bool>;
}

pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    #[allow(dead_code)]
    pub fn new(base_url: &str) -> Self {
        Self::with_connect_timeout(base_url, Duration::from_secs(10))
    }

    /// Only the connect phase is bounded; a slow answer is waited for.
    pub fn with_connect_timeout(base_url: &str, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl ChatSender for ChatClient {
    async fn send_message(&self, req: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = self.endpoint(CHAT_PATH);
        tracing::debug!(%url, has_session = req.session_id.is_some(), "sending chat request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let body = serde_json::from_str::<ChatResponse>(&text)?;
        tracing::debug!(sources = body.sources.len(), "chat response received");
        Ok(body)
    }

    async fn health_check(&self) -> bool {
        match self.client.get(self.endpoint(HEALTH_PATH)).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::warn!("health check failed: {e}");
                false
            }
        }
    }
}
