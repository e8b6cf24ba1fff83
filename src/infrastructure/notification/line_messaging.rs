//! LINE Messaging API push adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::application::ports::{NotificationError, Notifier};

/// Messaging API base URL
const API_BASE_URL: &str = "https://api.line.me";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Pushes text messages to one user through a bot channel
pub struct LineMessagingNotifier {
    client: Client,
    token: String,
    user_id: String,
    base_url: String,
}

impl LineMessagingNotifier {
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotificationError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            token: token.into(),
            user_id: user_id.into(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Point the adapter at a different host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/v2/bot/message/push", self.base_url)
    }

    fn build_request<'a>(&'a self, text: &'a str) -> PushRequest<'a> {
        PushRequest {
            to: &self.user_id,
            messages: [TextMessage { kind: "text", text }],
        }
    }
}

#[async_trait]
impl Notifier for LineMessagingNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.token)
            .json(&self.build_request(message))
            .send()
            .await
            .map_err(|e| NotificationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!("LINE push accepted message");
        Ok(())
    }
}
