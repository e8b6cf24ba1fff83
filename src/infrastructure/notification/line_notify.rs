//! LINE Notify adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::application::ports::{NotificationError, Notifier};

/// LINE Notify API base URL
const API_BASE_URL: &str = "https://notify-api.line.me";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends messages through a LINE Notify personal access token
pub struct LineNotifyNotifier {
    client: Client,
    token: String,
    base_url: String,
}

impl LineNotifyNotifier {
    pub fn new(token: impl Into<String>) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotificationError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            token: token.into(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Point the adapter at a different host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/api/notify", self.base_url)
    }
}

#[async_trait]
impl Notifier for LineNotifyNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.token)
            .form(&[("message", message)])
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

        debug!("LINE Notify accepted message");
        Ok(())
    }
}
