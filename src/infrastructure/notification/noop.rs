//! No-op notifier used when no channel credential is configured

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{NotificationError, Notifier};

/// Notifier that only logs the message
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        info!(message = message.trim(), "Notification channel not configured; skipping");
        Ok(())
    }
}
