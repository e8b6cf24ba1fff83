//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Notification request failed: {0}")]
    RequestFailed(String),

    #[error("Notification rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Port for push notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Push a text message to the notification channel.
    ///
    /// # Arguments
    /// * `message` - The message body
    ///
    /// # Returns
    /// Ok(()) once the channel accepted the message, error otherwise
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.as_ref().notify(message).await
    }
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.as_ref().notify(message).await
    }
}
