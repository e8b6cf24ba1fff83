//! Notification infrastructure module
//!
//! LINE adapters for the notifier port, plus a logging no-op used when
//! no channel is configured.

mod line_messaging;
mod line_notify;
mod noop;

pub use line_messaging::LineMessagingNotifier;
pub use line_notify::LineNotifyNotifier;
pub use noop::NoopNotifier;

use std::sync::Arc;

use tracing::info;

use crate::application::ports::{NotificationError, Notifier};
use crate::domain::config::AppConfig;

/// Create the notifier for the configured channel
///
/// A Messaging API channel wins over a Notify token. Without either,
/// notifications are only logged.
pub fn create_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, NotificationError> {
    if let Some((token, user_id)) = config.line_messaging() {
        info!("Using LINE Messaging API for notifications");
        return Ok(Arc::new(LineMessagingNotifier::new(token, user_id)?));
    }

    if let Some(token) = config.line_notify_token() {
        info!("Using LINE Notify for notifications");
        return Ok(Arc::new(LineNotifyNotifier::new(token)?));
    }

    info!("No notification channel configured; notifications will only be logged");
    Ok(Arc::new(NoopNotifier::new()))
}
