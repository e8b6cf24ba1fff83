//! Shared handler state

use std::sync::Arc;

use crate::application::ports::{AnalysisDispatcher, Notifier};
use crate::application::{CallRouter, CompletionHandler, StatusTracker};
use crate::domain::config::AppConfig;

/// Use cases shared by every request
pub struct AppState {
    pub router: CallRouter,
    pub status_tracker: StatusTracker<Arc<dyn Notifier>>,
    pub completion: CompletionHandler<Arc<dyn AnalysisDispatcher>>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        notifier: Arc<dyn Notifier>,
        dispatcher: Arc<dyn AnalysisDispatcher>,
    ) -> Self {
        Self {
            router: CallRouter::from_config(config),
            status_tracker: StatusTracker::new(config.roster(), notifier),
            completion: CompletionHandler::new(dispatcher),
        }
    }
}
