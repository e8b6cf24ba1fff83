//! Task-tracker backed analysis dispatcher

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{info, Instrument};

use crate::application::ports::AnalysisDispatcher;
use crate::application::RecordingAnalyzer;
use crate::domain::recording::RecordingReference;

/// Spawns one tracked task per recording.
///
/// Tasks are never cancelled. Shutdown closes the tracker and waits for
/// whatever is still running.
#[derive(Clone)]
pub struct TaskTrackerDispatcher {
    analyzer: Arc<dyn RecordingAnalyzer>,
    tracker: TaskTracker,
}

impl TaskTrackerDispatcher {
    pub fn new(analyzer: Arc<dyn RecordingAnalyzer>) -> Self {
        Self {
            analyzer,
            tracker: TaskTracker::new(),
        }
    }

    /// Handle used to wait for in-flight tasks
    pub fn tracker(&self) -> TaskTracker {
        self.tracker.clone()
    }

    /// Stop accepting new work and wait for running tasks to finish
    pub async fn shutdown(&self) {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            info!(pending, "Waiting for recording analysis to finish");
        }
        self.tracker.wait().await;
    }
}

impl AnalysisDispatcher for TaskTrackerDispatcher {
    fn dispatch(&self, recording: RecordingReference) {
        let analyzer = Arc::clone(&self.analyzer);
        let span = tracing::info_span!("analysis", recording = %recording);
        self.tracker.spawn(
            async move {
                analyzer.analyze(recording).await;
            }
            .instrument(span),
        );
    }
}
