//! Background dispatch port interface

use crate::domain::recording::RecordingReference;

/// Port for scheduling recording analysis off the request path
pub trait AnalysisDispatcher: Send + Sync {
    /// Schedule analysis of `recording` and return immediately.
    ///
    /// Implementations must not wait for the analysis to finish.
    fn dispatch(&self, recording: RecordingReference);
}

impl<D: AnalysisDispatcher + ?Sized> AnalysisDispatcher for std::sync::Arc<D> {
    fn dispatch(&self, recording: RecordingReference) {
        self.as_ref().dispatch(recording)
    }
}
