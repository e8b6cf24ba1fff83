//! Call completion handling

use tracing::info;

use crate::domain::recording::RecordingReference;
use crate::domain::twiml::VoiceResponse;

use super::ports::AnalysisDispatcher;

/// Ends the call and hands any recording off for analysis
pub struct CompletionHandler<D: AnalysisDispatcher> {
    dispatcher: D,
}

impl<D: AnalysisDispatcher> CompletionHandler<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    /// Schedule analysis when a recording is present and answer with a hangup.
    ///
    /// Returns without waiting for the analysis.
    pub fn complete(&self, recording_url: Option<&str>) -> VoiceResponse {
        match RecordingReference::from_optional(recording_url) {
            Some(recording) => {
                info!(recording = %recording, "Scheduling recording analysis");
                self.dispatcher.dispatch(recording);
            }
            None => info!("Call finished without a recording"),
        }

        VoiceResponse::new().hangup()
    }
}
