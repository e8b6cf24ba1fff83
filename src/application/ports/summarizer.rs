//! Summarization port interface

use async_trait::async_trait;
use thiserror::Error;

use super::recording_fetcher::DownloadedRecording;
use crate::domain::summary::SummaryPrompt;

/// Summarization errors
#[derive(Debug, Clone, Error)]
pub enum SummarizationError {
    #[error("Missing generative API key. Set GOOGLE_API_KEY or 'gemini.api_key' in the config file")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Failed to read audio file: {0}")]
    Io(String),

    #[error("Audio upload failed: {0}")]
    UploadFailed(String),

    #[error("Empty summary response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Handle to audio stored on the summarization service's side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAudio {
    /// Resource name used for deletion, e.g. `files/abc123`
    pub name: String,
    /// URI referenced from generation requests
    pub uri: String,
    pub mime_type: String,
}

/// Port for the hosted summarization capability
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Check that the service can be used at all (credentials present)
    fn ensure_ready(&self) -> Result<(), SummarizationError> {
        Ok(())
    }

    /// Upload the recording so it can be referenced by a prompt
    async fn upload(
        &self,
        recording: &DownloadedRecording,
    ) -> Result<UploadedAudio, SummarizationError>;

    /// Summarize previously uploaded audio following the prompt
    async fn summarize(
        &self,
        audio: &UploadedAudio,
        prompt: &SummaryPrompt,
    ) -> Result<String, SummarizationError>;

    /// Remove the uploaded audio from the remote side
    async fn delete(&self, audio: &UploadedAudio) -> Result<(), SummarizationError>;
}
