//! Recording download port interface

use std::path::Path;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::domain::recording::{AudioFormat, RecordingReference};

/// Recording download errors
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Recording download failed: {0}")]
    RequestFailed(String),

    #[error("Recording download returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Recording is empty")]
    EmptyRecording,

    #[error("Failed to write recording to disk: {0}")]
    Io(String),
}

/// A downloaded recording held in a temporary file.
///
/// The file is deleted when this value is dropped, on every exit path.
#[derive(Debug)]
pub struct DownloadedRecording {
    file: NamedTempFile,
    format: AudioFormat,
    size_bytes: u64,
}

impl DownloadedRecording {
    pub fn new(file: NamedTempFile, format: AudioFormat, size_bytes: u64) -> Self {
        Self {
            file,
            format,
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Port for retrieving a call recording
#[async_trait]
pub trait RecordingFetcher: Send + Sync {
    /// Download the recording into a scoped temporary file.
    ///
    /// # Arguments
    /// * `recording` - The provider's recording locator
    async fn fetch(&self, recording: &RecordingReference)
        -> Result<DownloadedRecording, FetchError>;
}
