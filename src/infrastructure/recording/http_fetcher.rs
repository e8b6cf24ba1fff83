//! HTTP recording fetcher adapter

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::ports::{DownloadedRecording, FetchError, RecordingFetcher};
use crate::domain::recording::{AudioFormat, RecordingReference};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Prefix for temporary recording files
const TEMP_PREFIX: &str = "call-recording-";

/// Downloads recordings over HTTP(S)
pub struct HttpRecordingFetcher {
    client: Client,
    credentials: Option<(String, String)>,
    format: AudioFormat,
    temp_dir: Option<PathBuf>,
}

impl HttpRecordingFetcher {
    /// Create a fetcher for publicly readable recordings
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            credentials: None,
            format: AudioFormat::default(),
            temp_dir: None,
        })
    }

    /// Authenticate downloads with the provider's account credentials
    pub fn with_basic_auth(
        mut self,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        self.credentials = Some((account_sid.into(), auth_token.into()));
        self
    }

    /// Place temporary files in `dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    fn create_temp_file(&self) -> Result<NamedTempFile, FetchError> {
        let suffix = format!(".{}", self.format.extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(&suffix);

        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        file.map_err(|e| FetchError::Io(e.to_string()))
    }
}

#[async_trait]
impl RecordingFetcher for HttpRecordingFetcher {
    async fn fetch(
        &self,
        recording: &RecordingReference,
    ) -> Result<DownloadedRecording, FetchError> {
        let url = recording.download_url(self.format);
        debug!(url = %url, authenticated = self.credentials.is_some(), "Downloading recording");

        let mut request = self.client.get(&url);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        let mut response = request
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let file = self.create_temp_file()?;
        let handle = file.reopen().map_err(|e| FetchError::Io(e.to_string()))?;
        let mut out = tokio::fs::File::from_std(handle);

        let mut size_bytes = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?
        {
            out.write_all(&chunk)
                .await
                .map_err(|e| FetchError::Io(e.to_string()))?;
            size_bytes += chunk.len() as u64;
        }
        out.flush().await.map_err(|e| FetchError::Io(e.to_string()))?;
        drop(out);

        if size_bytes == 0 {
            return Err(FetchError::EmptyRecording);
        }

        Ok(DownloadedRecording::new(file, self.format, size_bytes))
    }
}
