//! Analyze recording use case
//!
//! Downloads a finished call's recording, has it summarized and pushes the
//! result to the notification channel. Runs detached from the webhook that
//! scheduled it, so every failure ends up as a notification instead of an
//! error returned to a caller.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::recording::{human_readable_size, RecordingReference};
use crate::domain::summary::{messages, SummaryPrompt};

use super::ports::{
    FetchError, Notifier, RecordingFetcher, SummarizationError, Summarizer, UploadedAudio,
};

/// Errors from the analyze recording use case
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Download(#[from] FetchError),

    #[error(transparent)]
    Summarization(#[from] SummarizationError),
}

/// Entry point used by background dispatchers
#[async_trait]
pub trait RecordingAnalyzer: Send + Sync {
    /// Analyze a recording to completion. Never fails.
    async fn analyze(&self, recording: RecordingReference);
}

/// Recording analysis use case
pub struct RecordingAnalysisUseCase<F, S, N>
where
    F: RecordingFetcher,
    S: Summarizer,
    N: Notifier,
{
    fetcher: F,
    summarizer: S,
    notifier: N,
    prompt: SummaryPrompt,
}

impl<F, S, N> RecordingAnalysisUseCase<F, S, N>
where
    F: RecordingFetcher,
    S: Summarizer,
    N: Notifier,
{
    /// Create a new use case instance
    pub fn new(fetcher: F, summarizer: S, notifier: N, prompt: SummaryPrompt) -> Self {
        Self {
            fetcher,
            summarizer,
            notifier,
            prompt,
        }
    }

    /// Run the analysis, reporting the outcome through the notifier.
    pub async fn run(&self, recording: &RecordingReference) {
        match self.execute(recording).await {
            Ok(summary) => {
                info!(recording = %recording, chars = summary.chars().count(), "Call summary delivered");
            }
            Err(e) => {
                error!(recording = %recording, error = %e, "Recording analysis failed");
                self.notify(&messages::analysis_failed(&e.to_string())).await;
            }
        }
    }

    /// Execute the analysis workflow and return the summary text.
    ///
    /// The downloaded file is owned by this call and removed when it returns.
    pub async fn execute(&self, recording: &RecordingReference) -> Result<String, AnalysisError> {
        self.summarizer.ensure_ready()?;

        self.notify(&messages::analysis_started()).await;

        let audio = self.fetcher.fetch(recording).await?;
        info!(
            path = %audio.path().display(),
            size = %human_readable_size(audio.size_bytes()),
            "Downloaded recording"
        );

        info!("Uploading recording for summarization");
        let uploaded = self.summarizer.upload(&audio).await?;

        info!(file = %uploaded.name, "Generating summary");
        let summary = match self.summarizer.summarize(&uploaded, &self.prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                self.cleanup(&uploaded).await;
                return Err(e.into());
            }
        };

        self.notify(&messages::summary(&summary)).await;
        self.cleanup(&uploaded).await;

        Ok(summary)
    }

    async fn notify(&self, message: &str) {
        if let Err(e) = self.notifier.notify(message).await {
            warn!(error = %e, "Failed to send notification");
        }
    }

    async fn cleanup(&self, uploaded: &UploadedAudio) {
        if let Err(e) = self.summarizer.delete(uploaded).await {
            debug!(file = %uploaded.name, error = %e, "Ignoring failed remote file cleanup");
        }
    }
}

#[async_trait]
impl<F, S, N> RecordingAnalyzer for RecordingAnalysisUseCase<F, S, N>
where
    F: RecordingFetcher,
    S: Summarizer,
    N: Notifier,
{
    async fn analyze(&self, recording: RecordingReference) {
        self.run(&recording).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DownloadedRecording, NotificationError};
    use crate::domain::recording::AudioFormat;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::{NamedTempFile, TempDir};

    // Mock implementations for testing
    struct MockFetcher {
        dir: PathBuf,
        fail: bool,
        last_path: Arc<Mutex<Option<PathBuf>>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockFetcher {
        fn new(dir: &TempDir) -> Self {
            Self {
                dir: dir.path().to_path_buf(),
                fail: false,
                last_path: Arc::new(Mutex::new(None)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(dir: &TempDir) -> Self {
            Self {
                fail: true,
                ..Self::new(dir)
            }
        }
    }

    #[async_trait]
    impl RecordingFetcher for MockFetcher {
        async fn fetch(
            &self,
            _recording: &RecordingReference,
        ) -> Result<DownloadedRecording, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::HttpStatus {
                    status: 404,
                    url: "https://example.com/RE1.mp3".to_string(),
                });
            }
            let mut file = NamedTempFile::new_in(&self.dir).unwrap();
            file.write_all(b"ID3").unwrap();
            *self.last_path.lock().unwrap() = Some(file.path().to_path_buf());
            Ok(DownloadedRecording::new(file, AudioFormat::Mp3, 3))
        }
    }

    #[derive(Default)]
    struct MockSummarizer {
        missing_key: bool,
        fail_summarize: bool,
        fail_delete: bool,
        deletes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Summarizer for MockSummarizer {
        fn ensure_ready(&self) -> Result<(), SummarizationError> {
            if self.missing_key {
                Err(SummarizationError::MissingApiKey)
            } else {
                Ok(())
            }
        }

        async fn upload(
            &self,
            recording: &DownloadedRecording,
        ) -> Result<UploadedAudio, SummarizationError> {
            assert!(recording.path().exists());
            Ok(UploadedAudio {
                name: "files/abc".to_string(),
                uri: "https://example.com/files/abc".to_string(),
                mime_type: recording.format().mime_type().to_string(),
            })
        }

        async fn summarize(
            &self,
            _audio: &UploadedAudio,
            _prompt: &SummaryPrompt,
        ) -> Result<String, SummarizationError> {
            if self.fail_summarize {
                Err(SummarizationError::ApiError("model overloaded".to_string()))
            } else {
                Ok("発信者: 山田 / 用件: 見積もり / ネクストアクション: 折り返し".to_string())
            }
        }

        async fn delete(&self, _audio: &UploadedAudio) -> Result<(), SummarizationError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                Err(SummarizationError::RequestFailed("gone".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default, Clone)]
    struct RecordingNotifier {
        messages: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn sent(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, message: &str) -> Result<(), NotificationError> {
            self.messages.lock().unwrap().push(message.to_string());
            if self.fail {
                Err(NotificationError::RequestFailed("offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn recording() -> RecordingReference {
        RecordingReference::new("https://example.com/Recordings/RE1").unwrap()
    }

    #[tokio::test]
    async fn execute_returns_summary_and_notifies_twice() {
        let dir = TempDir::new().unwrap();
        let notifier = RecordingNotifier::default();
        let use_case = RecordingAnalysisUseCase::new(
            MockFetcher::new(&dir),
            MockSummarizer::default(),
            notifier.clone(),
            SummaryPrompt::default(),
        );

        let summary = use_case.execute(&recording()).await.unwrap();

        assert!(summary.contains("発信者"));
        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("解析を開始"));
        assert!(sent[1].contains("通話要約結果"));
        assert!(sent[1].contains(&summary));
    }

    #[tokio::test]
    async fn temp_file_removed_after_success() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new(&dir);
        let last_path = Arc::clone(&fetcher.last_path);
        let use_case = RecordingAnalysisUseCase::new(
            fetcher,
            MockSummarizer::default(),
            RecordingNotifier::default(),
            SummaryPrompt::default(),
        );

        use_case.run(&recording()).await;

        let path = last_path.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn temp_file_removed_after_failure() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new(&dir);
        let last_path = Arc::clone(&fetcher.last_path);
        let use_case = RecordingAnalysisUseCase::new(
            fetcher,
            MockSummarizer {
                fail_summarize: true,
                ..Default::default()
            },
            RecordingNotifier::default(),
            SummaryPrompt::default(),
        );

        use_case.run(&recording()).await;

        let path = last_path.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn missing_api_key_reports_error_without_downloading() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new(&dir);
        let calls = Arc::clone(&fetcher.calls);
        let notifier = RecordingNotifier::default();
        let use_case = RecordingAnalysisUseCase::new(
            fetcher,
            MockSummarizer {
                missing_key: true,
                ..Default::default()
            },
            notifier.clone(),
            SummaryPrompt::default(),
        );

        use_case.run(&recording()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("エラーが発生しました"));
        assert!(sent[0].contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn download_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let notifier = RecordingNotifier::default();
        let use_case = RecordingAnalysisUseCase::new(
            MockFetcher::failing(&dir),
            MockSummarizer::default(),
            notifier.clone(),
            SummaryPrompt::default(),
        );

        use_case.run(&recording()).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("解析を開始"));
        assert!(sent[1].contains("HTTP 404"));
    }

    #[tokio::test]
    async fn remote_file_deleted_even_when_summary_fails() {
        let dir = TempDir::new().unwrap();
        let summarizer = MockSummarizer {
            fail_summarize: true,
            ..Default::default()
        };
        let deletes = Arc::clone(&summarizer.deletes);
        let notifier = RecordingNotifier::default();
        let use_case = RecordingAnalysisUseCase::new(
            MockFetcher::new(&dir),
            summarizer,
            notifier.clone(),
            SummaryPrompt::default(),
        );

        let result = use_case.execute(&recording()).await;

        assert!(matches!(result, Err(AnalysisError::Summarization(_))));
        assert_eq!(deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let use_case = RecordingAnalysisUseCase::new(
            MockFetcher::new(&dir),
            MockSummarizer {
                fail_delete: true,
                ..Default::default()
            },
            RecordingNotifier::default(),
            SummaryPrompt::default(),
        );

        assert!(use_case.execute(&recording()).await.is_ok());
    }

    #[tokio::test]
    async fn notification_failures_do_not_abort_analysis() {
        let dir = TempDir::new().unwrap();
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let use_case = RecordingAnalysisUseCase::new(
            MockFetcher::new(&dir),
            MockSummarizer::default(),
            notifier.clone(),
            SummaryPrompt::default(),
        );

        assert!(use_case.execute(&recording()).await.is_ok());
        assert_eq!(notifier.sent().len(), 2);
    }
}
