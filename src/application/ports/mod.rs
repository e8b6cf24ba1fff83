//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod dispatcher;
pub mod notifier;
pub mod recording_fetcher;
pub mod summarizer;

// Re-export common types
pub use config::ConfigStore;
pub use dispatcher::AnalysisDispatcher;
pub use notifier::{NotificationError, Notifier};
pub use recording_fetcher::{DownloadedRecording, FetchError, RecordingFetcher};
pub use summarizer::{SummarizationError, Summarizer, UploadedAudio};
