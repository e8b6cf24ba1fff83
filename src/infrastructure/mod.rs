//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini API, LINE, etc.

pub mod background;
pub mod config;
pub mod notification;
pub mod recording;
pub mod summarization;

// Re-export adapters
pub use background::TaskTrackerDispatcher;
pub use config::XdgConfigStore;
pub use notification::{
    create_notifier, LineMessagingNotifier, LineNotifyNotifier, NoopNotifier,
};
pub use recording::HttpRecordingFetcher;
pub use summarization::GeminiSummarizer;
