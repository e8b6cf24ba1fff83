//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod analyze_recording;
pub mod call_router;
pub mod completion;
pub mod ports;
pub mod status_tracker;

// Re-export use cases
pub use analyze_recording::{AnalysisError, RecordingAnalysisUseCase, RecordingAnalyzer};
pub use call_router::{CallRouter, COMPLETION_PATH, STATUS_CALLBACK_PATH};
pub use completion::CompletionHandler;
pub use status_tracker::{StatusOutcome, StatusTracker};
