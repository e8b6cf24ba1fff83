//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod call;
pub mod config;
pub mod error;
pub mod recording;
pub mod summary;
pub mod twiml;

// Re-export common types
pub use call::{CallStatus, Destination, DestinationRoster, SipAddress};
pub use config::AppConfig;
pub use error::*;
pub use recording::{AudioFormat, RecordingReference};
pub use summary::SummaryPrompt;
pub use twiml::VoiceResponse;
