//! Recording reference value object

use std::fmt;

use super::audio_format::AudioFormat;
use crate::domain::error::EmptyRecordingReference;

/// Provider-issued locator for a call recording.
///
/// Valid for a single download attempt; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingReference {
    url: String,
}

impl RecordingReference {
    /// Wrap a raw locator. Blank input is rejected.
    pub fn new(url: impl Into<String>) -> Result<Self, EmptyRecordingReference> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(EmptyRecordingReference);
        }
        Ok(Self { url })
    }

    /// Build from an optional form field, treating blank values as absent
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| Self::new(s).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// URL that asks the provider for a specific container format
    pub fn download_url(&self, format: AudioFormat) -> String {
        format!("{}.{}", self.url, format.extension())
    }
}

impl fmt::Display for RecordingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
