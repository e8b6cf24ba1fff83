//! Domain error types

use thiserror::Error;

/// Error when a SIP address cannot be split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SipAddressError {
    #[error("Missing scheme separator in SIP address: \"{0}\"")]
    MissingScheme(String),

    #[error("Empty user part in SIP address: \"{0}\"")]
    EmptyUser(String),
}

/// Error when a recording reference is blank
#[derive(Debug, Clone, Error)]
#[error("Recording reference must not be empty")]
pub struct EmptyRecordingReference;

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
