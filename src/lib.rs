//! call-relay - telephony webhook service
//!
//! Rings a roster of SIP phones on every inbound call, records the call,
//! and afterwards pushes a Gemini-generated summary of the recording to
//! LINE.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (SIP addresses, call status, TwiML, config) and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, LINE, HTTP download, task tracker)
//! - **HTTP**: axum webhook handlers
//! - **CLI**: Command-line interface, configuration loading, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod http;
pub mod infrastructure;
