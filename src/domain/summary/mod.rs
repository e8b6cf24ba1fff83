//! Call summary domain module

pub mod messages;
mod summary_prompt;

pub use summary_prompt::{SummaryPrompt, DEFAULT_SUMMARY_LANGUAGE};
