//! Summarization infrastructure module

mod gemini;

pub use gemini::GeminiSummarizer;
