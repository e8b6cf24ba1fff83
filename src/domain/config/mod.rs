//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, GeminiConfig, LineConfig, TwilioConfig, DEFAULT_GEMINI_MODEL, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_SAY_LANGUAGE,
};
