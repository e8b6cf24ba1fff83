//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::call::{Destination, DestinationRoster};
use crate::domain::summary::DEFAULT_SUMMARY_LANGUAGE;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SAY_LANGUAGE: &str = "ja-JP";

/// Telephony provider settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub sip_domain: Option<String>,
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
}

impl TwilioConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            sip_domain: other.sip_domain.or(self.sip_domain),
            account_sid: other.account_sid.or(self.account_sid),
            auth_token: other.auth_token.or(self.auth_token),
        }
    }
}

/// Generative API settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub summary_language: Option<String>,
}

impl GeminiConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            summary_language: other.summary_language.or(self.summary_language),
        }
    }
}

/// Notification channel settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConfig {
    pub notify_token: Option<String>,
    pub channel_token: Option<String>,
    pub user_id: Option<String>,
}

impl LineConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            notify_token: other.notify_token.or(self.notify_token),
            channel_token: other.channel_token.or(self.channel_token),
            user_id: other.user_id.or(self.user_id),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub say_language: Option<String>,
    pub twilio: Option<TwilioConfig>,
    pub gemini: Option<GeminiConfig>,
    pub line: Option<LineConfig>,
    pub destinations: Option<Vec<Destination>>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            base_url: None,
            say_language: Some(DEFAULT_SAY_LANGUAGE.to_string()),
            twilio: None,
            gemini: Some(GeminiConfig {
                api_key: None,
                model: Some(DEFAULT_GEMINI_MODEL.to_string()),
                summary_language: Some(DEFAULT_SUMMARY_LANGUAGE.to_string()),
            }),
            line: None,
            destinations: Some(DestinationRoster::default().destinations().to_vec()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            base_url: other.base_url.or(self.base_url),
            say_language: other.say_language.or(self.say_language),
            twilio: merge_section(self.twilio, other.twilio, TwilioConfig::merge),
            gemini: merge_section(self.gemini, other.gemini, GeminiConfig::merge),
            line: merge_section(self.line, other.line, LineConfig::merge),
            destinations: other.destinations.or(self.destinations),
        }
    }

    pub fn host_or_default(&self) -> &str {
        non_empty(self.host.as_deref()).unwrap_or(DEFAULT_HOST)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Externally reachable base URL, without a trailing slash
    pub fn base_url(&self) -> Option<&str> {
        non_empty(self.base_url.as_deref()).map(|s| s.trim_end_matches('/'))
    }

    pub fn say_language_or_default(&self) -> &str {
        non_empty(self.say_language.as_deref()).unwrap_or(DEFAULT_SAY_LANGUAGE)
    }

    pub fn sip_domain(&self) -> Option<&str> {
        non_empty(self.twilio.as_ref().and_then(|t| t.sip_domain.as_deref()))
    }

    /// Account SID and auth token, when both are set
    pub fn twilio_credentials(&self) -> Option<(&str, &str)> {
        let twilio = self.twilio.as_ref()?;
        Some((
            non_empty(twilio.account_sid.as_deref())?,
            non_empty(twilio.auth_token.as_deref())?,
        ))
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        non_empty(self.gemini.as_ref().and_then(|g| g.api_key.as_deref()))
    }

    pub fn gemini_model_or_default(&self) -> &str {
        non_empty(self.gemini.as_ref().and_then(|g| g.model.as_deref()))
            .unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn summary_language_or_default(&self) -> &str {
        non_empty(
            self.gemini
                .as_ref()
                .and_then(|g| g.summary_language.as_deref()),
        )
        .unwrap_or(DEFAULT_SUMMARY_LANGUAGE)
    }

    pub fn line_notify_token(&self) -> Option<&str> {
        non_empty(self.line.as_ref().and_then(|l| l.notify_token.as_deref()))
    }

    /// Channel access token and target user id, when both are set
    pub fn line_messaging(&self) -> Option<(&str, &str)> {
        let line = self.line.as_ref()?;
        Some((
            non_empty(line.channel_token.as_deref())?,
            non_empty(line.user_id.as_deref())?,
        ))
    }

    /// Destinations rung on inbound calls, or the built-in roster
    pub fn roster(&self) -> DestinationRoster {
        match &self.destinations {
            Some(destinations) if !destinations.is_empty() => {
                DestinationRoster::new(destinations.clone())
            }
            _ => DestinationRoster::default(),
        }
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (base, other) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(b), Some(o)) => Some(merge(b, o)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
