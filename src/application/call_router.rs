//! Inbound call routing

use tracing::{error, info};

use crate::domain::call::DestinationRoster;
use crate::domain::config::AppConfig;
use crate::domain::twiml::{Dial, Sip, VoiceResponse, RECORD_FROM_ANSWER};

/// Path the provider posts to when the dial step finishes
pub const COMPLETION_PATH: &str = "/gather_result";

/// Path the provider posts per-leg status events to
pub const STATUS_CALLBACK_PATH: &str = "/status_callback";

/// Spoken to the caller when no SIP domain is configured
pub const MISSING_SIP_DOMAIN_MESSAGE: &str =
    "システムエラーです。SIPドメイン設定を確認してください。";

/// Builds the call-control document for an inbound call
#[derive(Debug, Clone)]
pub struct CallRouter {
    sip_domain: Option<String>,
    base_url: Option<String>,
    say_language: String,
    roster: DestinationRoster,
}

impl CallRouter {
    pub fn new(
        sip_domain: Option<String>,
        base_url: Option<String>,
        say_language: impl Into<String>,
        roster: DestinationRoster,
    ) -> Self {
        Self {
            sip_domain,
            base_url,
            say_language: say_language.into(),
            roster,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.sip_domain().map(str::to_string),
            config.base_url().map(str::to_string),
            config.say_language_or_default(),
            config.roster(),
        )
    }

    /// Absolute status callback URL, or the bare path when no base URL is known
    pub fn status_callback_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base, STATUS_CALLBACK_PATH),
            None => STATUS_CALLBACK_PATH.to_string(),
        }
    }

    /// Ring every destination at once, recording from answer.
    pub fn route_inbound(&self) -> VoiceResponse {
        let Some(domain) = self.sip_domain.as_deref() else {
            error!("SIP domain is not configured; rejecting inbound call");
            return VoiceResponse::new().say(MISSING_SIP_DOMAIN_MESSAGE, Some(self.say_language.as_str()));
        };

        let callback = self.status_callback_url();
        let dial = self
            .roster
            .destinations()
            .iter()
            .fold(
                Dial::new().record(RECORD_FROM_ANSWER).action(COMPLETION_PATH),
                |dial, destination| {
                    let uri = destination.sip_address(domain).to_string();
                    dial.sip(Sip::new(uri).status_callback(&callback, &["answered"]))
                },
            );

        info!(
            destinations = self.roster.len(),
            domain, "Routing inbound call to all destinations"
        );
        VoiceResponse::new().dial(dial)
    }
}
