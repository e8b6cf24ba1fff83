//! SIP address value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::SipAddressError;

/// A `scheme:user@host` address as reported by the telephony provider.
///
/// Only the pieces the webhooks need are kept: the user part identifies
/// which destination picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SipAddress {
    scheme: String,
    user: String,
    host: Option<String>,
}

impl SipAddress {
    /// Build the address of `user` under `domain`
    pub fn new(user: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            scheme: "sip".to_string(),
            user: user.into(),
            host: Some(domain.into()),
        }
    }

    /// Parse a raw address such as `sip:mobile_a@example.sip.twilio.com`
    pub fn parse(raw: &str) -> Result<Self, SipAddressError> {
        let raw = raw.trim();
        let (scheme, rest) = raw
            .split_once(':')
            .ok_or_else(|| SipAddressError::MissingScheme(raw.to_string()))?;

        let (user, host) = match rest.split_once('@') {
            Some((user, host)) => (user, Some(host)),
            None => (rest, None),
        };

        if user.is_empty() {
            return Err(SipAddressError::EmptyUser(raw.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            user: user.to_string(),
            host: host.filter(|h| !h.is_empty()).map(str::to_string),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The local identifier, e.g. `mobile_a`
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

impl fmt::Display for SipAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}:{}@{}", self.scheme, self.user, host),
            None => write!(f, "{}:{}", self.scheme, self.user),
        }
    }
}

impl FromStr for SipAddress {
    type Err = SipAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
