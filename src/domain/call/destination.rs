//! Ring destinations and their display names

use serde::{Deserialize, Serialize};

use super::sip_address::SipAddress;

/// Phones rung on every inbound call, paired with the name shown in notifications
const DEFAULT_DESTINATIONS: &[(&str, &str)] = &[
    ("mobile_a", "携帯A"),
    ("mobile_b", "携帯B"),
    ("emergency", "緊急用携帯"),
];

/// A single SIP user that is rung on inbound calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Destination {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
        }
    }

    /// A destination without a friendly name
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    /// Address of this destination under the given SIP domain
    pub fn sip_address(&self, domain: &str) -> SipAddress {
        SipAddress::new(self.id.clone(), domain)
    }
}

/// Ordered set of destinations rung simultaneously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRoster {
    destinations: Vec<Destination>,
}

impl DestinationRoster {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Friendly name for a SIP user, falling back to the raw identifier
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.destinations
            .iter()
            .find(|d| d.id == id)
            .and_then(|d| d.display_name.as_deref())
            .unwrap_or(id)
    }
}

impl Default for DestinationRoster {
    fn default() -> Self {
        Self::new(
            DEFAULT_DESTINATIONS
                .iter()
                .map(|(id, name)| Destination::new(*id, *name))
                .collect(),
        )
    }
}
