//! Per-leg call status handling

use tracing::{debug, info, warn};

use crate::domain::call::{CallStatus, DestinationRoster, SipAddress};
use crate::domain::error::SipAddressError;
use crate::domain::summary::messages;

use super::ports::Notifier;

/// What happened to a status event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// A destination picked up and the notification was attempted
    Announced {
        display_name: String,
        delivered: bool,
    },
    /// Not an answer event
    Ignored(CallStatus),
    /// Answer event whose destination could not be parsed
    Unparseable(SipAddressError),
}

/// Turns answer events into "picked up" notifications
pub struct StatusTracker<N: Notifier> {
    roster: DestinationRoster,
    notifier: N,
}

impl<N: Notifier> StatusTracker<N> {
    pub fn new(roster: DestinationRoster, notifier: N) -> Self {
        Self { roster, notifier }
    }

    /// Handle one status event. Never fails; problems are logged.
    pub async fn handle(&self, to: Option<&str>, status: Option<&str>) -> StatusOutcome {
        let status = CallStatus::parse(status.unwrap_or_default());
        info!(to = to.unwrap_or_default(), status = %status, "Call status update");

        if !status.is_answered() {
            debug!(status = %status, "Ignoring non-answer status");
            return StatusOutcome::Ignored(status);
        }

        let address = match SipAddress::parse(to.unwrap_or_default()) {
            Ok(address) => address,
            Err(e) => {
                warn!(error = %e, "Could not determine which destination answered");
                return StatusOutcome::Unparseable(e);
            }
        };

        let display_name = self.roster.display_name(address.user()).to_string();
        let delivered = match self.notifier.notify(&messages::answered(&display_name)).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, destination = %display_name, "Failed to send answer notification");
                false
            }
        };

        StatusOutcome::Announced {
            display_name,
            delivered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct CapturingNotifier {
        messages: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CapturingNotifier {
        async fn notify(&self, message: &str) -> Result<(), NotificationError> {
            self.messages.lock().unwrap().push(message.to_string());
            if self.fail {
                Err(NotificationError::Rejected {
                    status: 401,
                    body: "Invalid access token".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn tracker(notifier: CapturingNotifier) -> StatusTracker<CapturingNotifier> {
        StatusTracker::new(DestinationRoster::default(), notifier)
    }

    #[tokio::test]
    async fn answered_known_destination_uses_display_name() {
        let notifier = CapturingNotifier::default();
        let outcome = tracker(notifier.clone())
            .handle(Some("sip:mobile_a@example.sip.twilio.com"), Some("answered"))
            .await;

        assert_eq!(
            outcome,
            StatusOutcome::Announced {
                display_name: "携帯A".to_string(),
                delivered: true
            }
        );
        let sent = notifier.messages.lock().unwrap().clone();
        assert_eq!(sent, vec!["\n📞 携帯A が電話に出ました！".to_string()]);
    }

    #[tokio::test]
    async fn emergency_destination_name() {
        let notifier = CapturingNotifier::default();
        let outcome = tracker(notifier)
            .handle(Some("sip:emergency@d"), Some("answered"))
            .await;
        assert!(matches!(
            outcome,
            StatusOutcome::Announced { ref display_name, .. } if display_name == "緊急用携帯"
        ));
    }

    #[tokio::test]
    async fn unknown_destination_falls_back_to_raw_id() {
        let notifier = CapturingNotifier::default();
        let outcome = tracker(notifier.clone())
            .handle(Some("sip:front_desk@d"), Some("answered"))
            .await;
        assert!(matches!(
            outcome,
            StatusOutcome::Announced { ref display_name, .. } if display_name == "front_desk"
        ));
        assert!(notifier.messages.lock().unwrap()[0].contains("front_desk"));
    }

    #[tokio::test]
    async fn other_statuses_are_ignored() {
        let notifier = CapturingNotifier::default();
        let outcome = tracker(notifier.clone())
            .handle(Some("sip:mobile_a@d"), Some("ringing"))
            .await;
        assert_eq!(outcome, StatusOutcome::Ignored(CallStatus::Ringing));
        assert!(notifier.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_ignored() {
        let notifier = CapturingNotifier::default();
        let outcome = tracker(notifier.clone()).handle(None, None).await;
        assert!(matches!(outcome, StatusOutcome::Ignored(_)));
        assert!(notifier.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_destination_is_reported_not_sent() {
        let notifier = CapturingNotifier::default();
        let outcome = tracker(notifier.clone())
            .handle(Some("not-a-sip-uri"), Some("answered"))
            .await;
        assert!(matches!(outcome, StatusOutcome::Unparseable(_)));
        assert!(notifier.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notifier_failure_is_swallowed() {
        let notifier = CapturingNotifier {
            fail: true,
            ..Default::default()
        };
        let outcome = tracker(notifier)
            .handle(Some("sip:mobile_b@d"), Some("answered"))
            .await;
        assert_eq!(
            outcome,
            StatusOutcome::Announced {
                display_name: "携帯B".to_string(),
                delivered: false
            }
        );
    }
}
