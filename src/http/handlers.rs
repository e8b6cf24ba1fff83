//! Webhook handlers

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use serde::Deserialize;
use tracing::warn;

use super::state::AppState;
use super::twiml::Twiml;

/// Fields of a per-leg status callback
#[derive(Debug, Default, Deserialize)]
pub struct StatusCallbackForm {
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "CallStatus")]
    pub call_status: Option<String>,
}

/// Fields of the dial action callback
#[derive(Debug, Default, Deserialize)]
pub struct GatherResultForm {
    #[serde(rename = "RecordingUrl")]
    pub recording_url: Option<String>,
}

/// Unpack a form, falling back to an empty one so the webhook never fails
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>, endpoint: &str) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(endpoint, error = %rejection, "Unreadable webhook body");
            T::default()
        }
    }
}

/// `POST /voice`
pub async fn voice(State(state): State<Arc<AppState>>) -> Twiml {
    Twiml(state.router.route_inbound())
}

/// `POST /status_callback`
pub async fn status_callback(
    State(state): State<Arc<AppState>>,
    form: Result<Form<StatusCallbackForm>, FormRejection>,
) -> &'static str {
    let form = form_or_default(form, "status_callback");
    state
        .status_tracker
        .handle(form.to.as_deref(), form.call_status.as_deref())
        .await;
    "OK"
}

/// `POST /gather_result`
pub async fn gather_result(
    State(state): State<Arc<AppState>>,
    form: Result<Form<GatherResultForm>, FormRejection>,
) -> Twiml {
    let form = form_or_default(form, "gather_result");
    Twiml(state.completion.complete(form.recording_url.as_deref()))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
