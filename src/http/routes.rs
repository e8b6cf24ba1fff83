use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;
use crate::application::{COMPLETION_PATH, STATUS_CALLBACK_PATH};

/// Create the webhook router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/voice", post(handlers::voice))
        .route(STATUS_CALLBACK_PATH, post(handlers::status_callback))
        .route(COMPLETION_PATH, post(handlers::gather_result))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
