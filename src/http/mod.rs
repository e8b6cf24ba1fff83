//! HTTP layer - webhook endpoints
//!
//! Thin axum handlers that extract provider form posts, call into the
//! application use cases and render their results.

pub mod handlers;
pub mod routes;
pub mod state;
pub mod twiml;

pub use routes::create_router;
pub use state::AppState;
pub use twiml::Twiml;
