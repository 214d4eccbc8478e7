//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod administration;
mod error;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Returns a [`Router`] with all routes and the not-found fallback.
///
/// The state is attached by the caller, see [`Router::with_state`].
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(accounts::routes())
        .merge(administration::routes())
        .fallback(fallback)
}

/// Answers unknown routes with a JSON `not_found` error.
async fn fallback() -> Response {
    ErrorKind::NotFound
        .with_message("Route not found")
        .into_response()
}
