//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Observability (tracing spans, request ids, redacted headers)
//! - Recovery (panics, timeouts, middleware errors)

mod observability;
mod recovery;

pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
