#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;
pub mod store;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

/// Tracing target for bearer token verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "studio_server::authentication";

/// Tracing target for role and account administration decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "studio_server::authorization";

/// Tracing target for the account store.
pub const TRACING_TARGET_STORE: &str = "studio_server::store";
