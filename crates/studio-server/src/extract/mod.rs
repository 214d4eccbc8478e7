//! HTTP request extractors.
//!
//! ## Authentication
//!
//! - [`AuthHeader`] - bearer token extraction and verification
//! - [`AuthClaims`] - session token claims
//! - [`AuthState`] - authenticated principal re-read from the account store
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON deserialization with structured rejections
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] - path parameter extraction with structured rejections

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState};
pub use crate::extract::reject::{Json, Path, ValidateJson};
