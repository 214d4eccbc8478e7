//! Authentication extractors.
//!
//! - [`AuthHeader`] verifies the bearer token
//! - [`AuthClaims`] holds the token's claims
//! - [`AuthState`] resolves the token's subject into a [`Principal`]
//!
//! [`Principal`]: studio_core::Principal

mod auth_state;
mod jwt_header;

pub use self::auth_state::AuthState;
pub use self::jwt_header::{AuthClaims, AuthHeader};
