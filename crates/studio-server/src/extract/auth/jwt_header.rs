//! Bearer token extraction and verification.
//!
//! Tokens are issued outside this service and signed with the shared
//! session secret (HS256). A token only proves who the caller is; the role
//! is always read from the account store, see [`AuthState`].
//!
//! [`AuthState`]: crate::extract::AuthState

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Verified claims of the request's bearer token.
///
/// Extraction fails with:
/// - [`ErrorKind::MissingAuthToken`] without an `Authorization: Bearer` header
/// - [`ErrorKind::MalformedAuthToken`] for undecodable tokens
/// - [`ErrorKind::Unauthorized`] for bad signatures, wrong issuer or audience,
///   and expired tokens
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    /// Creates a new authentication header from verified claims.
    #[inline]
    pub const fn new(claims: AuthClaims) -> Self {
        Self {
            auth_claims: claims,
        }
    }

    /// Returns a reference to the JWT claims.
    #[inline]
    pub const fn as_auth_claims(&self) -> &AuthClaims {
        &self.auth_claims
    }

    /// Consumes this header and returns the JWT claims.
    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let session_keys = SessionKeys::from_ref(state);

        match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(TypedHeader(bearer)) => {
                let claims = AuthClaims::decode(bearer.token(), session_keys.decoding_key())?;
                let auth_header = Self::new(claims);
                parts.extensions.insert(auth_header.clone());
                Ok(auth_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_message("Authentication required")
                        .with_context("Missing Authorization header with Bearer token")
                        .with_resource("authentication"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_message("Invalid token format")
                        .with_context("Authorization header must contain a valid Bearer token")
                        .with_resource("authentication"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Authentication processing failed")
                        .with_resource("authentication"),
                };
                Err(error)
            }
        }
    }
}

/// JWT claims of a session token.
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Token issuer identifier |
/// | `aud` | `audience` | Token audience identifier |
/// | `jti` | `token_id` | Unique token identifier |
/// | `sub` | `account_id` | Account this token represents |
/// | `iat` | `issued_at` | Issue time, seconds since the Unix epoch |
/// | `exp` | `expires_at` | Expiry time, seconds since the Unix epoch |
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    #[serde(rename = "jti")]
    pub token_id: Uuid,
    #[serde(rename = "sub")]
    pub account_id: Uuid,

    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl AuthClaims {
    /// JWT audience identifier for session tokens.
    pub const JWT_AUDIENCE: &str = "studio:portal";
    /// JWT issuer identifier for session tokens.
    pub const JWT_ISSUER: &str = "studio";

    /// Creates claims for `account_id` valid for `lifetime` from now.
    pub fn new(account_id: Uuid, lifetime: SignedDuration) -> Self {
        let issued_at = Timestamp::now().as_second();
        Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            account_id,
            issued_at,
            expires_at: issued_at.saturating_add(lifetime.as_secs()),
        }
    }

    /// Returns whether the token has expired.
    ///
    /// Matches the check [`Self::decode`] applies: no leeway, and a token is
    /// still valid during its `exp` second.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at < Timestamp::now().as_second()
    }

    /// Signs the claims into a compact token.
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails.
    pub fn encode(&self, encoding_key: &EncodingKey) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), self, encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %self.account_id,
                "failed to encode session token"
            );
            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_resource("authentication")
        })
    }

    /// Verifies `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns an authentication error for any invalid token.
    pub fn decode(token: &str, decoding_key: &DecodingKey) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.validate_nbf = false;
        validation.validate_aud = true;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "exp"]);

        let claims = decode::<Self>(token, decoding_key, &validation)
            .map_err(|e| {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %e,
                    "session token rejected"
                );
                Error::from(e)
            })?
            .claims;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            token_id = %claims.token_id,
            account_id = %claims.account_id,
            "session token verified"
        );
        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        let error = match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Your session has expired")
                .with_context("Please sign in again to continue"),
            JwtErrorKind::InvalidToken => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is invalid")
                .with_context("The provided token format is unrecognized"),
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed")
                .with_context("Token signature could not be verified"),
            JwtErrorKind::InvalidAlgorithm => ErrorKind::MalformedAuthToken
                .with_message("Authentication token uses unsupported format")
                .with_context("Token was signed with an incompatible algorithm"),
            JwtErrorKind::InvalidAudience => ErrorKind::Unauthorized
                .with_message("Authentication token is not valid for this service")
                .with_context("Token was issued for a different application"),
            JwtErrorKind::InvalidIssuer => ErrorKind::Unauthorized
                .with_message("Authentication token is from an untrusted source")
                .with_context("Token was not issued by this authentication system"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is incomplete")
                .with_context(format!("Token is missing required field: {}", claim)),
            JwtErrorKind::Base64(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token format is corrupted")
                .with_context("Token contains invalid base64 encoding"),
            JwtErrorKind::Json(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token structure is invalid")
                .with_context("Token payload contains malformed data"),
            _ => ErrorKind::InternalServerError
                .with_message("Authentication processing failed")
                .with_context("An unexpected error occurred during token validation"),
        };
        error.with_resource("authentication")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn keys() -> SessionKeys {
        SessionKeys::from_secret(SECRET).unwrap()
    }

    #[test]
    fn claims_survive_signing() -> anyhow::Result<()> {
        let keys = keys();
        let claims = AuthClaims::new(Uuid::new_v4(), SignedDuration::from_hours(1));
        let token = claims.encode(keys.encoding_key())?;

        let decoded = AuthClaims::decode(&token, keys.decoding_key())?;
        assert_eq!(decoded, claims);
        Ok(())
    }

    #[test]
    fn expired_token_is_unauthorized() -> anyhow::Result<()> {
        let keys = keys();
        let mut claims = AuthClaims::new(Uuid::new_v4(), SignedDuration::ZERO);
        claims.issued_at -= 7200;
        claims.expires_at -= 3600;
        let token = claims.encode(keys.encoding_key())?;

        let error = AuthClaims::decode(&token, keys.decoding_key()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn recently_expired_token_has_no_grace_period() -> anyhow::Result<()> {
        let keys = keys();
        let mut claims = AuthClaims::new(Uuid::new_v4(), SignedDuration::ZERO);
        claims.issued_at -= 120;
        claims.expires_at -= 30;
        assert!(claims.is_expired());
        let token = claims.encode(keys.encoding_key())?;

        let error = AuthClaims::decode(&token, keys.decoding_key()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert_eq!(error.message(), Some("Your session has expired"));
        Ok(())
    }

    #[test]
    fn foreign_secret_is_unauthorized() -> anyhow::Result<()> {
        let other = SessionKeys::from_secret(b"ffffffffffffffffffffffffffffffff")?;
        let claims = AuthClaims::new(Uuid::new_v4(), SignedDuration::from_hours(1));
        let token = claims.encode(other.encoding_key())?;

        let error = AuthClaims::decode(&token, keys().decoding_key()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn wrong_audience_is_unauthorized() -> anyhow::Result<()> {
        let keys = keys();
        let mut claims = AuthClaims::new(Uuid::new_v4(), SignedDuration::from_hours(1));
        claims.audience = "someone:else".to_owned();
        let token = claims.encode(keys.encoding_key())?;

        let error = AuthClaims::decode(&token, keys.decoding_key()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn garbage_token_is_malformed() {
        let error = AuthClaims::decode("not-a-token", keys().decoding_key()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }
}
