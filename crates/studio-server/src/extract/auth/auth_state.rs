//! Authenticated principal extractor.
//!
//! [`AuthState`] turns a verified bearer token into the [`Principal`] that
//! handlers pass to the role policy. The account is re-read from the store on
//! every request, so a role change or deletion takes effect immediately
//! regardless of the tokens already handed out.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use studio_core::Principal;

use super::AuthHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;
use crate::store::AccountStore;

/// Authenticated principal with its current role.
///
/// Extraction succeeds only for a valid token whose subject is an existing,
/// active, non-deleted account. The verified state is cached in the request
/// extensions.
#[derive(Debug, Clone, Copy, Deref, PartialEq, Eq)]
pub struct AuthState(pub Principal);

impl AuthState {
    /// Resolves the principal of a verified token against the store.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Unauthorized`] if the account is missing, inactive
    /// or deleted.
    pub async fn from_unverified_header(
        auth_header: AuthHeader,
        accounts: &AccountStore,
    ) -> Result<Self> {
        let auth_claims = auth_header.into_auth_claims();

        let Some(account) = accounts.find_account_by_id(auth_claims.account_id).await else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %auth_claims.account_id,
                token_id = %auth_claims.token_id,
                "authentication failed: account not found"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Account not found")
                .with_resource("authentication"));
        };

        if !account.is_usable() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %account.id,
                is_active = account.is_active,
                is_deleted = account.is_deleted(),
                "authentication failed: account not active"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Your account is no longer active")
                .with_resource("authentication"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %account.id,
            role = %account.role,
            "authentication verified"
        );
        Ok(Self(account.as_principal()))
    }

    /// Returns the authenticated principal.
    #[inline]
    pub const fn principal(&self) -> &Principal {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    AccountStore: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(*auth_state);
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let accounts = AccountStore::from_ref(state);
        let auth_state = Self::from_unverified_header(auth_header, &accounts).await?;

        parts.extensions.insert(auth_state);
        Ok(auth_state)
    }
}
