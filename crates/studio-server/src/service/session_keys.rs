//! Shared-secret keys for session token verification.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::{Error, Result};

/// Tracing target for session key handling.
const TRACING_TARGET: &str = "studio_server::session_keys";

/// HMAC keys derived from the session secret.
///
/// Cloning is cheap; all clones share the same keys.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionKeys {
    /// Minimum accepted length of the session secret in bytes.
    pub const MIN_SECRET_LEN: usize = 32;

    /// Derives the keys from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret is shorter than
    /// [`Self::MIN_SECRET_LEN`].
    pub fn from_secret(secret: &[u8]) -> Result<Self> {
        if secret.len() < Self::MIN_SECRET_LEN {
            tracing::error!(
                target: TRACING_TARGET,
                length = secret.len(),
                minimum = Self::MIN_SECRET_LEN,
                "session secret is too short",
            );
            return Err(Error::config(format!(
                "session secret must be at least {} bytes long",
                Self::MIN_SECRET_LEN
            )));
        }

        let inner = Arc::new(SessionKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
        });

        tracing::info!(target: TRACING_TARGET, "session keys loaded");
        Ok(Self { inner })
    }

    /// Returns the key used to verify tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}
