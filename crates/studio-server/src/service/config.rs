use std::fmt;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::service::SessionKeys;
use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Display name of the bootstrap `ceo` account.
    pub fn bootstrap_ceo_name() -> String {
        "Studio Owner".to_owned()
    }
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Shared secret used to verify session tokens (at least 32 bytes).
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "SESSION_SECRET", hide_env_values = true)
    )]
    pub session_secret: String,

    /// Email address of the `ceo` account created at startup when the store
    /// has no account with that address.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "BOOTSTRAP_CEO_EMAIL")
    )]
    #[serde(default)]
    pub bootstrap_ceo_email: Option<String>,

    /// Display name of the bootstrap `ceo` account.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "BOOTSTRAP_CEO_NAME", default_value = "Studio Owner")
    )]
    #[serde(default = "defaults::bootstrap_ceo_name")]
    pub bootstrap_ceo_name: String,
}

impl ServiceConfig {
    /// Creates a configuration with the given session secret and no
    /// bootstrap account.
    pub fn new(session_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
            bootstrap_ceo_email: None,
            bootstrap_ceo_name: defaults::bootstrap_ceo_name(),
        }
    }

    /// Sets the bootstrap `ceo` account.
    pub fn with_bootstrap_ceo(
        mut self,
        email_address: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.bootstrap_ceo_email = Some(email_address.into());
        self.bootstrap_ceo_name = display_name.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a short session secret or an empty
    /// bootstrap name.
    pub fn validate(&self) -> Result<()> {
        if self.session_secret.len() < SessionKeys::MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "SESSION_SECRET must be at least {} bytes long",
                SessionKeys::MIN_SECRET_LEN
            )));
        }

        if self.bootstrap_ceo_email.is_some() && self.bootstrap_ceo_name.trim().is_empty() {
            return Err(Error::config("BOOTSTRAP_CEO_NAME cannot be empty"));
        }

        Ok(())
    }

    /// Derives the session keys from the configured secret.
    pub fn load_session_keys(&self) -> Result<SessionKeys> {
        SessionKeys::from_secret(self.session_secret.as_bytes())
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("session_secret", &"<redacted>")
            .field("bootstrap_ceo_email", &self.bootstrap_ceo_email)
            .field("bootstrap_ceo_name", &self.bootstrap_ceo_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[clap(flatten)]
        service: ServiceConfig,
    }

    #[test]
    fn parses_from_arguments() {
        let cli = TestCli::parse_from([
            "studio",
            "--session-secret",
            "0123456789abcdef0123456789abcdef",
            "--bootstrap-ceo-email",
            "owner@studio.example",
        ]);

        assert_eq!(
            cli.service.bootstrap_ceo_email.as_deref(),
            Some("owner@studio.example")
        );
        assert_eq!(cli.service.bootstrap_ceo_name, "Studio Owner");
        assert!(cli.service.validate().is_ok());
    }

    #[test]
    fn short_secret_is_invalid() {
        let config = ServiceConfig::new("short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_bootstrap_name_is_invalid() {
        let config = ServiceConfig::new("0123456789abcdef0123456789abcdef")
            .with_bootstrap_ceo("owner@studio.example", "  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ServiceConfig::new("0123456789abcdef0123456789abcdef");
        assert!(!format!("{config:?}").contains("0123456789abcdef"));
    }
}
