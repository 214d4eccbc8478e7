//! Application state and dependency injection.

mod account_admin;
mod config;
mod session_keys;

use studio_core::{AccountClosurePolicy, Role, RoleAuthority};

pub use crate::service::account_admin::AccountAdmin;
pub use crate::service::config::ServiceConfig;
pub use crate::service::session_keys::SessionKeys;
use crate::store::{AccountStore, NewAccount};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Tracing target for service initialization.
const TRACING_TARGET: &str = "studio_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub accounts: AccountStore,
    pub account_admin: AccountAdmin,
    pub session_keys: SessionKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Creates the bootstrap `ceo` account when one is configured and no
    /// account with that email exists yet.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;

        let accounts = AccountStore::new();
        let account_admin = AccountAdmin::new(
            accounts.clone(),
            RoleAuthority::default(),
            AccountClosurePolicy::default(),
        );

        let service_state = Self {
            accounts,
            account_admin,
            session_keys: service_config.load_session_keys()?,
        };

        if let Some(email_address) = &service_config.bootstrap_ceo_email {
            service_state
                .bootstrap_ceo(email_address, &service_config.bootstrap_ceo_name)
                .await?;
        }

        Ok(service_state)
    }

    async fn bootstrap_ceo(&self, email_address: &str, display_name: &str) -> Result<()> {
        if self.accounts.find_account_by_email(email_address).await.is_some() {
            tracing::debug!(
                target: TRACING_TARGET,
                "bootstrap ceo account already exists"
            );
            return Ok(());
        }

        let new_account = NewAccount::new(display_name, email_address).with_role(Role::Ceo);
        let account = self.accounts.create_account(new_account).await?;

        tracing::info!(
            target: TRACING_TARGET,
            account_id = %account.id,
            "bootstrap ceo account created"
        );
        Ok(())
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(accounts: AccountStore);
impl_di!(account_admin: AccountAdmin);
impl_di!(session_keys: SessionKeys);

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn bootstraps_ceo_account() -> anyhow::Result<()> {
        let config = ServiceConfig::new(SECRET).with_bootstrap_ceo("Owner@Studio.Example", "Owner");
        let state = ServiceState::from_config(&config).await?;

        let account = state.accounts.find_account_by_email("owner@studio.example").await;
        assert_eq!(account.map(|account| account.role), Some(Role::Ceo));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let config = ServiceConfig::new("short");
        assert!(ServiceState::from_config(&config).await.is_err());
    }
}
