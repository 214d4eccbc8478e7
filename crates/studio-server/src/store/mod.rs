//! In-memory account store.
//!
//! Every write goes through [`AccountStore::transaction`], which holds the
//! write lock for the whole read-decide-write sequence and works on a staged
//! copy of the table. The copy replaces the live table only when the closure
//! returns `Ok`, so a denied or failed operation leaves no trace.

mod account;
mod table;

use std::borrow::Cow;
use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

pub use self::account::{
    ANONYMIZED_DISPLAY_NAME, Account, NewAccount, anonymized_email_address,
    normalize_email_address,
};
pub use self::table::AccountTable;
use crate::TRACING_TARGET_STORE;

/// Account store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced record does not exist or has been deleted.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: Uuid },
    /// The acting account no longer exists or has been deactivated.
    #[error("account {id} is inactive")]
    Inactive { id: Uuid },
    /// The write conflicts with existing data.
    #[error("conflict: {0}")]
    Conflict(Cow<'static, str>),
    /// The new record is malformed.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    /// The role policy denied the operation.
    #[error(transparent)]
    Policy(#[from] studio_core::Error),
}

/// Shared handle to the account table.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    table: Arc<RwLock<AccountTable>>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against a staged copy of the table under the write lock.
    ///
    /// The staged copy is committed only if `f` returns `Ok`.
    pub async fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut AccountTable) -> Result<T, E>,
    {
        let mut table = self.table.write().await;
        let mut staged = table.clone();

        match f(&mut staged) {
            Ok(output) => {
                *table = staged;
                Ok(output)
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET_STORE,
                    "transaction rolled back"
                );
                Err(error)
            }
        }
    }

    /// Creates an account.
    pub async fn create_account(&self, new_account: NewAccount) -> Result<Account, StoreError> {
        let account = self
            .transaction(|table| table.insert_account(new_account, Timestamp::now()))
            .await?;

        tracing::info!(
            target: TRACING_TARGET_STORE,
            account_id = %account.id,
            role = %account.role,
            "account created"
        );
        Ok(account)
    }

    /// Finds an account by id, deleted ones included.
    pub async fn find_account_by_id(&self, account_id: Uuid) -> Option<Account> {
        self.table.read().await.find_account(account_id).cloned()
    }

    /// Finds an account by email address.
    pub async fn find_account_by_email(&self, email_address: &str) -> Option<Account> {
        self.table
            .read()
            .await
            .find_account_by_email(email_address)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use studio_core::Role;

    use super::*;

    #[tokio::test]
    async fn create_and_find_account() -> anyhow::Result<()> {
        let store = AccountStore::new();
        let account = store
            .create_account(NewAccount::new("Ada", "Ada@Studio.Example"))
            .await?;

        assert_eq!(store.find_account_by_id(account.id).await, Some(account.clone()));
        assert_eq!(
            store.find_account_by_email("ada@studio.example").await,
            Some(account)
        );
        Ok(())
    }

    #[tokio::test]
    async fn failed_transaction_discards_changes() -> anyhow::Result<()> {
        let store = AccountStore::new();
        let account = store
            .create_account(NewAccount::new("Ada", "ada@studio.example"))
            .await?;

        let result: Result<(), StoreError> = store
            .transaction(|table| {
                table
                    .require_target(account.id)?
                    .set_role(Role::Admin, Timestamp::now());
                Err(StoreError::Conflict("abort".into()))
            })
            .await;
        assert!(result.is_err());

        let stored = store.find_account_by_id(account.id).await;
        assert_eq!(stored.map(|account| account.role), Some(Role::User));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_new_account_is_rejected() {
        let store = AccountStore::new();
        let error = store
            .create_account(NewAccount::new("Ada", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(error, StoreError::Validation(_)));
    }
}
