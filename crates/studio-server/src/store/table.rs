//! Account table operated on inside a store transaction.

use std::collections::HashMap;

use jiff::Timestamp;
use studio_core::Principal;
use uuid::Uuid;
use validator::Validate;

use super::{Account, NewAccount, StoreError, normalize_email_address};

/// Accounts keyed by id.
#[derive(Debug, Clone, Default)]
pub struct AccountTable {
    accounts: HashMap<Uuid, Account>,
}

impl AccountTable {
    /// Returns the number of stored accounts, deleted ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns whether the table holds no accounts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Finds an account by id, deleted ones included.
    pub fn find_account(&self, account_id: Uuid) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    /// Finds an account by its normalized email address.
    pub fn find_account_by_email(&self, email_address: &str) -> Option<&Account> {
        let email_address = normalize_email_address(email_address);
        self.accounts
            .values()
            .find(|account| account.email_address == email_address)
    }

    /// Resolves the acting account into a principal.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Inactive`] if the account is missing, inactive or
    /// deleted.
    pub fn require_actor(&self, actor_id: Uuid) -> Result<Principal, StoreError> {
        match self.accounts.get(&actor_id) {
            Some(account) if account.is_usable() => Ok(account.as_principal()),
            _ => Err(StoreError::Inactive { id: actor_id }),
        }
    }

    /// Resolves the target of an administrative action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the account is missing, inactive or
    /// deleted.
    pub fn require_target(&mut self, target_id: Uuid) -> Result<&mut Account, StoreError> {
        match self.accounts.get_mut(&target_id) {
            Some(account) if account.is_usable() => Ok(account),
            _ => Err(StoreError::NotFound {
                resource: "account",
                id: target_id,
            }),
        }
    }

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for malformed fields and
    /// [`StoreError::Conflict`] if the email address is already taken.
    pub fn insert_account(
        &mut self,
        new_account: NewAccount,
        now: Timestamp,
    ) -> Result<Account, StoreError> {
        new_account.validate()?;

        if self.find_account_by_email(&new_account.email_address).is_some() {
            return Err(StoreError::Conflict(
                "an account with this email address already exists".into(),
            ));
        }

        let account = new_account.into_account(now);
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use studio_core::Role;

    use super::*;

    #[test]
    fn duplicate_email_conflicts_case_insensitively() {
        let mut table = AccountTable::default();
        let now = Timestamp::now();
        table
            .insert_account(NewAccount::new("Ada", "ada@studio.example"), now)
            .unwrap();

        let error = table
            .insert_account(NewAccount::new("Ada Two", "ADA@studio.example"), now)
            .unwrap_err();
        assert!(matches!(error, StoreError::Conflict(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn deleted_actor_is_inactive() {
        let mut table = AccountTable::default();
        let now = Timestamp::now();
        let account = table
            .insert_account(NewAccount::new("Ada", "ada@studio.example"), now)
            .unwrap();

        assert_eq!(
            table.require_actor(account.id).unwrap(),
            Principal::new(account.id, Role::User)
        );

        table.require_target(account.id).unwrap().soft_delete(now);
        assert!(matches!(
            table.require_actor(account.id),
            Err(StoreError::Inactive { .. })
        ));
        assert!(matches!(
            table.require_target(account.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_target_is_not_found() {
        let mut table = AccountTable::default();
        let id = Uuid::new_v4();
        assert!(matches!(
            table.require_target(id),
            Err(StoreError::NotFound { resource: "account", .. })
        ));
    }
}
