//! Transactional account administration.
//!
//! Each operation re-reads the actor and the target inside one store
//! transaction, asks the policy, and writes only if it allows the change.
//! No other writer can run between the decision and the write, so a decision
//! is never taken on a role that has since changed.

use jiff::Timestamp;
use studio_core::{AccountClosurePolicy, ErrorKind, Principal, Role, RoleAuthority};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::store::{Account, AccountStore, StoreError};

/// Account administration service.
#[derive(Debug, Clone)]
pub struct AccountAdmin {
    accounts: AccountStore,
    authority: RoleAuthority,
    closure_policy: AccountClosurePolicy,
}

impl AccountAdmin {
    /// Creates a new administration service over `accounts`.
    pub fn new(
        accounts: AccountStore,
        authority: RoleAuthority,
        closure_policy: AccountClosurePolicy,
    ) -> Self {
        Self {
            accounts,
            authority,
            closure_policy,
        }
    }

    /// Returns the role authority.
    #[inline]
    pub fn authority(&self) -> &RoleAuthority {
        &self.authority
    }

    /// Returns the self-service closure policy.
    #[inline]
    pub fn closure_policy(&self) -> &AccountClosurePolicy {
        &self.closure_policy
    }

    /// Gives the target account `requested_role` on behalf of the actor.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Inactive`] if the actor is gone or deactivated.
    /// - [`StoreError::NotFound`] if the target is gone or deleted.
    /// - [`StoreError::Policy`] if the role policy denies the change.
    pub async fn assign_role(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        requested_role: Role,
    ) -> Result<Account, StoreError> {
        let account = self
            .accounts
            .transaction(|table| -> Result<Account, StoreError> {
                let actor = table.require_actor(actor_id)?;
                let target = table.require_target(target_id)?;

                if actor.id == target.id && !self.authority.is_supreme(&actor) {
                    self.deny_own_account(&actor, "role assignment");
                    return Err(ErrorKind::InsufficientPrivilege.into_error().into());
                }

                self.authority
                    .can_assign_role(&actor, &target.as_target(), requested_role)
                    .into_result()?;

                target.set_role(requested_role, Timestamp::now());
                Ok(target.clone())
            })
            .await?;

        tracing::info!(
            target: TRACING_TARGET_AUTHORIZATION,
            actor_id = %actor_id,
            target_id = %target_id,
            role = %requested_role,
            "account role changed"
        );
        Ok(account)
    }

    /// Deletes the target account on behalf of the actor.
    ///
    /// Actors can never delete their own account here, whatever their role.
    /// Closing one's own account goes through [`Self::close_own_account`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::assign_role`].
    pub async fn delete_account(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
    ) -> Result<Account, StoreError> {
        let account = self
            .accounts
            .transaction(|table| -> Result<Account, StoreError> {
                let actor = table.require_actor(actor_id)?;
                let target = table.require_target(target_id)?;

                if actor.id == target.id {
                    self.deny_own_account(&actor, "account deletion");
                    return Err(studio_core::Error::new(
                        ErrorKind::InsufficientPrivilege,
                        "Use account closure to delete your own account",
                    )
                    .into());
                }

                self.authority
                    .can_delete_account(&actor, &target.as_target())
                    .into_result()?;

                target.soft_delete(Timestamp::now());
                Ok(target.clone())
            })
            .await?;

        tracing::info!(
            target: TRACING_TARGET_AUTHORIZATION,
            actor_id = %actor_id,
            target_id = %target_id,
            "account deleted"
        );
        Ok(account)
    }

    /// Closes the actor's own account.
    ///
    /// The account is anonymized, deactivated and marked deleted.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Inactive`] if the actor is gone or deactivated.
    /// - [`StoreError::Policy`] with `PrivilegedAccountProtected` for
    ///   administrators.
    pub async fn close_own_account(&self, actor_id: Uuid) -> Result<Account, StoreError> {
        let account = self
            .accounts
            .transaction(|table| -> Result<Account, StoreError> {
                let actor = table.require_actor(actor_id)?;
                self.closure_policy.can_self_delete(&actor).into_result()?;

                let account = table.require_target(actor_id)?;
                account.anonymize(Timestamp::now());
                Ok(account.clone())
            })
            .await?;

        tracing::info!(
            target: TRACING_TARGET_AUTHORIZATION,
            account_id = %actor_id,
            "account closed by owner"
        );
        Ok(account)
    }

    fn deny_own_account(&self, actor: &Principal, action: &str) {
        tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            actor_id = %actor.id,
            actor_role = %actor.role,
            action,
            "denied: administrative action on own account"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ANONYMIZED_DISPLAY_NAME, NewAccount};

    fn admin_service(accounts: &AccountStore) -> AccountAdmin {
        AccountAdmin::new(
            accounts.clone(),
            RoleAuthority::default(),
            AccountClosurePolicy::default(),
        )
    }

    async fn seed(accounts: &AccountStore, role: Role) -> anyhow::Result<Account> {
        let email = format!("{}@studio.example", Uuid::new_v4());
        let account = accounts
            .create_account(NewAccount::new("Seeded", email).with_role(role))
            .await?;
        Ok(account)
    }

    fn policy_kind(error: &StoreError) -> Option<ErrorKind> {
        match error {
            StoreError::Policy(error) => Some(error.kind()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn staff_promotes_tester() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let staff = seed(&accounts, Role::Staff).await?;
        let tester = seed(&accounts, Role::DevTester).await?;

        let updated = admin
            .assign_role(staff.id, tester.id, Role::Developer)
            .await?;
        assert_eq!(updated.role, Role::Developer);

        let stored = accounts.find_account_by_id(tester.id).await;
        assert_eq!(stored.map(|account| account.role), Some(Role::Developer));
        Ok(())
    }

    #[tokio::test]
    async fn denied_assignment_leaves_target_unchanged() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let staff = seed(&accounts, Role::Staff).await?;
        let other = seed(&accounts, Role::Staff).await?;

        let error = admin
            .assign_role(staff.id, other.id, Role::User)
            .await
            .unwrap_err();
        assert_eq!(policy_kind(&error), Some(ErrorKind::InsufficientPrivilege));
        assert_eq!(accounts.find_account_by_id(other.id).await, Some(other));
        Ok(())
    }

    #[tokio::test]
    async fn staff_cannot_change_own_role() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let staff = seed(&accounts, Role::Staff).await?;

        let error = admin
            .assign_role(staff.id, staff.id, Role::User)
            .await
            .unwrap_err();
        assert_eq!(policy_kind(&error), Some(ErrorKind::InsufficientPrivilege));
        Ok(())
    }

    #[tokio::test]
    async fn ceo_may_change_own_role() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let ceo = seed(&accounts, Role::Ceo).await?;

        let updated = admin.assign_role(ceo.id, ceo.id, Role::Admin).await?;
        assert_eq!(updated.role, Role::Admin);
        Ok(())
    }

    #[tokio::test]
    async fn decision_uses_current_target_role() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let ceo = seed(&accounts, Role::Ceo).await?;
        let staff = seed(&accounts, Role::Staff).await?;
        let target = seed(&accounts, Role::Developer).await?;

        admin.assign_role(ceo.id, target.id, Role::Admin).await?;

        let error = admin
            .assign_role(staff.id, target.id, Role::User)
            .await
            .unwrap_err();
        assert_eq!(policy_kind(&error), Some(ErrorKind::InsufficientPrivilege));
        Ok(())
    }

    #[tokio::test]
    async fn deleted_actor_cannot_act() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let ceo = seed(&accounts, Role::Ceo).await?;
        let staff = seed(&accounts, Role::Staff).await?;
        let user = seed(&accounts, Role::User).await?;

        admin.delete_account(ceo.id, staff.id).await?;

        let error = admin
            .assign_role(staff.id, user.id, Role::DevTester)
            .await
            .unwrap_err();
        assert!(matches!(error, StoreError::Inactive { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let ceo = seed(&accounts, Role::Ceo).await?;

        let error = admin
            .assign_role(ceo.id, Uuid::new_v4(), Role::User)
            .await
            .unwrap_err();
        assert!(matches!(error, StoreError::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn admin_deletes_staff() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let administrator = seed(&accounts, Role::Admin).await?;
        let staff = seed(&accounts, Role::Staff).await?;

        let deleted = admin.delete_account(administrator.id, staff.id).await?;
        assert!(deleted.is_deleted());
        assert!(!deleted.is_active);
        assert_eq!(deleted.display_name, staff.display_name);
        Ok(())
    }

    #[tokio::test]
    async fn staff_cannot_delete_admin() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let staff = seed(&accounts, Role::Staff).await?;
        let administrator = seed(&accounts, Role::Admin).await?;

        let error = admin
            .delete_account(staff.id, administrator.id)
            .await
            .unwrap_err();
        assert_eq!(policy_kind(&error), Some(ErrorKind::InsufficientPrivilege));
        Ok(())
    }

    #[tokio::test]
    async fn nobody_deletes_own_account_administratively() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let ceo = seed(&accounts, Role::Ceo).await?;

        let error = admin.delete_account(ceo.id, ceo.id).await.unwrap_err();
        assert_eq!(policy_kind(&error), Some(ErrorKind::InsufficientPrivilege));
        assert!(accounts.find_account_by_id(ceo.id).await.is_some_and(|a| a.is_usable()));
        Ok(())
    }

    #[tokio::test]
    async fn developer_closes_own_account() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);
        let developer = seed(&accounts, Role::Developer).await?;

        let closed = admin.close_own_account(developer.id).await?;
        assert_eq!(closed.display_name, ANONYMIZED_DISPLAY_NAME);
        assert_ne!(closed.email_address, developer.email_address);
        assert!(!closed.is_usable());

        let error = admin.close_own_account(developer.id).await.unwrap_err();
        assert!(matches!(error, StoreError::Inactive { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn administrators_cannot_close_own_account() -> anyhow::Result<()> {
        let accounts = AccountStore::new();
        let admin = admin_service(&accounts);

        for role in [Role::Admin, Role::Ceo] {
            let account = seed(&accounts, role).await?;
            let error = admin.close_own_account(account.id).await.unwrap_err();
            assert_eq!(
                policy_kind(&error),
                Some(ErrorKind::PrivilegedAccountProtected)
            );
            assert_eq!(accounts.find_account_by_id(account.id).await, Some(account));
        }
        Ok(())
    }
}
