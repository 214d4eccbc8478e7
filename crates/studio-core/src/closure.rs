//! Self-service account closure rule.
//!
//! Closing one's own account is a different action from an administrator
//! deleting someone else: the record is anonymized and deactivated, never
//! removed, and the only restriction is that administrators cannot close
//! their own accounts. They have to be removed by another administrator.

use crate::{Decision, ErrorKind, Principal, Role};

/// Tracing target for account closure decisions.
const TRACING_TARGET: &str = "studio_core::closure";

/// Decides whether a principal may close its own account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountClosurePolicy {
    protected_roles: Vec<Role>,
}

impl AccountClosurePolicy {
    /// Creates a policy that protects `protected_roles` from self-closure.
    pub fn new(protected_roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            protected_roles: protected_roles.into_iter().collect(),
        }
    }

    /// Returns the roles that cannot close their own accounts.
    #[inline]
    pub fn protected_roles(&self) -> &[Role] {
        &self.protected_roles
    }

    /// Decides whether `actor` may close its own account.
    pub fn can_self_delete(&self, actor: &Principal) -> Decision {
        if self.protected_roles.contains(&actor.role) {
            tracing::warn!(
                target: TRACING_TARGET,
                actor_id = %actor.id,
                actor_role = %actor.role,
                "self-service closure denied: privileged account"
            );
            return Decision::deny(ErrorKind::PrivilegedAccountProtected);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            actor_id = %actor.id,
            actor_role = %actor.role,
            "self-service closure permitted"
        );
        Decision::permit()
    }
}

impl Default for AccountClosurePolicy {
    /// Protects `admin` and `ceo`.
    fn default() -> Self {
        Self::new(Role::ALL.into_iter().filter(|role| role.is_administrator()))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn developer_may_close_own_account() {
        let policy = AccountClosurePolicy::default();
        let actor = Principal::new(Uuid::new_v4(), Role::Developer);
        assert_eq!(policy.can_self_delete(&actor), Decision::permit());
    }

    #[test]
    fn ceo_may_not_close_own_account() {
        let policy = AccountClosurePolicy::default();
        let actor = Principal::new(Uuid::new_v4(), Role::Ceo);
        assert_eq!(
            policy.can_self_delete(&actor),
            Decision::deny(ErrorKind::PrivilegedAccountProtected)
        );
    }

    #[test]
    fn only_administrators_are_protected() {
        let policy = AccountClosurePolicy::default();
        for role in Role::iter() {
            let decision = policy.can_self_delete(&Principal::new(Uuid::new_v4(), role));
            if matches!(role, Role::Admin | Role::Ceo) {
                assert_eq!(decision.reason(), Some(ErrorKind::PrivilegedAccountProtected));
            } else {
                assert!(decision.is_allowed(), "role: {role}");
            }
        }
    }

    #[test]
    fn default_protected_roles() {
        let policy = AccountClosurePolicy::default();
        assert_eq!(policy.protected_roles(), [Role::Admin, Role::Ceo]);
    }
}
