//! Hierarchy-constrained authorization decisions.
//!
//! [`RoleAuthority`] is the one component that decides who may promote,
//! demote or delete whom. Route handlers resolve the acting principal and
//! the target account, ask the authority, and apply the mutation only when
//! the returned [`Decision`] allows it.
//!
//! # Rules
//!
//! - The supreme role (`ceo` in the default hierarchy) may assign any role to
//!   any account, itself and other supreme accounts included.
//! - Any other principal may only assign roles ranked strictly below its own,
//!   and only to accounts whose current role is ranked strictly below its own.
//!   Equal rank is always denied, so a non-supreme principal cannot re-rank
//!   its own account.
//! - Deleting an account follows the same target rule without a requested
//!   role.

use crate::{Capability, Decision, ErrorKind, Principal, Role, RoleHierarchy, TargetAccount};

/// Tracing target for authority decisions.
const TRACING_TARGET: &str = "studio_core::authority";

/// Pure decision function over an injected [`RoleHierarchy`].
///
/// The authority holds no mutable state; clones are independent and
/// concurrent calls need no coordination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAuthority {
    hierarchy: RoleHierarchy,
}

impl RoleAuthority {
    /// Creates an authority over `hierarchy`.
    #[inline]
    pub const fn new(hierarchy: RoleHierarchy) -> Self {
        Self { hierarchy }
    }

    /// Returns the hierarchy used for rank comparisons.
    #[inline]
    pub const fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// Returns whether `principal` holds the supreme role.
    #[inline]
    pub fn is_supreme(&self, principal: &Principal) -> bool {
        self.hierarchy.is_supreme(principal.role)
    }

    /// Decides whether `actor` may give `target` the `requested_role`.
    pub fn can_assign_role(
        &self,
        actor: &Principal,
        target: &TargetAccount,
        requested_role: Role,
    ) -> Decision {
        if self.is_supreme(actor) {
            tracing::debug!(
                target: TRACING_TARGET,
                actor_id = %actor.id,
                target_id = %target.id,
                requested_role = %requested_role,
                "role assignment permitted: supreme role"
            );
            return Decision::permit();
        }

        let actor_rank = self.hierarchy.rank(actor.role);
        let target_rank = self.hierarchy.rank(target.current_role);
        let requested_rank = self.hierarchy.rank(requested_role);

        if requested_rank >= actor_rank {
            tracing::warn!(
                target: TRACING_TARGET,
                actor_id = %actor.id,
                actor_role = %actor.role,
                target_id = %target.id,
                requested_role = %requested_role,
                "role assignment denied: requested role not below actor"
            );
            return Decision::deny(ErrorKind::InsufficientPrivilege);
        }

        if target_rank >= actor_rank {
            tracing::warn!(
                target: TRACING_TARGET,
                actor_id = %actor.id,
                actor_role = %actor.role,
                target_id = %target.id,
                target_role = %target.current_role,
                "role assignment denied: target not below actor"
            );
            return Decision::deny(ErrorKind::InsufficientPrivilege);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            actor_id = %actor.id,
            actor_role = %actor.role,
            target_id = %target.id,
            target_role = %target.current_role,
            requested_role = %requested_role,
            "role assignment permitted"
        );
        Decision::permit()
    }

    /// Decides whether `actor` may delete `target` through the administrative
    /// pathway.
    ///
    /// This does not cover self-service closure, see
    /// [`AccountClosurePolicy`](crate::AccountClosurePolicy).
    pub fn can_delete_account(&self, actor: &Principal, target: &TargetAccount) -> Decision {
        if self.is_supreme(actor) {
            tracing::debug!(
                target: TRACING_TARGET,
                actor_id = %actor.id,
                target_id = %target.id,
                "account deletion permitted: supreme role"
            );
            return Decision::permit();
        }

        if !self.hierarchy.outranks(actor.role, target.current_role) {
            tracing::warn!(
                target: TRACING_TARGET,
                actor_id = %actor.id,
                actor_role = %actor.role,
                target_id = %target.id,
                target_role = %target.current_role,
                "account deletion denied: target not below actor"
            );
            return Decision::deny(ErrorKind::InsufficientPrivilege);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            actor_id = %actor.id,
            target_id = %target.id,
            "account deletion permitted"
        );
        Decision::permit()
    }

    /// Returns the roles `actor` may grant, lowest first.
    ///
    /// The supreme role may grant every role; anyone else only the roles
    /// ranked strictly below its own.
    pub fn assignable_roles(&self, actor: &Principal) -> Vec<Role> {
        if self.is_supreme(actor) {
            return self.hierarchy.iter().collect();
        }

        self.hierarchy
            .iter()
            .filter(|role| self.hierarchy.outranks(actor.role, *role))
            .collect()
    }

    /// Decides whether `actor` may use `capability`.
    pub fn has_capability(&self, actor: &Principal, capability: Capability) -> Decision {
        if capability.is_permitted_by_role(actor.role, &self.hierarchy) {
            return Decision::permit();
        }

        tracing::warn!(
            target: TRACING_TARGET,
            actor_id = %actor.id,
            actor_role = %actor.role,
            capability = %capability,
            required_role = %capability.minimum_required_role(),
            "capability denied: insufficient role"
        );
        Decision::deny(ErrorKind::InsufficientPrivilege)
    }

    /// Returns every capability available to `actor`.
    pub fn capabilities_for(&self, actor: &Principal) -> Vec<Capability> {
        Capability::capabilities_for_role(actor.role, &self.hierarchy)
    }
}
