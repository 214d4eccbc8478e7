//! Decision inputs: the acting principal and the account it targets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, Role};

/// The authenticated account initiating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Account identifier.
    pub id: Uuid,
    /// Role held at the time of the decision.
    pub role: Role,
}

impl Principal {
    /// Creates a new principal.
    #[inline]
    pub const fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    /// Creates a principal from an untyped role name.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRole`] if `role` is not a known role.
    ///
    /// [`ErrorKind::InvalidRole`]: crate::ErrorKind::InvalidRole
    pub fn parse(id: Uuid, role: &str) -> Result<Self> {
        Ok(Self::new(id, Role::parse(role)?))
    }

    /// Returns whether this principal is acting on its own account.
    #[inline]
    pub fn is_same_account(&self, target: &TargetAccount) -> bool {
        self.id == target.id
    }
}

/// The account being read or mutated by a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAccount {
    /// Account identifier.
    pub id: Uuid,
    /// Role the account holds before the change.
    pub current_role: Role,
}

impl TargetAccount {
    /// Creates a new target account.
    #[inline]
    pub const fn new(id: Uuid, current_role: Role) -> Self {
        Self { id, current_role }
    }

    /// Creates a target account from an untyped role name.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRole`] if `current_role` is not a known role.
    ///
    /// [`ErrorKind::InvalidRole`]: crate::ErrorKind::InvalidRole
    pub fn parse(id: Uuid, current_role: &str) -> Result<Self> {
        Ok(Self::new(id, Role::parse(current_role)?))
    }
}

impl From<Principal> for TargetAccount {
    fn from(principal: Principal) -> Self {
        Self::new(principal.id, principal.role)
    }
}
