//! Account response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use studio_core::{Capability, Role};
use uuid::Uuid;

use crate::store::Account;

/// Account as returned by the API.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Unique identifier of the account.
    pub account_id: Uuid,
    /// Current role of the account.
    pub role: Role,
    /// Whether the account can sign in.
    pub is_active: bool,

    /// Display name of the account holder.
    pub display_name: String,
    /// Email address associated with the account.
    pub email_address: String,

    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
    /// Timestamp when the account was deleted or closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl AccountResponse {
    /// Creates a new instance of [`AccountResponse`].
    pub fn new(account: Account) -> Self {
        Self {
            account_id: account.id,
            role: account.role,
            is_active: account.is_active,

            display_name: account.display_name,
            email_address: account.email_address,

            created_at: account.created_at,
            updated_at: account.updated_at,
            deleted_at: account.deleted_at,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::new(account)
    }
}

/// Capabilities unlocked by the caller's role.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesResponse {
    /// Role the capabilities were derived from.
    pub role: Role,
    /// Every capability the role satisfies.
    pub capabilities: Vec<Capability>,
}

/// Roles the caller may give to lower-ranked accounts.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableRolesResponse {
    /// Role of the caller.
    pub role: Role,
    /// Assignable roles, lowest first.
    pub assignable_roles: Vec<Role>,
}
