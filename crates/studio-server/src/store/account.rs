//! Account record kept by the [`AccountStore`].
//!
//! [`AccountStore`]: crate::store::AccountStore

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use studio_core::{Principal, Role, TargetAccount};
use uuid::Uuid;
use validator::Validate;

/// Display name written over a closed account.
pub const ANONYMIZED_DISPLAY_NAME: &str = "Deleted account";

/// Stored portal account.
///
/// Accounts are never removed. Administrative deletion sets `deleted_at` and
/// clears `is_active`; self-service closure also overwrites the personal
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub display_name: String,
    pub email_address: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Account {
    /// Returns whether the account has been deleted or closed.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns whether the account may act or be acted upon.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.is_deleted()
    }

    /// Returns the account as an acting principal.
    #[inline]
    pub fn as_principal(&self) -> Principal {
        Principal::new(self.id, self.role)
    }

    /// Returns the account as the target of an administrative action.
    #[inline]
    pub fn as_target(&self) -> TargetAccount {
        TargetAccount::new(self.id, self.role)
    }

    pub(crate) fn set_role(&mut self, role: Role, now: Timestamp) {
        self.role = role;
        self.updated_at = now;
    }

    pub(crate) fn soft_delete(&mut self, now: Timestamp) {
        self.is_active = false;
        self.updated_at = now;
        self.deleted_at = Some(now);
    }

    /// Overwrites personal data and deletes the account.
    pub(crate) fn anonymize(&mut self, now: Timestamp) {
        self.display_name = ANONYMIZED_DISPLAY_NAME.to_owned();
        self.email_address = anonymized_email_address(self.id);
        self.soft_delete(now);
    }
}

/// Returns the placeholder email of a closed account.
///
/// It embeds the account id so that closed accounts never collide with each
/// other on the unique email constraint.
pub fn anonymized_email_address(id: Uuid) -> String {
    format!("deleted+{id}@anonymized.invalid")
}

/// Data for creating a new account.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
    #[validate(email)]
    pub email_address: String,
    #[serde(default)]
    pub role: Role,
}

impl NewAccount {
    /// Creates a new `user` account request.
    pub fn new(display_name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email_address: email_address.into(),
            role: Role::default(),
        }
    }

    /// Sets the initial role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub(crate) fn into_account(self, now: Timestamp) -> Account {
        Account {
            id: Uuid::new_v4(),
            display_name: self.display_name.trim().to_owned(),
            email_address: normalize_email_address(&self.email_address),
            role: self.role,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Trims and lowercases an email address.
pub fn normalize_email_address(email_address: &str) -> String {
    email_address.trim().to_lowercase()
}
