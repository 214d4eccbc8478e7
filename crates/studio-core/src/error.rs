//! Policy error types.
//!
//! Every failure produced here is a deterministic function of its input, so
//! none of them are worth retrying. [`ErrorKind`] is also used on its own as
//! the denial reason of a [`Decision`].
//!
//! [`Decision`]: crate::Decision

use std::borrow::Cow;
use std::fmt;

/// Result type alias for policy operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing policy errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A role value is not a member of the closed role set.
    InvalidRole,
    /// A role hierarchy is missing a role or lists one twice.
    InvalidHierarchy,
    /// The rank comparison failed for the acting principal.
    InsufficientPrivilege,
    /// Self-service closure was attempted by an administrator.
    PrivilegedAccountProtected,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRole => "invalid_role",
            Self::InvalidHierarchy => "invalid_hierarchy",
            Self::InsufficientPrivilege => "insufficient_privilege",
            Self::PrivilegedAccountProtected => "privileged_account_protected",
        }
    }

    /// Returns whether this kind describes malformed input rather than a
    /// permission failure.
    #[must_use]
    pub const fn is_malformed_input(self) -> bool {
        matches!(self, Self::InvalidRole | Self::InvalidHierarchy)
    }

    /// Returns the message shown to the user when an action is rejected.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InvalidRole => "The requested role does not exist",
            Self::InvalidHierarchy => "The role hierarchy is misconfigured",
            Self::InsufficientPrivilege => {
                "You don't have a high enough role to change this account"
            }
            Self::PrivilegedAccountProtected => {
                "Administrator accounts can't be closed by their owner, contact a higher administrator"
            }
        }
    }

    /// Creates an [`Error`] of this kind with its default user message.
    #[inline]
    pub fn into_error(self) -> Error {
        Error::new(self, self.user_message())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy error with structured information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

impl Error {
    /// Creates a new [`Error`].
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an error for a role value outside the closed set.
    pub fn invalid_role(value: &str) -> Self {
        Self::new(ErrorKind::InvalidRole, format!("unknown role '{value}'"))
    }

    /// Creates an error for a malformed role hierarchy.
    pub fn invalid_hierarchy(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidHierarchy, message)
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        kind.into_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_role_mentions_value() {
        let error = Error::invalid_role("superuser");
        assert_eq!(error.kind(), ErrorKind::InvalidRole);
        assert!(error.message().contains("superuser"));
        assert!(error.to_string().starts_with("invalid_role"));
    }

    #[test]
    fn error_from_kind_uses_user_message() {
        let error = Error::from(ErrorKind::PrivilegedAccountProtected);
        assert_eq!(error.kind(), ErrorKind::PrivilegedAccountProtected);
        assert!(error.message().contains("contact a higher administrator"));
    }

    #[test]
    fn malformed_input_kinds() {
        assert!(ErrorKind::InvalidRole.is_malformed_input());
        assert!(ErrorKind::InvalidHierarchy.is_malformed_input());
        assert!(!ErrorKind::InsufficientPrivilege.is_malformed_input());
        assert!(!ErrorKind::PrivilegedAccountProtected.is_malformed_input());
    }

    #[test]
    fn error_kind_as_str() {
        assert_eq!(ErrorKind::InvalidRole.as_str(), "invalid_role");
        assert_eq!(ErrorKind::InvalidHierarchy.as_str(), "invalid_hierarchy");
        assert_eq!(
            ErrorKind::InsufficientPrivilege.as_str(),
            "insufficient_privilege"
        );
        assert_eq!(
            ErrorKind::PrivilegedAccountProtected.as_str(),
            "privileged_account_protected"
        );
    }
}
