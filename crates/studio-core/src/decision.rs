//! Authorization decision returned by every policy check.

use crate::{Error, ErrorKind, Result};

/// Outcome of a policy check.
///
/// A decision has no side effects. When `allowed` is `false`, `reason` holds
/// the kind of denial and the caller must not apply any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "decisions do nothing unless checked"]
pub struct Decision {
    /// Whether the action may proceed.
    pub allowed: bool,
    /// Why the action was denied, `None` when allowed.
    pub reason: Option<ErrorKind>,
}

impl Decision {
    /// Creates a decision that permits the action.
    #[inline]
    pub const fn permit() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// Creates a decision that denies the action for `reason`.
    #[inline]
    pub const fn deny(reason: ErrorKind) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Returns whether the action may proceed.
    #[inline]
    pub const fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Returns the denial reason, if any.
    #[inline]
    pub const fn reason(&self) -> Option<ErrorKind> {
        self.reason
    }

    /// Converts the decision into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of the denial kind carrying its user message.
    pub fn into_result(self) -> Result<()> {
        if self.allowed {
            return Ok(());
        }

        let kind = self.reason.unwrap_or(ErrorKind::InsufficientPrivilege);
        Err(Error::from(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permit_converts_to_ok() {
        let decision = Decision::permit();
        assert!(decision.is_allowed());
        assert_eq!(decision.reason(), None);
        assert!(decision.into_result().is_ok());
    }

    #[test]
    fn deny_converts_to_error_of_same_kind() {
        let decision = Decision::deny(ErrorKind::PrivilegedAccountProtected);
        assert!(!decision.is_allowed());

        let error = decision.into_result().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PrivilegedAccountProtected);
    }

    #[test]
    fn denial_without_reason_is_still_an_error() {
        let decision = Decision {
            allowed: false,
            reason: None,
        };
        let error = decision.into_result().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InsufficientPrivilege);
    }
}
