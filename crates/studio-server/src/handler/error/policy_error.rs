//! Role policy and account store errors to HTTP error conversion.

use studio_core::ErrorKind as PolicyErrorKind;

use crate::handler::{Error, ErrorKind};
use crate::store::StoreError;

/// Tracing target for policy error conversion.
const TRACING_TARGET: &str = "studio_server::handler::policy_error";

impl From<studio_core::Error> for Error<'static> {
    fn from(error: studio_core::Error) -> Self {
        match error.kind() {
            PolicyErrorKind::InvalidRole => ErrorKind::BadRequest
                .with_message(PolicyErrorKind::InvalidRole.user_message())
                .with_context(error.message().to_owned())
                .with_resource("role"),
            PolicyErrorKind::InvalidHierarchy => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "role hierarchy misconfigured"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PolicyErrorKind::InsufficientPrivilege
            | PolicyErrorKind::PrivilegedAccountProtected => ErrorKind::Forbidden
                .with_message(error.message().to_owned())
                .with_resource("account"),
        }
    }
}

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { resource, id } => ErrorKind::NotFound
                .with_message(format!("The {resource} does not exist"))
                .with_context(format!("ID: {id}"))
                .with_resource(resource),
            StoreError::Inactive { .. } => ErrorKind::Unauthorized
                .with_message("Your account is no longer active")
                .with_resource("authentication"),
            StoreError::Conflict(message) => ErrorKind::Conflict
                .with_message(message)
                .with_resource("account"),
            StoreError::Validation(errors) => errors.into(),
            StoreError::Policy(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use studio_core::Role;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn invalid_role_is_bad_request() {
        let error: Error = Role::parse("owner").unwrap_err().into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("role"));
        assert_eq!(error.context(), Some("unknown role 'owner'"));
    }

    #[test]
    fn insufficient_privilege_is_forbidden() {
        let error: Error = PolicyErrorKind::InsufficientPrivilege.into_error().into();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn protected_account_mentions_higher_administrator() {
        let error: Error = PolicyErrorKind::PrivilegedAccountProtected.into_error().into();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
        assert!(
            error
                .message()
                .is_some_and(|message| message.contains("contact a higher administrator"))
        );
    }

    #[test]
    fn store_errors_map_to_status() {
        let id = Uuid::new_v4();
        let not_found: Error = StoreError::NotFound {
            resource: "account",
            id,
        }
        .into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let inactive: Error = StoreError::Inactive { id }.into();
        assert_eq!(inactive.kind(), ErrorKind::Unauthorized);

        let conflict: Error = StoreError::Conflict("taken".into()).into();
        assert_eq!(conflict.kind(), ErrorKind::Conflict);
    }
}
