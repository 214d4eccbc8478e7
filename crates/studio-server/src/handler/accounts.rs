//! Handlers for the authenticated caller's own account.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{AuthState, Json};
use crate::handler::response::{AccountResponse, AssignableRolesResponse, CapabilitiesResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{AccountAdmin, ServiceState};
use crate::store::AccountStore;

/// Tracing target for own-account operations.
const TRACING_TARGET: &str = "studio_server::handler::accounts";

/// Returns the caller's account.
async fn get_own_account(
    State(accounts): State<AccountStore>,
    AuthState(principal): AuthState,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    let Some(account) = accounts.find_account_by_id(principal.id).await else {
        return Err(ErrorKind::NotFound
            .with_message("Account not found")
            .with_resource("account"));
    };

    tracing::debug!(
        target: TRACING_TARGET,
        account_id = %principal.id,
        "account read"
    );
    Ok((StatusCode::OK, Json(account.into())))
}

/// Lists the capabilities unlocked by the caller's role.
async fn list_own_capabilities(
    State(account_admin): State<AccountAdmin>,
    AuthState(principal): AuthState,
) -> Result<(StatusCode, Json<CapabilitiesResponse>)> {
    let capabilities = account_admin.authority().capabilities_for(&principal);

    tracing::debug!(
        target: TRACING_TARGET,
        account_id = %principal.id,
        role = %principal.role,
        count = capabilities.len(),
        "capabilities listed"
    );

    let response = CapabilitiesResponse {
        role: principal.role,
        capabilities,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Lists the roles the caller may grant.
async fn list_assignable_roles(
    State(account_admin): State<AccountAdmin>,
    AuthState(principal): AuthState,
) -> Result<(StatusCode, Json<AssignableRolesResponse>)> {
    let assignable_roles = account_admin.authority().assignable_roles(&principal);

    let response = AssignableRolesResponse {
        role: principal.role,
        assignable_roles,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Closes the caller's account.
///
/// The account is anonymized and deactivated. Administrators are refused and
/// must ask a higher administrator to delete them.
async fn close_own_account(
    State(account_admin): State<AccountAdmin>,
    AuthState(principal): AuthState,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    tracing::info!(
        target: TRACING_TARGET,
        account_id = %principal.id,
        role = %principal.role,
        "Closing own account"
    );

    let account = account_admin.close_own_account(principal.id).await?;
    Ok((StatusCode::OK, Json(account.into())))
}

/// Returns routes for the caller's own account.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/me", get(get_own_account).delete(close_own_account))
        .route("/me/capabilities", get(list_own_capabilities))
        .route("/me/assignable-roles", get(list_assignable_roles))
}
