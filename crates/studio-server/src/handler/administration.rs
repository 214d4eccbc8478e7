//! Account administration handlers.
//!
//! Role changes and deletions of other accounts. Every decision is taken by
//! the role policy inside a store transaction, so these handlers only parse
//! the request and log the outcome.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, patch};
use studio_core::Role;

use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{AccountPathParams, UpdateAccountRole};
use crate::handler::response::AccountResponse;
use crate::service::{AccountAdmin, ServiceState};

/// Tracing target for account administration operations.
const TRACING_TARGET: &str = "studio_server::handler::administration";

/// Changes another account's role.
async fn update_account_role(
    State(account_admin): State<AccountAdmin>,
    AuthState(principal): AuthState,
    Path(path_params): Path<AccountPathParams>,
    ValidateJson(request): ValidateJson<UpdateAccountRole>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    let requested_role = Role::parse(&request.role)?;

    tracing::info!(
        target: TRACING_TARGET,
        actor_id = %principal.id,
        actor_role = %principal.role,
        target_id = %path_params.account_id,
        requested_role = %requested_role,
        reason = request.reason.as_deref(),
        "Updating account role"
    );

    let account = account_admin
        .assign_role(principal.id, path_params.account_id, requested_role)
        .await?;

    Ok((StatusCode::OK, Json(account.into())))
}

/// Deletes another account.
async fn delete_account(
    State(account_admin): State<AccountAdmin>,
    AuthState(principal): AuthState,
    Path(path_params): Path<AccountPathParams>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    tracing::info!(
        target: TRACING_TARGET,
        actor_id = %principal.id,
        actor_role = %principal.role,
        target_id = %path_params.account_id,
        "Deleting account"
    );

    let account = account_admin
        .delete_account(principal.id, path_params.account_id)
        .await?;

    Ok((StatusCode::OK, Json(account.into())))
}

/// Returns routes for account administration.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/accounts/{accountId}/role", patch(update_account_role))
        .route("/accounts/{accountId}", delete(delete_account))
}
