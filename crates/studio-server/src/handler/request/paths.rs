//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for account administration.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPathParams {
    /// Unique identifier of the target account.
    pub account_id: Uuid,
}
