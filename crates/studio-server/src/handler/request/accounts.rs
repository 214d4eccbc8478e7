//! Account request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to change an account's role.
///
/// The role is taken as a string so that an unknown value is reported as an
/// invalid role rather than a generic body error.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRole {
    /// Requested role, in its snake_case wire form.
    pub role: String,

    /// Optional reason for the role change, recorded in the logs.
    #[validate(length(max = 300))]
    pub reason: Option<String>,
}
