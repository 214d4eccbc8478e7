//! Portal areas gated by role.
//!
//! Every dashboard and workflow of the portal checks one [`Capability`]
//! instead of carrying its own list of allowed roles.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{Role, RoleHierarchy};

/// Portal capability unlocked by a minimum role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    // Community
    /// Can file bug reports.
    ReportBugs,
    /// Can sign up for scheduled playtests.
    JoinPlaytests,

    // Testing
    /// Can download distributed test builds.
    DownloadBuilds,
    /// Can triage and reassign bug reports.
    TriageBugs,

    // Development
    /// Can upload and distribute builds.
    PublishBuilds,

    // Staff
    /// Can open the staff dashboards.
    ViewStaffDashboard,
    /// Can create and edit playtest sessions.
    SchedulePlaytests,
    /// Can change roles of, and delete, lower-ranked accounts.
    ManageAccounts,

    // Administration
    /// Can read finance reports.
    ViewFinance,
    /// Can record ledger entries.
    ManageLedger,
    /// Can draft, send and countersign contracts.
    ManageContracts,
}

impl Capability {
    /// Returns the minimum role required for this capability.
    #[must_use]
    pub const fn minimum_required_role(self) -> Role {
        match self {
            Self::ReportBugs | Self::JoinPlaytests => Role::User,

            Self::DownloadBuilds | Self::TriageBugs => Role::DevTester,

            Self::PublishBuilds => Role::Developer,

            Self::ViewStaffDashboard | Self::SchedulePlaytests | Self::ManageAccounts => {
                Role::Staff
            }

            Self::ViewFinance | Self::ManageLedger | Self::ManageContracts => Role::Admin,
        }
    }

    /// Checks if `role` satisfies this capability under `hierarchy`.
    pub fn is_permitted_by_role(self, role: Role, hierarchy: &RoleHierarchy) -> bool {
        hierarchy.is_at_least(role, self.minimum_required_role())
    }

    /// Returns all capabilities available to `role`.
    pub fn capabilities_for_role(role: Role, hierarchy: &RoleHierarchy) -> Vec<Self> {
        Self::iter()
            .filter(|capability| capability.is_permitted_by_role(role, hierarchy))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_only_gets_community_capabilities() {
        let hierarchy = RoleHierarchy::default();
        assert_eq!(
            Capability::capabilities_for_role(Role::User, &hierarchy),
            [Capability::ReportBugs, Capability::JoinPlaytests]
        );
    }

    #[test]
    fn staff_dashboard_requires_staff_role() {
        let hierarchy = RoleHierarchy::default();
        for role in Role::iter() {
            assert_eq!(
                Capability::ViewStaffDashboard.is_permitted_by_role(role, &hierarchy),
                role.is_staff(),
                "role: {role}"
            );
        }
    }

    #[test]
    fn ceo_gets_everything() {
        let hierarchy = RoleHierarchy::default();
        let all: Vec<Capability> = Capability::iter().collect();
        assert_eq!(Capability::capabilities_for_role(Role::Ceo, &hierarchy), all);
    }

    #[test]
    fn capability_sets_grow_with_rank() {
        let hierarchy = RoleHierarchy::default();
        let counts: Vec<usize> = hierarchy
            .iter()
            .map(|role| Capability::capabilities_for_role(role, &hierarchy).len())
            .collect();
        assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
