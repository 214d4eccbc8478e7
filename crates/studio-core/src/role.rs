//! Portal role enumeration.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Role of a portal account.
///
/// The set is closed: any other value is rejected with
/// [`ErrorKind::InvalidRole`] when parsed. Variants are declared from the
/// lowest to the highest privilege, but ranks are only ever derived through a
/// [`RoleHierarchy`].
///
/// [`ErrorKind::InvalidRole`]: crate::ErrorKind::InvalidRole
/// [`RoleHierarchy`]: crate::RoleHierarchy
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Registered account without studio duties.
    #[default]
    User,
    /// External or junior tester with access to test builds.
    DevTester,
    /// Studio developer.
    Developer,
    /// Studio staff with access to the staff dashboards.
    Staff,
    /// Administrator.
    Admin,
    /// Studio owner.
    Ceo,
}

impl Role {
    /// Number of roles in the closed set.
    pub const COUNT: usize = 6;

    /// Every role in the default order, lowest privilege first.
    pub const ALL: [Role; Role::COUNT] = [
        Role::User,
        Role::DevTester,
        Role::Developer,
        Role::Staff,
        Role::Admin,
        Role::Ceo,
    ];

    /// Parses a wire role name.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRole`] for anything outside the closed set.
    /// Matching is exact: `"Staff"` and `" staff"` are rejected.
    ///
    /// [`ErrorKind::InvalidRole`]: crate::ErrorKind::InvalidRole
    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse::<Self>()
            .map_err(|_| Error::invalid_role(value))
    }

    /// Returns the wire name of this role.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns whether this role belongs to the studio staff.
    #[inline]
    pub const fn is_staff(self) -> bool {
        matches!(self, Role::Staff | Role::Admin | Role::Ceo)
    }

    /// Returns whether this role has administrative privileges.
    #[inline]
    pub const fn is_administrator(self) -> bool {
        matches!(self, Role::Admin | Role::Ceo)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn wire_names() {
        let names: Vec<&str> = Role::iter().map(Role::as_str).collect();
        assert_eq!(
            names,
            ["user", "dev_tester", "developer", "staff", "admin", "ceo"]
        );
    }

    #[test]
    fn parse_accepts_every_wire_name() -> Result<()> {
        for role in Role::iter() {
            assert_eq!(Role::parse(role.as_str())?, role);
        }
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_values() {
        for value in ["", "root", "superuser", "Staff", "CEO", " admin", "dev-tester"] {
            let error = Role::parse(value).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidRole, "value: {value:?}");
        }
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::DevTester).unwrap();
        assert_eq!(json, "\"dev_tester\"");

        let role: Role = serde_json::from_str("\"ceo\"").unwrap();
        assert_eq!(role, Role::Ceo);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }

    #[test]
    fn role_sets() {
        let staff: Vec<Role> = Role::iter().filter(|r| r.is_staff()).collect();
        assert_eq!(staff, [Role::Staff, Role::Admin, Role::Ceo]);

        let admins: Vec<Role> = Role::iter().filter(|r| r.is_administrator()).collect();
        assert_eq!(admins, [Role::Admin, Role::Ceo]);
    }

    #[test]
    fn all_matches_declaration_order() {
        assert!(Role::ALL.iter().copied().eq(Role::iter()));
    }
}
